use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed, nothing to flag
/// - `Failure` (1): Command completed but found unused keys under `--strict`
/// - `Error` (2): Command failed due to internal error (missing key document, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, nothing to flag.
    Success,
    /// Command completed but found unused keys under `--strict`.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
