//! Command dispatch.
//!
//! Maps parsed arguments onto the analysis pipeline. Configuration is
//! merged with CLI arguments taking priority over the config file, which
//! takes priority over built-in defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{
    args::{AnalyzeCommand, Arguments, Command},
    exit_status::ExitStatus,
};
use crate::{
    config::{CONFIG_FILE_NAME, default_config_json, load_config},
    core::pipeline::{AnalyzeOptions, run_analysis},
    report::{SUCCESS_MARK, print_summary},
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Analyze(cmd)) => analyze(cmd),
        Some(Command::Init) => {
            init()?;
            Ok(ExitStatus::Success)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn analyze(cmd: AnalyzeCommand) -> Result<ExitStatus> {
    let args = cmd.args;

    // CLI --source-root determines where to look for the config file.
    let config_dir = args
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&config_dir)?;
    if args.common.verbose && !config_result.from_file {
        eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME);
    }

    let mut config = config_result.config;
    if let Some(ref key_document) = args.common.key_document {
        config.key_document = key_document.to_string_lossy().to_string();
    }

    let root_dir = args
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.source_root));

    let report = run_analysis(&AnalyzeOptions {
        config,
        root_dir,
        verbose: args.common.verbose,
    })?;

    let rendered = report.render()?;
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Report written to {}", path.display()).green()
            );
        }
        None => println!("{}", rendered),
    }

    print_summary(&report);

    if args.strict && report.unused_count > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    Ok(())
}
