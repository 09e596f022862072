//! Report data model and serialization.
//!
//! The report is the single structured output of a run: bucket counts,
//! the full classification maps with their evidence, the test-only key
//! list, and the raw dynamic patterns. Progress counters and the summary
//! line go to stderr and are not part of the report contract.

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::core::classify::{Classification, DynamicEntry, UnusedEntry, UsedEntry};
use crate::core::dynamic::DynamicPattern;
use crate::core::keys::KeyUniverse;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

#[derive(Debug, Serialize)]
pub struct Report {
    /// Generation timestamp, RFC 3339.
    pub generated: String,
    pub total_defined: usize,
    pub used_count: usize,
    pub possibly_dynamic_count: usize,
    pub unused_count: usize,
    pub test_only_count: usize,
    pub used: BTreeMap<String, UsedEntry>,
    pub possibly_dynamic: BTreeMap<String, DynamicEntry>,
    pub unused: BTreeMap<String, UnusedEntry>,
    pub test_only_keys: Vec<String>,
    /// Every discovered dynamic pattern, in extraction order, whether or
    /// not it matched a key.
    pub dynamic_patterns: Vec<DynamicPattern>,
}

impl Report {
    pub fn new(
        universe: &KeyUniverse,
        classification: Classification,
        dynamic_patterns: Vec<DynamicPattern>,
    ) -> Self {
        Self {
            generated: chrono::Local::now().to_rfc3339(),
            total_defined: universe.len(),
            used_count: classification.used.len(),
            possibly_dynamic_count: classification.possibly_dynamic.len(),
            unused_count: classification.unused.len(),
            test_only_count: classification.test_only.len(),
            used: classification.used,
            possibly_dynamic: classification.possibly_dynamic,
            unused: classification.unused,
            test_only_keys: classification.test_only,
            dynamic_patterns,
        }
    }

    /// Pretty-printed JSON for stdout or the `--output` file.
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Print the one-line bucket summary to stderr.
pub fn print_summary(report: &Report) {
    print_summary_to(report, &mut io::stderr().lock());
}

/// Print the summary to a custom writer. Useful for testing.
pub fn print_summary_to<W: Write>(report: &Report, writer: &mut W) {
    let breakdown = format!(
        "{} defined, {} used, {} possibly dynamic, {} test-only",
        report.total_defined,
        report.used_count,
        report.possibly_dynamic_count,
        report.test_only_count
    );

    if report.unused_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} - no unused keys", breakdown).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({})",
            FAILURE_MARK.red(),
            format!(
                "{} unused {}",
                report.unused_count,
                if report.unused_count == 1 {
                    "key"
                } else {
                    "keys"
                }
            )
            .yellow(),
            breakdown
        );
    }
}
