//! Key classification.
//!
//! Resolves all scan evidence into a total, non-overlapping partition of
//! the key universe: every defined key lands in exactly one of used,
//! possibly dynamic, or unused. Used keys whose evidence lives entirely
//! in test files get a secondary test-only tag.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::core::dynamic::DynamicPattern;
use crate::core::keys::KeyUniverse;

/// Per-key usage evidence: the set of files a candidate string was seen
/// in. Grows only by union, so accumulation order never matters.
pub type Evidence = HashMap<String, BTreeSet<String>>;

/// Pattern description reported for keys recovered by the deep scan.
pub const DEEP_SCAN_PATTERN: &str = "string literal reference in source";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedEntry {
    pub value: String,
    /// Files the key was directly referenced from, sorted.
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicEntry {
    pub value: String,
    /// The dynamic pattern text, or the deep-scan description.
    pub matched_pattern: String,
    pub pattern_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedEntry {
    pub value: String,
    /// Definition line in the key document.
    pub line: usize,
}

/// The classification result: three buckets partitioning the universe,
/// plus the test-only subset of used keys.
#[derive(Debug, Default)]
pub struct Classification {
    pub used: BTreeMap<String, UsedEntry>,
    pub possibly_dynamic: BTreeMap<String, DynamicEntry>,
    pub unused: BTreeMap<String, UnusedEntry>,
    pub test_only: Vec<String>,
}

/// Classify every key in the universe with strict first-match precedence:
/// direct evidence, then deep-scan recovery, then dynamic prefix match,
/// then unused.
pub fn classify(
    universe: &KeyUniverse,
    direct: &Evidence,
    recovered: &Evidence,
    patterns: &[DynamicPattern],
    test_indicators: &[String],
) -> Classification {
    let mut result = Classification::default();

    for entry in universe.entries() {
        let key = &entry.key;

        if let Some(locations) = direct.get(key) {
            result.used.insert(
                key.clone(),
                UsedEntry {
                    value: entry.value.clone(),
                    locations: locations.iter().cloned().collect(),
                },
            );
        } else if let Some(files) = recovered.get(key) {
            result.possibly_dynamic.insert(
                key.clone(),
                DynamicEntry {
                    value: entry.value.clone(),
                    matched_pattern: DEEP_SCAN_PATTERN.to_string(),
                    pattern_file: files.iter().cloned().collect::<Vec<_>>().join(", "),
                },
            );
        } else if let Some(pattern) = best_prefix_match(key, patterns) {
            result.possibly_dynamic.insert(
                key.clone(),
                DynamicEntry {
                    value: entry.value.clone(),
                    matched_pattern: pattern.pattern.clone(),
                    pattern_file: pattern.file.clone(),
                },
            );
        } else {
            result.unused.insert(
                key.clone(),
                UnusedEntry {
                    value: entry.value.clone(),
                    line: entry.line,
                },
            );
        }
    }

    result.test_only = result
        .used
        .iter()
        .filter(|(_, entry)| {
            entry
                .locations
                .iter()
                .all(|location| is_test_file(location, test_indicators))
        })
        .map(|(key, _)| key.clone())
        .collect();

    result
}

/// The longest matching prefix wins; length ties fall back to extraction
/// order.
fn best_prefix_match<'a>(key: &str, patterns: &'a [DynamicPattern]) -> Option<&'a DynamicPattern> {
    let mut best: Option<(&'a DynamicPattern, usize)> = None;

    for pattern in patterns {
        let Some(prefix) = pattern.prefix.as_deref() else {
            continue;
        };
        if !key.starts_with(prefix) {
            continue;
        }
        if best.is_none_or(|(_, len)| prefix.len() > len) {
            best = Some((pattern, prefix.len()));
        }
    }

    best.map(|(pattern, _)| pattern)
}

/// Path-substring heuristic applied to the lowercased path.
pub fn is_test_file(path: &str, indicators: &[String]) -> bool {
    let lower = path.to_lowercase();
    indicators
        .iter()
        .any(|indicator| lower.contains(indicator.as_str()))
}
