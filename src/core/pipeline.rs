//! Pipeline orchestration.
//!
//! Runs the phases in their one mandatory order: flatten the key
//! universe, stream all source files once for direct references and
//! dynamic patterns, deep-scan only the keys still unexplained, then
//! classify. Per-file scanning is parallelized; evidence accumulation is
//! a commutative set union, so merge order never changes the result.

use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    config::Config,
    core::{
        classify::{Evidence, classify},
        deep::scan_string_literals,
        direct::extract_direct_references,
        dynamic::{DynamicPattern, extract_dynamic_patterns},
        file_scanner::{ScanOptions, scan_source_files},
        keys::load_key_document,
    },
    report::Report,
};

pub struct AnalyzeOptions {
    pub config: Config,
    /// Project root; source paths in evidence are reported relative to it.
    pub root_dir: PathBuf,
    pub verbose: bool,
}

/// Run the full analysis and assemble the report.
///
/// Fatal only when the key document is missing or unparsable; individual
/// source files that cannot be read are skipped and contribute nothing.
pub fn run_analysis(options: &AnalyzeOptions) -> Result<Report> {
    let config = &options.config;
    let key_document_path = resolve_path(&options.root_dir, &config.key_document);

    let universe = load_key_document(&key_document_path)?;
    eprintln!("Total defined keys: {}", universe.len());

    let scan = scan_source_files(
        &options.root_dir,
        &ScanOptions {
            extensions: &config.extensions,
            exclude_dirs: &config.exclude_dirs,
            ignores: &config.ignores,
            verbose: options.verbose,
        },
    );
    if scan.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            scan.skipped_count,
            if options.verbose {
                ""
            } else {
                " (use -v for details)"
            }
        );
    }
    eprintln!("Source files to scan: {}", scan.files.len());

    // Phase 1: direct references and dynamic patterns, one pass per file.
    let (direct, patterns) = scan_direct_and_dynamic(&scan.files, &options.root_dir);
    eprintln!(
        "Phase 1: {} directly referenced keys, {} dynamic patterns",
        direct.len(),
        patterns.len()
    );

    // Phase 2 must see the complete phase 1 result: it only runs over
    // the keys the direct scan left unexplained.
    let remaining: HashSet<String> = universe
        .entries()
        .iter()
        .map(|entry| entry.key.clone())
        .filter(|key| !direct.contains_key(key))
        .collect();
    let recovered = deep_scan(&scan.files, &options.root_dir, &key_document_path, &remaining);
    eprintln!("Phase 2: {} keys recovered by deep scan", recovered.len());

    let classification = classify(
        &universe,
        &direct,
        &recovered,
        &patterns,
        &config.test_indicators,
    );

    Ok(Report::new(&universe, classification, patterns))
}

/// Phase 1: one streaming pass per file, parallelized, merged
/// sequentially so pattern extraction order follows the sorted file list.
fn scan_direct_and_dynamic(files: &[PathBuf], root: &Path) -> (Evidence, Vec<DynamicPattern>) {
    let per_file: Vec<_> = files
        .par_iter()
        .filter_map(|path| {
            // Unreadable files contribute no evidence and never abort the run.
            let content = fs::read_to_string(path).ok()?;
            let relative = relative_to(path, root);
            let keys = extract_direct_references(&content);
            let patterns = extract_dynamic_patterns(&content, &relative);
            Some((relative, keys, patterns))
        })
        .collect();

    let mut direct = Evidence::new();
    let mut patterns = Vec::new();
    for (relative, keys, file_patterns) in per_file {
        for key in keys {
            direct.entry(key).or_default().insert(relative.clone());
        }
        patterns.extend(file_patterns);
    }

    (direct, patterns)
}

/// Phase 2: match quoted dot-path literals against the remaining keys,
/// skipping the key document itself.
fn deep_scan(
    files: &[PathBuf],
    root: &Path,
    key_document: &Path,
    remaining: &HashSet<String>,
) -> Evidence {
    if remaining.is_empty() {
        return Evidence::new();
    }

    let per_file: Vec<_> = files
        .par_iter()
        .filter(|path| path.as_path() != key_document)
        .filter_map(|path| {
            let content = fs::read_to_string(path).ok()?;
            let hits = scan_string_literals(&content, remaining);
            (!hits.is_empty()).then(|| (relative_to(path, root), hits))
        })
        .collect();

    let mut recovered = Evidence::new();
    for (relative, hits) in per_file {
        for key in hits {
            recovered.entry(key).or_default().insert(relative.clone());
        }
    }

    recovered
}

fn relative_to(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Resolve a configured path against the project root. Keeps plain
/// relative paths when the root is the current directory so reported
/// paths stay free of `./.` noise.
pub fn resolve_path(root_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        path.to_path_buf()
    } else {
        let relative = path.strip_prefix(Path::new(".")).unwrap_or(path);
        root_dir.join(relative)
    }
}
