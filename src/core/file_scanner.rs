use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

/// Filters applied while walking the source tree.
pub struct ScanOptions<'a> {
    /// Extensions treated as source files.
    pub extensions: &'a [String],
    /// Directory names pruned at any depth.
    pub exclude_dirs: &'a [String],
    /// Extra glob patterns for files to skip.
    pub ignores: &'a [String],
    pub verbose: bool,
}

/// Result of scanning files.
pub struct ScanResult {
    /// Candidate source files, sorted for deterministic downstream order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

pub fn scan_source_files(root: &Path, options: &ScanOptions) -> ScanResult {
    let ignore_patterns: Vec<Pattern> = options
        .ignores
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                if options.verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
                None
            }
        })
        .collect();

    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, options.exclude_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if options.verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !has_scannable_extension(path, options.extensions) {
            continue;
        }

        if ignore_patterns
            .iter()
            .any(|p| p.matches(&path.to_string_lossy()))
        {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|dir| dir == name))
}

fn has_scannable_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}
