//! Key document loading and flattening.
//!
//! The key document is the source of truth for which translation keys
//! exist. It is loaded once, flattened into dot-joined keys, and stays
//! immutable for the rest of the run.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// One flattened leaf of the key document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    /// Dot-joined path identifying this leaf (e.g. `Common.submit`).
    pub key: String,
    /// Stringified leaf value.
    pub value: String,
    /// 1-based line where the leaf key appears in the document.
    pub line: usize,
}

/// The flattened key universe, in document order.
///
/// Duplicate dotted paths collapse last-write-wins: the later value
/// replaces the earlier one at its original position.
#[derive(Debug, Default)]
pub struct KeyUniverse {
    pub file_path: String,
    entries: Vec<KeyEntry>,
    index: HashMap<String, usize>,
}

impl KeyUniverse {
    fn insert(&mut self, key: String, value: String, line: usize) {
        match self.index.get(&key) {
            Some(&slot) => {
                self.entries[slot].value = value;
                self.entries[slot].line = line;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(KeyEntry { key, value, line });
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&KeyEntry> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }
}

/// Load and flatten the key document.
///
/// A missing or unparsable document is fatal: without the key universe
/// there is nothing to classify.
pub fn load_key_document(path: &Path) -> Result<KeyUniverse> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read key document: {}", path.display()))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse key document: {}", path.display()))?;

    if !json.is_object() {
        bail!("Key document root must be an object: {}", path.display());
    }

    let line_index = build_line_index(&content);
    let mut universe = KeyUniverse {
        file_path: path.to_string_lossy().to_string(),
        ..Default::default()
    };

    // Explicit worklist instead of call recursion; depth is bounded only
    // by document size.
    let mut stack: Vec<(String, &Value)> = vec![(String::new(), &json)];
    while let Some((prefix, value)) = stack.pop() {
        match value {
            Value::Object(map) => {
                // Reverse push so a LIFO pop visits children in document order.
                for (key, child) in map.iter().rev() {
                    let child_key = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    stack.push((child_key, child));
                }
            }
            leaf => {
                let line = find_key_line(&content, &prefix, &line_index);
                universe.insert(prefix, stringify_leaf(leaf), line);
            }
        }
    }

    Ok(universe)
}

/// Strings are taken verbatim; every other leaf renders as its JSON text.
fn stringify_leaf(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// Find the line where a dotted key path appears in the document.
///
/// Walks the path parts in sequence so duplicate leaf names resolve to
/// the occurrence under the right parent: for `Common.submit`, the
/// `"submit"` that comes after `"Common"`, not one in another namespace.
/// Each candidate must be an actual JSON key (followed by `:`) rather
/// than a string value containing the same text.
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let needle = format!("\"{}\"", part);
        match find_json_key(&content[search_start..], &needle) {
            Some(end) => search_start += end,
            None => break,
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}

/// Offset just past the first occurrence of `needle` that is a JSON key.
fn find_json_key(haystack: &str, needle: &str) -> Option<usize> {
    let mut pos = 0;
    while let Some(rel) = haystack[pos..].find(needle) {
        let end = pos + rel + needle.len();
        if haystack[end..].trim_start().starts_with(':') {
            return Some(end);
        }
        pos = pos + rel + 1;
    }
    None
}
