//! Deep string-literal scan.
//!
//! Second pass over the sources for keys the direct scan could not
//! explain: any quoted dot-path literal anywhere in a file that equals a
//! remaining key counts as a usage signal. This catches keys threaded
//! through config objects and arrays at the cost of precision: matches
//! inside comments or unrelated constants count too.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

/// Quoted dot-separated path: alphanumeric segments, at least one dot.
static DOTTED_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]([a-zA-Z][a-zA-Z0-9]*(?:\.[a-zA-Z][a-zA-Z0-9]*)+)['"]"#).unwrap()
});

/// Collect every quoted dot-path literal in `content` that names a key
/// from `remaining`.
pub fn scan_string_literals(content: &str, remaining: &HashSet<String>) -> HashSet<String> {
    DOTTED_LITERAL_REGEX
        .captures_iter(content)
        .filter_map(|capture| {
            let literal = &capture[1];
            remaining.contains(literal).then(|| literal.to_string())
        })
        .collect()
}
