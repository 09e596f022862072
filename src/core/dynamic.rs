//! Dynamic pattern extraction.
//!
//! Finds non-literal usage shapes: template calls with interpolation and
//! calls passing a bare variable. Neither resolves to one exact key at
//! scan time, so each becomes a candidate rule the classifier matches
//! against the key universe later.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Identifiers that look like variables but can never hold a key.
const RESERVED_IDENTIFIERS: &[&str] = &["true", "false", "null", "undefined", "this"];

/// `` t(`prefix.${var}`) ``: template literal with at least one placeholder.
static TEMPLATE_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bi18n(?:ext)?\.)?\bt\s*\(\s*`([^`]*\$\{[^`]*)`"#).unwrap()
});

/// `t(identifier)` / `t(obj.path)`: non-literal call argument.
static VARIABLE_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bi18n(?:ext)?\.)?\bt\s*\(\s*([a-zA-Z_]\w*(?:\.\w+)*)\s*[,)]"#).unwrap()
});

/// A non-literal usage shape, not yet tied to any specific key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicPattern {
    /// The matched template text or `variable: name` description.
    pub pattern: String,
    /// Literal text before the first placeholder, trailing `.` trimmed.
    /// `None` for variable references and prefix-less templates.
    pub prefix: Option<String>,
    /// File the pattern was extracted from.
    pub file: String,
}

/// Extract every dynamic usage shape from one file's text.
pub fn extract_dynamic_patterns(content: &str, file: &str) -> Vec<DynamicPattern> {
    let mut patterns = Vec::new();

    for capture in TEMPLATE_CALL_REGEX.captures_iter(content) {
        let template = &capture[1];
        let Some(literal) = leading_literal(template) else {
            continue;
        };
        let prefix = literal.trim_end_matches('.');
        patterns.push(DynamicPattern {
            pattern: template.to_string(),
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            file: file.to_string(),
        });
    }

    for capture in VARIABLE_CALL_REGEX.captures_iter(content) {
        let name = &capture[1];
        if RESERVED_IDENTIFIERS.contains(&name) {
            continue;
        }
        patterns.push(DynamicPattern {
            pattern: format!("variable: {}", name),
            prefix: None,
            file: file.to_string(),
        });
    }

    patterns
}

/// Literal text before the first placeholder. Templates whose first `$`
/// is not part of `${`, or that open with a placeholder, yield nothing.
fn leading_literal(template: &str) -> Option<&str> {
    let pos = template.find('$')?;
    (pos > 0 && template[pos..].starts_with("${")).then(|| &template[..pos])
}
