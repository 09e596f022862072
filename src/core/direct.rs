//! Direct reference extraction.
//!
//! Finds exact, literal key usages in source text: translation calls with
//! a quoted literal argument, `i18nKey` attributes, and message-component
//! `id` attributes. Matching is syntactic; no parse tree is built.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

/// `t('key')`, `t("key")`, and `` t(`key`) ``, including `i18n.t(...)`
/// and `i18next.t(...)`. Literals containing `$` are left to the dynamic
/// pattern extractor.
static T_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bi18n(?:ext)?\.)?\bt\s*\(\s*['"`]([^'"`$]+?)['"`]"#).unwrap()
});

/// `i18nKey="key"` or `i18nKey='key'` (covers `<Trans i18nKey="...">`).
static I18N_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"i18nKey\s*=\s*['"]([^'"]+?)['"]"#).unwrap());

/// `<FormattedMessage id="key">` message-component usage.
static MESSAGE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<FormattedMessage\s+id\s*=\s*['"]([^'"]+?)['"]"#).unwrap());

/// Extract every literal key candidate from one file's text.
///
/// Candidates are raw strings; membership in the key universe is checked
/// only at classification time.
pub fn extract_direct_references(content: &str) -> HashSet<String> {
    let mut keys = HashSet::new();

    for regex in [&T_CALL_REGEX, &I18N_KEY_REGEX, &MESSAGE_ID_REGEX] {
        for capture in regex.captures_iter(content) {
            keys.insert(capture[1].to_string());
        }
    }

    keys
}
