//! Bundled per-language stop-word lists.
//!
//! One UTF-8 file per language, one token per line, shipped in the exact
//! case forms the classifier should match — stop-word comparison is
//! case-sensitive, so the lists carry sentence-initial capitalised forms
//! alongside the lowercase ones.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// All embedded stop-lists: (language tag, file contents).
const STOPLISTS: &[(&str, &str)] = &[
    ("Czech", include_str!("Czech.txt")),
    ("Danish", include_str!("Danish.txt")),
    ("Dutch", include_str!("Dutch.txt")),
    ("English", include_str!("English.txt")),
    ("French", include_str!("French.txt")),
    ("German", include_str!("German.txt")),
    ("Italian", include_str!("Italian.txt")),
    ("Polish", include_str!("Polish.txt")),
    ("Spanish", include_str!("Spanish.txt")),
    ("Swedish", include_str!("Swedish.txt")),
];

/// Union of every bundled stop-list, built on first use.
static MERGED_STOPLIST: LazyLock<HashSet<String>> = LazyLock::new(|| {
    STOPLISTS
        .iter()
        .flat_map(|(_, contents)| parse_stoplist(contents))
        .collect()
});

/// Parse a stop-list file: one token per line, blank lines skipped, no
/// case folding.
fn parse_stoplist(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Return the stop-list bundled for `language` (tag match is
/// case-insensitive; token contents are not altered).
pub fn get_stoplist(language: &str) -> Result<HashSet<String>> {
    STOPLISTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(language))
        .map(|(_, contents)| parse_stoplist(contents))
        .ok_or_else(|| Error::UnknownStoplist(language.to_string()))
}

/// Return the union of all bundled stop-lists.
pub fn merged_stoplist() -> &'static HashSet<String> {
    &MERGED_STOPLIST
}

/// Return the available language tags.
pub fn available_languages() -> Vec<&'static str> {
    STOPLISTS.iter().map(|(name, _)| *name).collect()
}
