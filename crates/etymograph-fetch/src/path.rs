//! Search-term normalization and record path keying

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Trim, lower-case and collapse runs of whitespace.
pub fn normalize_term(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").to_lowercase()
}

/// Lower-cased first character, the letter directory of a record.
pub fn first_letter(term: &str) -> Option<String> {
    term.chars().next().map(|c| c.to_lowercase().collect())
}

/// `<Language>/<letter>/<term>.json` as path segments, or `None` for terms
/// that cannot name a record file.
pub fn record_segments(language: &str, term: &str) -> Option<[String; 3]> {
    if term.is_empty()
        || term == "."
        || term == ".."
        || term.contains(['/', '\\'])
        || language.is_empty()
        || language.contains(['/', '\\'])
    {
        return None;
    }
    let letter = first_letter(term)?;
    Some([language.to_string(), letter, format!("{}.json", term)])
}

/// Repository-relative path of a record, e.g. `data/words/English/e/etymology.json`.
pub fn record_path(data_path: &str, language: &str, term: &str) -> Option<String> {
    let segments = record_segments(language, term)?;
    let prefix = data_path.trim_matches('/');
    let tail = segments.join("/");
    if prefix.is_empty() {
        Some(tail)
    } else {
        Some(format!("{}/{}", prefix, tail))
    }
}

/// Record file under a local data directory.
pub fn local_record_path(data_dir: &Path, language: &str, term: &str) -> Option<PathBuf> {
    let [language, letter, file] = record_segments(language, term)?;
    Some(data_dir.join(language).join(letter).join(file))
}
