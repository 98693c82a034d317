//! Dated entries for timeline display

use serde::{Deserialize, Serialize};

use crate::flatten::flatten_entries_with;
use crate::model::{MAX_TREE_DEPTH, Origin, Word};

/// A flattened word that carries a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub word: String,
    pub language: String,
    pub year: i32,
    /// "1398 CE" / "500 BCE".
    pub label: String,
    pub definition: Option<String>,
    pub origin: Origin,
}

/// Dated entries in flatten order. Undated entries are left out, never
/// given a placeholder year.
pub fn timeline(root: &Word) -> Vec<TimelineEntry> {
    timeline_with(root, MAX_TREE_DEPTH)
}

/// [`timeline`] over the entries above `max_depth`.
pub fn timeline_with(root: &Word, max_depth: usize) -> Vec<TimelineEntry> {
    flatten_entries_with(root, max_depth)
        .into_iter()
        .filter_map(|entry| {
            let year = entry.word.year?;
            Some(TimelineEntry {
                word: entry.word.word.clone(),
                language: entry.word.language.clone(),
                year,
                label: format_year(year),
                definition: entry.word.short_meaning(),
                origin: entry.origin,
            })
        })
        .collect()
}

/// Oldest first; entries sharing a year keep their flatten order.
pub fn chronological(entries: &[TimelineEntry]) -> Vec<TimelineEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.year);
    sorted
}

pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", year.unsigned_abs())
    } else {
        format!("{} CE", year)
    }
}
