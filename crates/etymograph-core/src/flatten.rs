//! Flattening a record into one ordered sequence for list and timeline display

use crate::model::{MAX_TREE_DEPTH, Origin, Word};
use serde::Serialize;

/// A flattened word with where it sat in the record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlatEntry<'a> {
    pub word: &'a Word,
    pub origin: Origin,
    pub depth: usize,
}

/// Searched word first, then its etymology chain, then a pre-order walk of
/// its roots. Repeated surface forms are kept.
pub fn flatten(root: &Word) -> Vec<&Word> {
    flatten_with(root, MAX_TREE_DEPTH)
}

/// [`flatten`] stopping below `max_depth`, the same cut the projector makes.
pub fn flatten_with(root: &Word, max_depth: usize) -> Vec<&Word> {
    flatten_entries_with(root, max_depth)
        .into_iter()
        .map(|entry| entry.word)
        .collect()
}

/// [`flatten`] with origin and depth for every entry.
pub fn flatten_entries(root: &Word) -> Vec<FlatEntry<'_>> {
    flatten_entries_with(root, MAX_TREE_DEPTH)
}

pub fn flatten_entries_with(root: &Word, max_depth: usize) -> Vec<FlatEntry<'_>> {
    let mut out = vec![FlatEntry {
        word: root,
        origin: Origin::Searched,
        depth: 0,
    }];

    if max_depth == 0 {
        return out;
    }

    // chain members are not expanded further
    out.extend(root.chain().iter().map(|word| FlatEntry {
        word,
        origin: Origin::Chain,
        depth: 1,
    }));

    push_roots(&mut out, &root.roots, 1, max_depth, &root.word);
    out
}

fn push_roots<'a>(
    out: &mut Vec<FlatEntry<'a>>,
    entries: &'a [Word],
    depth: usize,
    max_depth: usize,
    searched: &str,
) {
    if entries.is_empty() {
        return;
    }
    if depth > max_depth {
        tracing::warn!(
            "Roots of '{}' nest deeper than {}; remaining entries skipped",
            searched,
            max_depth
        );
        return;
    }
    for word in entries {
        out.push(FlatEntry {
            word,
            origin: Origin::Root,
            depth,
        });
        push_roots(out, &word.roots, depth + 1, max_depth, searched);
    }
}
