//! Structural well-formedness checks for hand-authored records

use serde::Serialize;
use thiserror::Error;

use crate::model::{MAX_TREE_DEPTH, Word};

/// How bad an issue is. Warnings describe data the projector tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in a record, located by a path like `roots[0].roots[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("{path}: word is empty")]
    EmptyWord { path: String },
    #[error("{path}: language is empty")]
    EmptyLanguage { path: String },
    #[error("{path}: chain entry carries its own etymology")]
    NestedEtymology { path: String },
    #[error("{path}: roots nest deeper than {limit}")]
    DepthExceeded { path: String, limit: usize },
    #[error("{path}: etymology on a roots entry is ignored")]
    StrayEtymology { path: String },
    #[error("{path}: chain entry has an empty word or language")]
    EmptyChainEntry { path: String },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::StrayEtymology { .. } | ValidationIssue::EmptyChainEntry { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// True iff word and language are non-empty, every `roots` entry passes the
/// same check, and no chain entry carries an `etymology` field.
pub fn is_well_formed(record: &Word) -> bool {
    if record.word.is_empty() || record.language.is_empty() {
        return false;
    }
    if let Some(chain) = &record.etymology {
        if chain.iter().any(|entry| entry.etymology.is_some()) {
            return false;
        }
    }
    record.roots.iter().all(is_well_formed)
}

/// Every issue in a record, errors and warnings alike.
pub fn validate(record: &Word) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_identity(record, "$", &mut issues);

    for (i, entry) in record.chain().iter().enumerate() {
        let path = format!("etymology[{}]", i);
        if entry.etymology.is_some() {
            issues.push(ValidationIssue::NestedEtymology { path: path.clone() });
        }
        if entry.word.is_empty() || entry.language.is_empty() {
            issues.push(ValidationIssue::EmptyChainEntry { path });
        }
    }

    check_roots(&record.roots, "", 1, &mut issues);
    issues
}

fn check_identity(word: &Word, path: &str, issues: &mut Vec<ValidationIssue>) {
    if word.word.is_empty() {
        issues.push(ValidationIssue::EmptyWord { path: path.to_string() });
    }
    if word.language.is_empty() {
        issues.push(ValidationIssue::EmptyLanguage { path: path.to_string() });
    }
}

fn check_roots(entries: &[Word], prefix: &str, depth: usize, issues: &mut Vec<ValidationIssue>) {
    for (i, entry) in entries.iter().enumerate() {
        let path = if prefix.is_empty() {
            format!("roots[{}]", i)
        } else {
            format!("{}.roots[{}]", prefix, i)
        };
        if depth > MAX_TREE_DEPTH {
            issues.push(ValidationIssue::DepthExceeded {
                path,
                limit: MAX_TREE_DEPTH,
            });
            return;
        }
        check_identity(entry, &path, issues);
        if entry.etymology.is_some() {
            issues.push(ValidationIssue::StrayEtymology { path: path.clone() });
        }
        check_roots(&entry.roots, &path, depth + 1, issues);
    }
}
