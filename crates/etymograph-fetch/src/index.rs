//! Index of a local record tree: listing, validation and suggestions

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use etymograph_core::{ValidationIssue, parse_record, validate};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::path::{first_letter, normalize_term};

/// One record file found in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedWord {
    /// File stem, i.e. the lower-cased word.
    pub word: String,
    pub language: String,
    pub path: PathBuf,
}

/// Record files under `<root>/<Language>/<letter>/<word>.json`.
#[derive(Debug, Clone)]
pub struct DataIndex {
    root: PathBuf,
    entries: Vec<IndexedWord>,
}

impl DataIndex {
    pub fn scan(root: &Path) -> anyhow::Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("data directory {} does not exist", root.display());
        }

        let mut entries = Vec::new();
        for result in WalkBuilder::new(root).build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Cannot read entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match classify(root, path) {
                Some(word) => entries.push(word),
                None => tracing::warn!("Skipping {}: not at <Language>/<letter>/<word>.json", path.display()),
            }
        }
        entries.sort_by(|a, b| (&a.language, &a.word).cmp(&(&b.language, &b.word)));

        tracing::info!("Indexed {} records under {}", entries.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[IndexedWord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn languages(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.language.as_str()).collect()
    }

    pub fn find(&self, term: &str) -> Option<&IndexedWord> {
        let term = normalize_term(term);
        self.entries.iter().find(|e| e.word == term)
    }

    /// Known words closest to `term`, best first.
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<String> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Vec::new();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &str)> = self
            .entries
            .iter()
            .filter_map(|e| matcher.fuzzy_match(&e.word, &term).map(|score| (score, e.word.as_str())))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut seen = BTreeSet::new();
        scored
            .into_iter()
            .filter(|(_, word)| seen.insert(*word))
            .take(limit)
            .map(|(_, word)| word.to_string())
            .collect()
    }

    /// Parse and check every record in parallel.
    pub fn validate_all(&self) -> ValidationReport {
        let files: Vec<FileReport> = self.entries.par_iter().map(check_file).collect();
        let report = ValidationReport {
            root: self.root.clone(),
            scanned_at: Utc::now(),
            files,
        };
        tracing::info!(
            "Validated {} records: {} errors, {} warnings",
            report.files.len(),
            report.error_count(),
            report.warning_count()
        );
        report
    }
}

fn classify(root: &Path, path: &Path) -> Option<IndexedWord> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative.iter().filter_map(|p| p.to_str()).collect();
    let [language, _letter, file] = parts.as_slice() else {
        return None;
    };
    let word = file.strip_suffix(".json")?;
    Some(IndexedWord {
        word: word.to_string(),
        language: language.to_string(),
        path: path.to_path_buf(),
    })
}

fn check_file(entry: &IndexedWord) -> FileReport {
    let mut report = FileReport {
        path: entry.path.clone(),
        word: entry.word.clone(),
        issues: Vec::new(),
        problems: Vec::new(),
    };

    let record = match std::fs::read_to_string(&entry.path)
        .with_context(|| format!("cannot read {}", entry.path.display()))
        .and_then(|json| parse_record(&json).map_err(anyhow::Error::from))
    {
        Ok(record) => record,
        Err(e) => {
            report.problems.push(format!("{:#}", e));
            return report;
        }
    };

    report.issues = validate(&record);

    if record.lookup_key() != entry.word {
        report
            .problems
            .push(format!("record word '{}' does not match file name", record.word));
    }
    if record.language != entry.language {
        report.problems.push(format!(
            "record language '{}' does not match directory '{}'",
            record.language, entry.language
        ));
    }
    let letter = entry.path.parent().and_then(|p| p.file_name()).and_then(|n| n.to_str());
    if letter != first_letter(&record.lookup_key()).as_deref() {
        report.problems.push("letter directory does not match word".to_string());
    }
    report
}

/// Findings for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub word: String,
    pub issues: Vec<ValidationIssue>,
    /// Unreadable or misplaced files; always errors.
    pub problems: Vec<String>,
}

impl FileReport {
    pub fn error_count(&self) -> usize {
        self.problems.len() + self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.is_error()).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub root: PathBuf,
    pub scanned_at: DateTime<Utc>,
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.files.iter().map(FileReport::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(FileReport::warning_count).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}
