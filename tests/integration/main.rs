//! Integration tests for Etymograph
//!
//! These tests verify that fetching, projection and the CLI work together.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;

use etymograph_core::{LayoutConfig, ViewState, Word, flatten};
use etymograph_fetch::sources::LocalSource;
use etymograph_fetch::{SourceChain, WordSource};
use tempfile::TempDir;

const ETYMOLOGY: &str = r#"{
  "word": "etymology",
  "language": "English",
  "year": 1398,
  "definition": "The study of the origin of words.",
  "etymology": [{ "word": "etymologia", "language": "Latin", "year": 1350 }],
  "roots": [
    {
      "word": "etymologia",
      "language": "Latin",
      "year": 1350,
      "roots": [
        { "word": "etymon", "language": "Greek", "year": null },
        { "word": "logia", "language": "Greek" }
      ]
    }
  ]
}"#;

/// A checkout with `data/words/<Language>/<letter>/<word>.json` records.
fn create_checkout(records: &[(&str, &str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (language, word, json) in records {
        let letter: String = word.chars().take(1).collect();
        let dir = temp_dir.path().join("data/words").join(language).join(letter);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", word)), json).unwrap();
    }
    temp_dir
}

fn run_cli(checkout: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_etymograph"))
        .arg("--offline")
        .arg("--local-root")
        .arg(checkout)
        .args(args)
        .current_dir(checkout)
        .env("ETYMOGRAPH_SAMPLE_FALLBACK", "false")
        .output()
        .expect("Failed to execute etymograph")
}

#[tokio::test]
async fn test_local_lookup_end_to_end() {
    let checkout = create_checkout(&[("English", "etymology", ETYMOLOGY)]);
    let source: Arc<dyn WordSource> =
        Arc::new(LocalSource::new(checkout.path().join("data/words"), vec!["English".into()]));
    let chain = SourceChain::new(vec![source]);

    let record = chain.fetch_root("etymology").await.unwrap().unwrap();
    let words: Vec<_> = flatten(&record).iter().map(|w| w.word.clone()).collect();
    assert_eq!(words, vec!["etymology", "etymologia", "etymologia", "etymon", "logia"]);

    let state = ViewState::from_lookup("etymology", Some(record), &LayoutConfig::default());
    let view = state.view().unwrap();
    assert_eq!(view.timeline.len(), 3);
    assert_eq!(view.graph.nodes.len(), 5);
    assert_eq!(view.graph.edges.len(), 4);
}

#[tokio::test]
async fn test_unknown_word_is_a_normal_state() {
    let checkout = create_checkout(&[]);
    let source = LocalSource::new(checkout.path().join("data/words"), vec!["English".into()]);

    let record: Option<Word> = source.fetch_root("qwxz").await.unwrap();
    let state = ViewState::from_lookup("qwxz", record, &LayoutConfig::default());
    assert!(!state.is_found());
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_etymograph"))
        .arg("--help")
        .output()
        .expect("Failed to execute etymograph");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Word-origin chains as timelines and diagrams"));
}

#[test]
fn test_cli_show() {
    let checkout = create_checkout(&[("English", "etymology", ETYMOLOGY)]);
    let output = run_cli(checkout.path(), &["show", "  Etymology "]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("etymology (English)"));
    assert!(stdout.contains("The study of the origin of words"));
    assert!(stdout.contains("etymon (Greek, ?)"));
    assert!(stdout.contains("1350 CE  etymologia (Latin)"));
}

#[test]
fn test_cli_show_not_found_suggests() {
    let checkout = create_checkout(&[("English", "etymology", ETYMOLOGY)]);
    let output = run_cli(checkout.path(), &["show", "etymolog"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No etymology found for 'etymolog'."));
    assert!(stdout.contains("Did you mean: etymology"));
}

#[test]
fn test_cli_graph() {
    let checkout = create_checkout(&[("English", "etymology", ETYMOLOGY)]);
    let output = run_cli(checkout.path(), &["graph", "etymology"]);
    assert!(output.status.success());

    let graph: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graph["nodes"][0]["id"], "main");
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(graph["edges"][0]["id"], "main-etymologia-1-0");
}

#[test]
fn test_cli_validate() {
    let clean = create_checkout(&[("English", "etymology", ETYMOLOGY)]);
    let output = run_cli(clean.path(), &["validate"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 records, 0 errors, 0 warnings"));

    let broken = create_checkout(&[
        ("English", "etymology", ETYMOLOGY),
        ("English", "empty", r#"{"word":"empty","language":""}"#),
    ]);
    let output = run_cli(broken.path(), &["validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("language is empty"));
}

#[test]
fn test_cli_list() {
    let checkout = create_checkout(&[
        ("English", "etymology", ETYMOLOGY),
        ("Latin", "mundus", r#"{"word":"mundus","language":"Latin"}"#),
    ]);
    let output = run_cli(checkout.path(), &["list"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "English\tetymology\nLatin\tmundus\n");
}
