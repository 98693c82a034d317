//! Unit tests for etymograph-fetch

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use etymograph_core::Word;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::sources::{GithubApiSource, LocalSource, RawGithubSource, SampleSource};
use crate::*;

/// Serve canned responses keyed by request path; unknown paths get 404.
/// Returns the base URL and the list of request lines seen.
async fn mock_github(routes: Vec<(&'static str, u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let line = request.lines().next().unwrap_or_default().to_string();
            log.lock().unwrap().push(request.clone());

            let target = line.split_whitespace().nth(1).unwrap_or_default().to_string();
            let (status, body) = routes
                .iter()
                .find(|(path, _, _)| *path == target)
                .map(|(_, status, body)| (*status, *body))
                .unwrap_or((404, "Not Found"));
            let response = format!(
                "HTTP/1.1 {} X\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), seen)
}

fn write_record(root: &Path, language: &str, word: &str, json: &str) {
    let letter: String = word.chars().take(1).collect();
    let dir = root.join(language).join(letter);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.json", word)), json).unwrap();
}

const MUNDUS: &str = r#"{"word":"mundus","language":"Latin","year":null,"roots":[]}"#;

#[tokio::test]
async fn test_raw_source_against_mock() {
    let (base, seen) = mock_github(vec![(
        "/etymograph/etymograph/main/data/words/Latin/m/mundus.json",
        200,
        MUNDUS,
    )])
    .await;
    let config = FetchConfig {
        raw_base_url: base,
        languages: vec!["English".into(), "Latin".into()],
        ..FetchConfig::default()
    };
    let source = RawGithubSource::new(&config).unwrap();

    let word = source.fetch_root("mundus").await.unwrap().unwrap();
    assert_eq!(word.language, "Latin");
    // English tried first and missed
    assert_eq!(seen.lock().unwrap().len(), 2);

    assert!(source.fetch_root("absent").await.unwrap().is_none());
}

#[tokio::test]
async fn test_api_source_sends_raw_accept_header() {
    let (base, seen) = mock_github(vec![(
        "/repos/etymograph/etymograph/contents/data/words/English/e/etymology.json?ref=main",
        200,
        r#"{"word":"etymology","language":"English","year":1398}"#,
    )])
    .await;
    let config = FetchConfig {
        api_base_url: base,
        ..FetchConfig::default()
    };
    let source = GithubApiSource::new(&config).unwrap();

    let word = source.fetch_root("etymology").await.unwrap().unwrap();
    assert_eq!(word.year, Some(1398));
    let request = seen.lock().unwrap()[0].to_lowercase();
    assert!(request.contains("accept: application/vnd.github.raw+json"));
    assert!(request.contains("user-agent: etymograph/"));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let (base, _) = mock_github(vec![(
        "/etymograph/etymograph/main/data/words/English/w/world.json",
        500,
        "boom",
    )])
    .await;
    let config = FetchConfig {
        raw_base_url: base,
        ..FetchConfig::default()
    };
    let source = RawGithubSource::new(&config).unwrap();
    let result = source.fetch_root("world").await;
    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
}

struct FailingSource;

#[async_trait::async_trait]
impl WordSource for FailingSource {
    async fn fetch_root(&self, _term: &str) -> Result<Option<Word>, FetchError> {
        Err(FetchError::InvalidUrl("nowhere".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[tokio::test]
async fn test_chain_falls_through_to_samples() {
    let temp_dir = TempDir::new().unwrap();
    write_record(temp_dir.path(), "Latin", "mundus", MUNDUS);

    let chain = SourceChain::new(vec![
        Arc::new(FailingSource),
        Arc::new(LocalSource::new(temp_dir.path(), vec!["Latin".into()])),
        Arc::new(SampleSource::new()),
    ]);

    let local = chain.fetch_root("mundus").await.unwrap().unwrap();
    assert_eq!(local.language, "Latin");

    let sample = chain.fetch_root("etymology").await.unwrap().unwrap();
    assert_eq!(sample.word, "etymology");

    assert!(chain.fetch_root("qwxz").await.unwrap().is_none());
}

#[tokio::test]
async fn test_chain_of_failures_is_an_error() {
    let chain = SourceChain::new(vec![Arc::new(FailingSource), Arc::new(FailingSource)]);
    assert!(chain.fetch_root("anything").await.is_err());
}

/// Fails its first call, then knows "borrowed".
struct FlakySource {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl WordSource for FlakySource {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(FetchError::Status {
                url: "https://example.invalid".into(),
                status: 503,
            });
        }
        Ok((term == "borrowed").then(|| Word::new("borrowed", "English")))
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[tokio::test]
async fn test_miss_during_outage_is_retried() {
    let chain = SourceChain::new(vec![
        Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
        }),
        Arc::new(SampleSource::new()),
    ]);
    let fetcher = CachedSource::new(chain, Duration::from_secs(300));

    let first = fetcher.lookup("borrowed").await.unwrap();
    assert!(first.record.is_none());
    assert!(first.degraded);
    assert!(fetcher.cache().is_empty());

    let second = fetcher.fetch_root("borrowed").await.unwrap();
    assert_eq!(second.unwrap().word, "borrowed");
    assert_eq!(fetcher.cache().len(), 1);
}

#[tokio::test]
async fn test_chain_marks_answers_after_failure() {
    let chain = SourceChain::new(vec![Arc::new(FailingSource), Arc::new(SampleSource::new())]);
    let hit = chain.lookup("world").await.unwrap();
    assert!(hit.record.is_some());
    assert!(hit.degraded);

    let clean = SourceChain::new(vec![Arc::new(SampleSource::new())]);
    assert_eq!(clean.lookup("qwxz").await.unwrap(), Lookup::complete(None));
}

#[test]
fn test_chain_from_config() {
    let config = FetchConfig {
        local_root: Some("/srv/etymograph".into()),
        remote: false,
        ..FetchConfig::default()
    };
    let chain = SourceChain::from_config(&config).unwrap();
    assert_eq!(chain.names(), vec!["local", "sample"]);

    let config = FetchConfig {
        use_sample_fallback: false,
        ..FetchConfig::default()
    };
    let chain = SourceChain::from_config(&config).unwrap();
    assert_eq!(chain.names(), vec!["github-raw", "github-api"]);
}

#[test]
fn test_create_source_rejects_unknown() {
    let config = FetchConfig::default();
    assert!(create_source("sample", &config).is_ok());
    assert!(matches!(create_source("ftp", &config), Err(FetchError::UnknownSource(_))));
    // local needs a checkout
    assert!(create_source("local", &config).is_err());
}

#[test]
fn test_index_scan_and_suggest() {
    let temp_dir = TempDir::new().unwrap();
    write_record(temp_dir.path(), "Latin", "mundus", MUNDUS);
    write_record(
        temp_dir.path(),
        "English",
        "mundane",
        r#"{"word":"mundane","language":"English","roots":[{"word":"mundus","language":"Latin"}]}"#,
    );
    write_record(temp_dir.path(), "English", "world", r#"{"word":"world","language":"English"}"#);
    fs::write(temp_dir.path().join("README.json"), "{}").unwrap();

    let index = DataIndex::scan(temp_dir.path()).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.languages().into_iter().collect::<Vec<_>>(), vec!["English", "Latin"]);
    assert_eq!(index.find("  World ").unwrap().language, "English");

    let suggestions = index.suggest("mund", 5);
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions.contains(&"mundus".to_string()));
    assert!(suggestions.contains(&"mundane".to_string()));
    assert!(index.suggest("", 5).is_empty());
}

#[test]
fn test_validate_all_reports_problems() {
    let temp_dir = TempDir::new().unwrap();
    write_record(temp_dir.path(), "Latin", "mundus", MUNDUS);
    write_record(temp_dir.path(), "English", "broken", "{ nope");
    write_record(temp_dir.path(), "English", "stray", r#"{"word":"other","language":"English"}"#);
    write_record(
        temp_dir.path(),
        "English",
        "warned",
        r#"{"word":"warned","language":"English","roots":[{"word":"w","language":"Latin","etymology":[]}]}"#,
    );

    let report = DataIndex::scan(temp_dir.path()).unwrap().validate_all();
    assert_eq!(report.files.len(), 4);
    assert!(!report.is_clean());
    assert_eq!(report.warning_count(), 1);

    let by_word = |w: &str| report.files.iter().find(|f| f.word == w).unwrap();
    assert_eq!(by_word("mundus").error_count(), 0);
    assert_eq!(by_word("broken").error_count(), 1);
    // word mismatch and letter mismatch
    assert_eq!(by_word("stray").error_count(), 2);
    assert_eq!(by_word("warned").error_count(), 0);
}

#[test]
fn test_scan_missing_dir() {
    assert!(DataIndex::scan(Path::new("/nonexistent/etymograph")).is_err());
}

#[tokio::test]
async fn test_build_fetcher_uses_local_checkout() {
    let temp_dir = TempDir::new().unwrap();
    write_record(&temp_dir.path().join("data/words"), "Latin", "mundus", MUNDUS);

    let config = FetchConfig {
        local_root: Some(temp_dir.path().to_path_buf()),
        languages: vec!["Latin".into()],
        remote: false,
        use_sample_fallback: false,
        ..FetchConfig::default()
    };
    let fetcher = build_fetcher(&config).unwrap();
    assert!(fetcher.fetch_root("mundus").await.unwrap().is_some());
    assert!(fetcher.fetch_root("world").await.unwrap().is_none());
    assert_eq!(fetcher.cache().stats().total_entries, 2);
}
