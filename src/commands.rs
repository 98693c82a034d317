//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use etymograph_core::{LayoutConfig, ViewState, WordView, chronological};
use etymograph_fetch::{DataIndex, FetchConfig, WordSource, build_fetcher, normalize_term};
use etymograph_server::{EtymographServer, ServerConfig, ServerState};

pub fn load_config(path: Option<&Path>, local_root: Option<PathBuf>, offline: bool) -> anyhow::Result<FetchConfig> {
    let mut config = FetchConfig::load(path).context("failed to load configuration")?;
    if local_root.is_some() {
        config.local_root = local_root;
    }
    if offline {
        config.remote = false;
    }
    tracing::debug!("Fetch config: {:?}", config);
    Ok(config)
}

fn local_index(config: &FetchConfig) -> Option<DataIndex> {
    let dir = config.local_data_dir()?;
    match DataIndex::scan(&dir) {
        Ok(index) => Some(index),
        Err(e) => {
            tracing::warn!("No local index: {:#}", e);
            None
        }
    }
}

fn require_index(config: &FetchConfig) -> anyhow::Result<DataIndex> {
    let dir = config
        .local_data_dir()
        .context("no local checkout configured (use --local-root or ETYMOGRAPH_LOCAL_ROOT)")?;
    DataIndex::scan(&dir)
}

pub async fn serve(config: FetchConfig, host: String, port: u16, open: bool) -> anyhow::Result<()> {
    tracing::info!("Starting Etymograph server on {}:{}", host, port);

    let fetcher = build_fetcher(&config)?;
    let mut state = ServerState::new(Arc::new(fetcher));
    if let Some(index) = local_index(&config) {
        state = state.with_index(index);
    }

    let server = EtymographServer::new(state, ServerConfig { host, port });
    if open {
        let url = format!("http://{}/api/words", server.address()?);
        if let Err(e) = open::that(&url) {
            tracing::warn!("Cannot open browser at {}: {}", url, e);
        }
    }
    server.start().await
}

async fn lookup(config: &FetchConfig, term: &str) -> anyhow::Result<ViewState> {
    let query = normalize_term(term);
    let record = if query.is_empty() {
        None
    } else {
        let fetcher = build_fetcher(config)?;
        fetcher
            .fetch_root(&query)
            .await
            .with_context(|| format!("failed to fetch '{}'", query))?
    };
    Ok(ViewState::from_lookup(&query, record, &LayoutConfig::default()))
}

fn print_not_found(config: &FetchConfig, query: &str) {
    println!("No etymology found for '{}'.", query);
    let suggestions = local_index(config)
        .map(|index| index.suggest(query, etymograph_server::SUGGESTION_LIMIT))
        .unwrap_or_default();
    if !suggestions.is_empty() {
        println!("Did you mean: {}", suggestions.join(", "));
    }
}

pub async fn show(config: FetchConfig, term: &str) -> anyhow::Result<()> {
    match lookup(&config, term).await? {
        ViewState::Found { view } => print!("{}", render_view(&view)),
        ViewState::NotFound { query } => print_not_found(&config, &query),
    }
    Ok(())
}

pub async fn graph(config: FetchConfig, term: &str) -> anyhow::Result<()> {
    match lookup(&config, term).await? {
        ViewState::Found { view } => {
            println!("{}", serde_json::to_string_pretty(&view.graph)?);
        }
        ViewState::NotFound { query } => print_not_found(&config, &query),
    }
    Ok(())
}

pub fn validate(config: FetchConfig) -> anyhow::Result<()> {
    let index = require_index(&config)?;
    let report = index.validate_all();

    for file in &report.files {
        for problem in &file.problems {
            println!("error   {}: {}", file.path.display(), problem);
        }
        for issue in &file.issues {
            let level = if issue.is_error() { "error  " } else { "warning" };
            println!("{} {}: {}", level, file.path.display(), issue);
        }
    }
    println!(
        "{} records, {} errors, {} warnings",
        report.files.len(),
        report.error_count(),
        report.warning_count()
    );

    if !report.is_clean() {
        anyhow::bail!("{} invalid records", report.files.iter().filter(|f| f.error_count() > 0).count());
    }
    Ok(())
}

pub fn list(config: FetchConfig) -> anyhow::Result<()> {
    let index = require_index(&config)?;
    for entry in index.entries() {
        println!("{}\t{}", entry.language, entry.word);
    }
    Ok(())
}

/// Plain-text rendering of a found word for the terminal.
fn render_view(view: &WordView) -> String {
    let mut out = String::new();
    let root = &view.root;
    out.push_str(&format!("{} ({})\n", root.word, root.language));
    if let Some(meaning) = root.short_meaning() {
        out.push_str(&format!("  {}\n", meaning));
    }

    out.push_str("\nLineage:\n");
    for word in view.flattened.iter().skip(1) {
        let year = word.year.map(etymograph_core::format_year).unwrap_or_else(|| "?".to_string());
        out.push_str(&format!("  {} ({}, {})", word.word, word.language, year));
        if let Some(meaning) = word.short_meaning() {
            out.push_str(&format!(": {}", meaning));
        }
        out.push('\n');
    }

    if !view.timeline.is_empty() {
        out.push_str("\nTimeline:\n");
        for entry in chronological(&view.timeline) {
            out.push_str(&format!("  {:>9}  {} ({})\n", entry.label, entry.word, entry.language));
        }
    }
    out
}
