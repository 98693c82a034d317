//! Source implementations and the fallback chain

pub mod local;
pub mod github;
pub mod sample;

use std::sync::Arc;

use etymograph_core::Word;

use crate::config::FetchConfig;
use crate::source::{FetchError, Lookup, WordSource};

pub use github::{GithubApiSource, RawGithubSource};
pub use local::LocalSource;
pub use sample::SampleSource;

/// Factory function to create a single source by name.
pub fn create_source(name: &str, config: &FetchConfig) -> Result<Arc<dyn WordSource>, FetchError> {
    match name {
        "local" => {
            let dir = config
                .local_data_dir()
                .ok_or_else(|| FetchError::UnknownSource("local (no local_root configured)".to_string()))?;
            Ok(Arc::new(LocalSource::new(dir, config.languages.clone())))
        }
        "github-raw" => Ok(Arc::new(RawGithubSource::new(config)?)),
        "github-api" => Ok(Arc::new(GithubApiSource::new(config)?)),
        "sample" => Ok(Arc::new(SampleSource::new())),
        _ => Err(FetchError::UnknownSource(name.to_string())),
    }
}

/// Tries each source in turn and returns the first hit.
pub struct SourceChain {
    sources: Vec<Arc<dyn WordSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Arc<dyn WordSource>>) -> Self {
        Self { sources }
    }

    /// local checkout → raw GitHub → GitHub API → samples, as configured.
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut names = Vec::new();
        if config.local_root.is_some() {
            names.push("local");
        }
        if config.remote {
            names.push("github-raw");
            names.push("github-api");
        }
        if config.use_sample_fallback {
            names.push("sample");
        }

        let sources = names
            .into_iter()
            .map(|name| create_source(name, config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(sources))
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait::async_trait]
impl WordSource for SourceChain {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        Ok(self.lookup(term).await?.record)
    }

    /// First hit wins. Any answer given after a source failed is degraded,
    /// since the failed source may have held a better record. Only when
    /// every source failed is the last error returned.
    async fn lookup(&self, term: &str) -> Result<Lookup, FetchError> {
        let mut answered = false;
        let mut degraded = false;
        let mut last_error = None;

        for source in &self.sources {
            match source.lookup(term).await {
                Ok(lookup) if lookup.record.is_some() => {
                    tracing::debug!("'{}' found in {}", term, source.name());
                    return Ok(Lookup {
                        degraded: degraded || lookup.degraded,
                        ..lookup
                    });
                }
                Ok(lookup) => {
                    answered = true;
                    degraded |= lookup.degraded;
                }
                Err(e) => {
                    tracing::warn!("Source {} failed for '{}': {}", source.name(), term, e);
                    degraded = true;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(Lookup {
                record: None,
                degraded,
            }),
        }
    }

    fn name(&self) -> &str {
        "chain"
    }
}
