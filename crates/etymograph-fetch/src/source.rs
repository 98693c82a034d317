//! Record source trait shared by every transport

use std::path::PathBuf;

use etymograph_core::{RecordError, Word};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("bad record at {location}: {source}")]
    Parse {
        location: String,
        source: RecordError,
    },
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("unknown source: {0}")]
    UnknownSource(String),
}

/// Outcome of a lookup that may have skipped failing sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub record: Option<Word>,
    /// Some source failed and the answer may be wrong. Never cache these.
    pub degraded: bool,
}

impl Lookup {
    pub fn complete(record: Option<Word>) -> Self {
        Self {
            record,
            degraded: false,
        }
    }

    pub fn degraded(record: Option<Word>) -> Self {
        Self {
            record,
            degraded: true,
        }
    }
}

/// Anything that can resolve a normalized search term to a root record.
///
/// `Ok(None)` means the word is not in this source. Errors are reserved for
/// transport and parse failures.
#[async_trait::async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError>;

    /// [`WordSource::fetch_root`] plus whether the answer is trustworthy.
    async fn lookup(&self, term: &str) -> Result<Lookup, FetchError> {
        Ok(Lookup::complete(self.fetch_root(term).await?))
    }

    /// Short name for logs.
    fn name(&self) -> &str;
}
