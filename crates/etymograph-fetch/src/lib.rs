//! Record fetching for Etymograph
//!
//! This crate resolves a search term to a root record. Records live in a
//! tree keyed by language and first letter, reachable on disk, through raw
//! GitHub URLs or through the GitHub contents API, with built-in samples as
//! a last resort.

pub mod config;
pub mod path;
pub mod source;
pub mod sources;
pub mod cache;
pub mod index;

#[cfg(test)]
pub mod tests;

pub use config::{ConfigError, FetchConfig};
pub use path::{normalize_term, record_path};
pub use source::{FetchError, Lookup, WordSource};
pub use sources::{SourceChain, create_source};
pub use cache::{CLEANUP_THRESHOLD, CachedSource, RecordCache};
pub use index::{DataIndex, FileReport, IndexedWord, ValidationReport};

/// Chain every configured source behind a cache.
pub fn build_fetcher(config: &FetchConfig) -> Result<CachedSource<SourceChain>, FetchError> {
    let chain = SourceChain::from_config(config)?;
    tracing::info!("Record sources: {}", chain.names().join(" → "));
    Ok(CachedSource::new(chain, config.cache_ttl()))
}
