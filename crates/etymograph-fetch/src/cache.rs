//! Record cache for avoiding repeated fetches

use std::time::{Duration, Instant};

use dashmap::DashMap;
use etymograph_core::Word;

use crate::source::{FetchError, Lookup, WordSource};

/// Inserting past this many entries sweeps expired ones first.
pub const CLEANUP_THRESHOLD: usize = 1024;

/// Cache entry with expiration. Misses are cached too.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub record: Option<Word>,
    pub timestamp: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn is_expired(&self) -> bool {
        self.timestamp.elapsed() >= self.ttl
    }
}

/// Thread-safe cache keyed by normalized search term.
pub struct RecordCache {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl RecordCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// `Some(None)` is a cached miss; `None` means nothing is cached.
    pub fn get(&self, term: &str) -> Option<Option<Word>> {
        if self.entries.remove_if(term, |_, entry| entry.is_expired()).is_some() {
            return None;
        }
        self.entries.get(term).map(|entry| entry.record.clone())
    }

    pub fn insert(&self, term: &str, record: Option<Word>) {
        if self.entries.len() >= CLEANUP_THRESHOLD {
            self.cleanup_expired();
        }
        let entry = CacheEntry {
            record,
            timestamp: Instant::now(),
            ttl: self.default_ttl,
        };
        self.entries.insert(term.to_string(), entry);
    }

    /// Clear expired entries
    pub fn cleanup_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            expired_entries: self.entries.iter().filter(|e| e.is_expired()).count(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
}

/// Wraps a source with a [`RecordCache`]. Failures and degraded answers are
/// not cached.
pub struct CachedSource<S> {
    inner: S,
    cache: RecordCache,
}

impl<S: WordSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: RecordCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }
}

#[async_trait::async_trait]
impl<S: WordSource> WordSource for CachedSource<S> {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        Ok(self.lookup(term).await?.record)
    }

    async fn lookup(&self, term: &str) -> Result<Lookup, FetchError> {
        if let Some(cached) = self.cache.get(term) {
            tracing::debug!("Cache hit for '{}'", term);
            return Ok(Lookup::complete(cached));
        }
        let lookup = self.inner.lookup(term).await?;
        if lookup.degraded {
            tracing::debug!("Not caching degraded answer for '{}'", term);
        } else {
            self.cache.insert(term, lookup.record.clone());
        }
        Ok(lookup)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
