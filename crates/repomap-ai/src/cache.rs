//! Summary cache for avoiding redundant API calls

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::summarizer::FileSummary;

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    summary: FileSummary,
    timestamp: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.timestamp.elapsed() > self.ttl
    }
}

/// Bounded cache of file summaries, keyed by content hash.
///
/// An explicit owned object so ownership of cached summaries is visible at
/// the call site. Entries expire after the configured TTL; when the cache
/// is full the oldest entry is evicted.
pub struct SummaryCache {
    entries: HashMap<String, CacheEntry>,
    default_ttl: Duration,
    capacity: usize,
}

impl SummaryCache {
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            capacity,
        }
    }

    /// Get a cached summary if present and not expired.
    pub fn get(&self, content_hash: &str) -> Option<&FileSummary> {
        self.entries
            .get(content_hash)
            .filter(|entry| !entry.is_expired())
            .map(|entry| &entry.summary)
    }

    /// Store a summary under its content hash.
    pub fn insert(&mut self, content_hash: String, summary: FileSummary) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&content_hash) {
            self.evict_oldest();
        }
        self.entries.insert(
            content_hash,
            CacheEntry {
                summary,
                timestamp: Instant::now(),
                ttl: self.default_ttl,
            },
        );
    }

    /// Clear expired entries
    pub fn cleanup_expired(&mut self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.timestamp)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
