//! In-memory resolution cache.
//!
//! Caches resolved artwork per raw title so repeated lookups of the same
//! filename skip the catalog entirely. Placeholder results are never
//! stored; a title that failed once is retried on the next call.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use super::resolver::Resolution;

/// Entry in the resolution cache.
struct CacheEntry {
    resolution: Resolution,
    inserted_at: Instant,
    last_accessed: Instant,
}

/// Thread-safe cache for resolutions.
pub struct ResolutionCache {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl ResolutionCache {
    /// Create a new resolution cache.
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Cache key for a raw title: trimmed, lowercased, whitespace collapsed.
    pub fn key(raw: &str) -> String {
        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Get a cached resolution if it exists and has not expired.
    pub fn get(&self, raw: &str) -> Option<Resolution> {
        let key = Self::key(raw);
        if let Some(mut entry) = self.entries.get_mut(&key) {
            if entry.inserted_at.elapsed() < self.ttl {
                entry.last_accessed = Instant::now();
                return Some(entry.resolution.clone());
            }
            // Entry is stale, remove it
            drop(entry);
            self.entries.remove(&key);
        }
        None
    }

    /// Store a resolution. Placeholders are ignored.
    pub fn insert(&self, raw: &str, resolution: &Resolution) {
        if self.max_entries == 0 || resolution.is_placeholder() {
            return;
        }

        let key = Self::key(raw);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let now = Instant::now();
        self.entries.insert(
            key,
            CacheEntry {
                resolution: resolution.clone(),
                inserted_at: now,
                last_accessed: now,
            },
        );
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove expired entries.
    pub fn cleanup_expired(&self) {
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.last_accessed)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(1024, 3600)
    }
}
