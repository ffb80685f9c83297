//! Fragment caching for repeated pattern texts.
//!
//! Road network extracts repeat the same handful of patterns across many
//! features. The cache maps a normalized pattern text to its rendered
//! fragment, `None` included, so each distinct text is translated once.
//! Invalid patterns are never cached.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use lru::LruCache;

use crate::config::CacheConfig;

/// Thread-safe LRU cache of rendered fragments.
///
/// # Example
///
/// ```rust
/// use timedomain_tagger::{CacheConfig, FragmentCache};
///
/// let cache = FragmentCache::new(CacheConfig::default());
/// cache.set("[(h6){h2}]".to_string(), Some("06:00-08:00 off".to_string()));
///
/// assert_eq!(cache.get("[(h6){h2}]"), Some(Some("06:00-08:00 off".to_string())));
/// assert_eq!(cache.get("[(M3)(M5)]"), None);
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct FragmentCache {
    inner: Mutex<LruCache<String, Option<String>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FragmentCache {
    /// Creates a fragment cache with the given configuration.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Gets the cached fragment for a key.
    ///
    /// The outer `Option` is the lookup, the inner one the fragment: a hit
    /// can be `Some(None)` for a pattern that renders nothing.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        let found = self
            .inner
            .lock()
            .ok()
            .and_then(|mut cache| cache.get(key).cloned());
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Stores a fragment, evicting the least recently used entry when full.
    pub fn set(&self, key: String, fragment: Option<String>) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.put(key, fragment);
        }
    }

    /// Returns the number of cached pattern texts.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all entries and resets the counters.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for FragmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("FragmentCache")
            .field("entries", &stats.entries)
            .field("hits", &stats.hits)
            .field("misses", &stats.misses)
            .finish()
    }
}

/// Statistics about cache use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached pattern texts.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to translate.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, 0.0 when unused.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Normalizes a pattern text for use as a cache key.
///
/// Runs of pattern whitespace (space, tab, CR, LF) collapse to a single
/// space and the ends are trimmed, so `[[(d12){d1}]  +  [(d13){d1}]]` and
/// `[[(d12){d1}] + [(d13){d1}]]` share an entry. Any other character,
/// other Unicode whitespace included, is kept as is: it decides validity
/// and must not alias a valid key. Case is significant (`m` and `M` differ).
pub fn normalize_cache_key(pattern: &str) -> String {
    pattern
        .split(is_pattern_whitespace)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_pattern_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
