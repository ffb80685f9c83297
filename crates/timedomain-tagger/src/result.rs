//! Tagging result types.

use std::collections::BTreeMap;
use std::time::Duration;

use timedomain::{ContextId, TimeDomainError};

use crate::cache::CacheStats;

/// Outcome of tagging every feature of a source.
///
/// # Example
///
/// ```ignore
/// let report = tagger.tag_all(&extract)?;
///
/// for (context_id, value) in report.iter() {
///     println!("{}\t{}={}", context_id, report.tag_key, value);
/// }
/// println!("{} features skipped", report.skipped.len());
/// ```
#[derive(Debug)]
pub struct TagReport {
    /// Key the values belong under, e.g. `opening_hours`.
    pub tag_key: String,
    /// Tag value per feature. Features whose restriction is empty are absent.
    pub tags: BTreeMap<ContextId, String>,
    /// Features left untagged because of an invalid pattern, in id order.
    pub skipped: Vec<SkippedContext>,
    /// Run statistics.
    pub stats: TaggingStats,
}

impl TagReport {
    /// Returns the tag value of a feature.
    pub fn get(&self, context_id: ContextId) -> Option<&str> {
        self.tags.get(&context_id).map(String::as_str)
    }

    /// Number of tagged features.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no feature was tagged.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates tagged features in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ContextId, &str)> {
        self.tags.iter().map(|(id, value)| (*id, value.as_str()))
    }
}

/// A feature the tagger gave up on.
#[derive(Debug)]
pub struct SkippedContext {
    /// The feature.
    pub context_id: ContextId,
    /// First invalid pattern found for it.
    pub error: TimeDomainError,
}

/// Statistics from one tagging run.
#[derive(Debug, Clone, Default)]
pub struct TaggingStats {
    /// Total duration.
    pub duration: Duration,
    /// Entries read from the source.
    pub entries: usize,
    /// Distinct features seen.
    pub contexts: usize,
    /// Features that received a tag.
    pub tagged: usize,
    /// Features whose patterns were all untranslatable.
    pub untagged: usize,
    /// Features skipped for invalid patterns.
    pub skipped: usize,
    /// Cache statistics after the run, if caching is enabled.
    pub cache: Option<CacheStats>,
}
