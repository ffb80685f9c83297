//! Batch tagger implementation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use timedomain::{
    join_fragments, ordered_entries, parse, render_entry, ContextId, PatternEntry,
    TimeDomainResult,
};
use tracing::{debug, info, warn};

use crate::cache::{normalize_cache_key, FragmentCache};
use crate::config::{InvalidPatternPolicy, TaggerConfig};
use crate::error::{TaggerError, TaggerResult};
use crate::result::{SkippedContext, TagReport, TaggingStats};
use crate::traits::TimeDomainSource;

/// Tags every feature of a [`TimeDomainSource`] with its restriction string.
///
/// Entries are grouped by context id and each group is translated exactly
/// like [`timedomain::parse`] would, optionally through a shared
/// [`FragmentCache`] and on the rayon pool.
///
/// # Example
///
/// ```rust
/// use timedomain::PatternEntry;
/// use timedomain_tagger::{CacheConfig, TaggerConfig, TimeDomainTagger};
///
/// let entries = vec![
///     PatternEntry::new(1, "[(h6){h2}]"),
///     PatternEntry::new(1, "[(h12)(h22)]"),
///     PatternEntry::new(2, "[(z37){z87}]"),
/// ];
///
/// let config = TaggerConfig::builder().with_cache(CacheConfig::default()).build();
/// let tagger = TimeDomainTagger::with_config(config).unwrap();
/// let report = tagger.tag_all(&entries).unwrap();
///
/// assert_eq!(report.get(1), Some("1970-9999; 06:00-08:00 off, 12:00-22:00 off"));
/// assert_eq!(report.get(2), None);
/// assert_eq!(report.stats.untagged, 1);
/// ```
pub struct TimeDomainTagger {
    config: TaggerConfig,
    cache: Option<Arc<FragmentCache>>,
}

impl TimeDomainTagger {
    /// Creates a tagger with default configuration.
    pub fn new() -> Self {
        Self {
            config: TaggerConfig::default(),
            cache: None,
        }
    }

    /// Creates a tagger with custom configuration.
    ///
    /// Fails with [`TaggerError::InvalidConfig`] if the tag key is empty or
    /// contains whitespace or `=`.
    pub fn with_config(config: TaggerConfig) -> TaggerResult<Self> {
        validate_tag_key(&config.tag_key)?;
        if config.parallel && !cfg!(feature = "parallel") {
            warn!("parallel tagging requested without the `parallel` feature; tagging sequentially");
        }
        let cache = config.cache.map(|c| Arc::new(FragmentCache::new(c)));
        Ok(Self { config, cache })
    }

    /// Returns a reference to the cache if enabled.
    pub fn cache(&self) -> Option<&FragmentCache> {
        self.cache.as_deref()
    }

    /// Returns a reference to the tagger configuration.
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    /// Translates the patterns of one feature.
    ///
    /// Same result as [`timedomain::parse`]; with caching enabled, pattern
    /// texts seen before are not translated again.
    pub fn tag_context<'a, I>(&self, entries: I) -> TimeDomainResult<String>
    where
        I: IntoIterator<Item = &'a PatternEntry>,
    {
        let Some(cache) = self.cache.as_deref() else {
            return parse(entries);
        };
        let fragments = ordered_entries(entries)
            .into_iter()
            .map(|entry| render_cached(cache, entry))
            .collect::<TimeDomainResult<Vec<_>>>()?;
        Ok(join_fragments(fragments))
    }

    /// Tags every feature of a source.
    ///
    /// Under [`InvalidPatternPolicy::Fail`] the first invalid feature, in
    /// context id order, aborts the run. Under [`InvalidPatternPolicy::Skip`]
    /// it is recorded in [`TagReport::skipped`] and the run continues.
    pub fn tag_all<S>(&self, source: &S) -> TaggerResult<TagReport>
    where
        S: TimeDomainSource + ?Sized,
    {
        let start = Instant::now();

        let mut entries = 0;
        let mut grouped: BTreeMap<ContextId, Vec<&PatternEntry>> = BTreeMap::new();
        for entry in source.entries() {
            entries += 1;
            grouped.entry(entry.context_id).or_default().push(entry);
        }
        let contexts: Vec<(ContextId, Vec<&PatternEntry>)> = grouped.into_iter().collect();
        debug!(entries, contexts = contexts.len(), "grouped time domain entries");

        let mut tags = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut untagged = 0;
        for (context_id, outcome) in self.render_contexts(&contexts) {
            match outcome {
                Ok(value) if value.is_empty() => untagged += 1,
                Ok(value) => {
                    tags.insert(context_id, value);
                }
                Err(error) => match self.config.policy {
                    InvalidPatternPolicy::Fail => return Err(TaggerError::Pattern(error)),
                    InvalidPatternPolicy::Skip => {
                        warn!(context_id, %error, "skipping feature with invalid time domain");
                        skipped.push(SkippedContext { context_id, error });
                    }
                },
            }
        }

        let stats = TaggingStats {
            duration: start.elapsed(),
            entries,
            contexts: contexts.len(),
            tagged: tags.len(),
            untagged,
            skipped: skipped.len(),
            cache: self.cache.as_ref().map(|c| c.stats()),
        };
        info!(
            contexts = stats.contexts,
            tagged = stats.tagged,
            untagged = stats.untagged,
            skipped = stats.skipped,
            elapsed_ms = stats.duration.as_millis() as u64,
            "time domain tagging complete"
        );

        Ok(TagReport {
            tag_key: self.config.tag_key.clone(),
            tags,
            skipped,
            stats,
        })
    }

    /// Outcomes in the order of `contexts`, whichever path renders them.
    fn render_contexts(
        &self,
        contexts: &[(ContextId, Vec<&PatternEntry>)],
    ) -> Vec<(ContextId, TimeDomainResult<String>)> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;
            return contexts
                .par_iter()
                .map(|(id, entries)| (*id, self.tag_context(entries.iter().copied())))
                .collect();
        }

        contexts
            .iter()
            .map(|(id, entries)| (*id, self.tag_context(entries.iter().copied())))
            .collect()
    }
}

impl Default for TimeDomainTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimeDomainTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeDomainTagger")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}

fn render_cached(cache: &FragmentCache, entry: &PatternEntry) -> TimeDomainResult<Option<String>> {
    let key = normalize_cache_key(&entry.raw_text);
    if let Some(fragment) = cache.get(&key) {
        return Ok(fragment);
    }
    let fragment = render_entry(entry)?;
    cache.set(key, fragment.clone());
    Ok(fragment)
}

fn validate_tag_key(tag_key: &str) -> TaggerResult<()> {
    if tag_key.is_empty() {
        return Err(TaggerError::InvalidConfig("tag key is empty".to_string()));
    }
    if tag_key.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(TaggerError::InvalidConfig(format!(
            "tag key '{}' contains whitespace or '='",
            tag_key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;

    fn entries(rows: &[(ContextId, &str)]) -> Vec<PatternEntry> {
        rows.iter()
            .map(|(id, text)| PatternEntry::new(*id, *text))
            .collect()
    }

    fn cached_tagger() -> TimeDomainTagger {
        let config = TaggerConfig::builder()
            .with_cache(CacheConfig { max_entries: 16 })
            .build();
        TimeDomainTagger::with_config(config).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn test_tagger_new() {
            let tagger = TimeDomainTagger::new();
            assert!(tagger.cache().is_none());
            assert_eq!(tagger.config().tag_key, "opening_hours");
        }

        #[test]
        fn test_tagger_with_cache() {
            let tagger = cached_tagger();
            assert!(tagger.cache().is_some());
        }

        #[test]
        fn test_empty_tag_key_rejected() {
            let config = TaggerConfig::builder().with_tag_key("").build();
            assert!(matches!(
                TimeDomainTagger::with_config(config),
                Err(TaggerError::InvalidConfig(_))
            ));
        }

        #[test]
        fn test_tag_key_with_equals_rejected() {
            let config = TaggerConfig::builder().with_tag_key("a=b").build();
            assert!(TimeDomainTagger::with_config(config).is_err());
        }

        #[test]
        fn test_conditional_tag_key_accepted() {
            let config = TaggerConfig::builder()
                .with_tag_key("access:conditional")
                .build();
            assert!(TimeDomainTagger::with_config(config).is_ok());
        }

        #[test]
        fn test_parallel_config_accepted() {
            let config = TaggerConfig::builder().with_parallel(true).build();
            let tagger = TimeDomainTagger::with_config(config).unwrap();
            assert!(tagger.config().parallel);
        }
    }

    mod tag_context {
        use super::*;

        #[test]
        fn test_matches_core_translation() {
            let rows = entries(&[(1, "[(h6){h2}]"), (1, "[(h12)(h22)]"), (1, "[(z37){z87}]")]);
            let expected = parse(&rows).unwrap();
            assert_eq!(TimeDomainTagger::new().tag_context(&rows).unwrap(), expected);
            assert_eq!(cached_tagger().tag_context(&rows).unwrap(), expected);
        }

        #[test]
        fn test_cache_serves_repeated_patterns() {
            let tagger = cached_tagger();
            let first = entries(&[(1, "[(h6){h2}]")]);
            let second = entries(&[(2, "[(h6){h2}]")]);

            tagger.tag_context(&first).unwrap();
            tagger.tag_context(&second).unwrap();

            let stats = tagger.cache().unwrap().stats();
            assert_eq!(stats.misses, 1);
            assert_eq!(stats.hits, 1);
        }

        #[test]
        fn test_cache_shares_whitespace_variants() {
            let tagger = cached_tagger();
            let spaced = entries(&[(1, "[[(d12){d1}]  +  [(d13){d1}]]")]);
            let tight = entries(&[(2, "[[(d12){d1}] + [(d13){d1}]]")]);

            assert_eq!(tagger.tag_context(&spaced).unwrap(), "");
            assert_eq!(tagger.tag_context(&tight).unwrap(), "");
            assert_eq!(tagger.cache().unwrap().stats().hits, 1);
        }

        #[test]
        fn test_non_pattern_whitespace_is_not_served_from_cache() {
            let tagger = cached_tagger();
            let spaced = entries(&[(1, "[(h6) {h2}]")]);
            let form_feed = entries(&[(2, "[(h6)\u{000C}{h2}]")]);

            assert_eq!(
                tagger.tag_context(&spaced).unwrap(),
                "1970-9999; 06:00-08:00 off"
            );
            assert!(parse(&form_feed).is_err());
            assert!(tagger.tag_context(&form_feed).is_err());
        }

        #[test]
        fn test_invalid_pattern_not_cached() {
            let tagger = cached_tagger();
            let rows = entries(&[(1, "[(Z11){Q23}]")]);

            assert!(tagger.tag_context(&rows).is_err());
            assert!(tagger.tag_context(&rows).is_err());
            assert!(tagger.cache().unwrap().is_empty());
        }

        #[test]
        fn test_unsupported_pattern_is_cached() {
            let tagger = cached_tagger();
            let rows = entries(&[(1, "[(f12){d1}]")]);
            tagger.tag_context(&rows).unwrap();
            assert_eq!(tagger.cache().unwrap().get("[(f12){d1}]"), Some(None));
        }
    }

    mod tag_all {
        use super::*;

        #[test]
        fn test_groups_by_context() {
            let rows = entries(&[
                (2, "[(M3)(M5)]"),
                (1, "[(h6){h2}]"),
                (1, "[(h12)(h22)]"),
                (3, "[(z37){z87}]"),
            ]);
            let report = TimeDomainTagger::new().tag_all(&rows).unwrap();

            assert_eq!(report.len(), 2);
            assert_eq!(
                report.get(1),
                Some("1970-9999; 06:00-08:00 off, 12:00-22:00 off")
            );
            assert_eq!(report.get(2), Some("1970-9999; Mar-May off"));
            assert_eq!(report.get(3), None);
            assert_eq!(report.stats.entries, 4);
            assert_eq!(report.stats.contexts, 3);
            assert_eq!(report.stats.tagged, 2);
            assert_eq!(report.stats.untagged, 1);
            assert!(report.stats.cache.is_none());
        }

        #[test]
        fn test_fail_policy_aborts() {
            let rows = entries(&[(1, "[(h6){h2}]"), (2, "error")]);
            let err = TimeDomainTagger::new().tag_all(&rows).unwrap_err();
            assert!(matches!(err, TaggerError::Pattern(_)));
        }

        #[test]
        fn test_fail_policy_reports_lowest_context() {
            let rows = entries(&[(9, "[(Z11)(Q23)]"), (4, "[{h11}(h2)]")]);
            match TimeDomainTagger::new().tag_all(&rows) {
                Err(TaggerError::Pattern(timedomain::TimeDomainError::InvalidPattern {
                    context_id,
                    ..
                })) => assert_eq!(context_id, 4),
                other => panic!("Expected pattern error, got {:?}", other),
            }
        }

        #[test]
        fn test_skip_policy_continues() {
            let config = TaggerConfig::builder()
                .with_policy(InvalidPatternPolicy::Skip)
                .build();
            let tagger = TimeDomainTagger::with_config(config).unwrap();
            let rows = entries(&[(1, "[(h6){h2}]"), (2, "error"), (2, "[(M3)(M5)]")]);

            let report = tagger.tag_all(&rows).unwrap();
            assert_eq!(report.get(1), Some("1970-9999; 06:00-08:00 off"));
            assert_eq!(report.get(2), None);
            assert_eq!(report.skipped.len(), 1);
            assert_eq!(report.skipped[0].context_id, 2);
            assert_eq!(report.stats.skipped, 1);
        }

        #[test]
        fn test_empty_source() {
            let rows: Vec<PatternEntry> = Vec::new();
            let report = TimeDomainTagger::new().tag_all(&rows).unwrap();
            assert!(report.is_empty());
            assert_eq!(report.stats.contexts, 0);
        }

        #[test]
        fn test_report_carries_tag_key() {
            let config = TaggerConfig::builder()
                .with_tag_key("access:conditional")
                .build();
            let tagger = TimeDomainTagger::with_config(config).unwrap();
            let report = tagger.tag_all(&entries(&[(1, "[(h6){h2}]")])).unwrap();
            assert_eq!(report.tag_key, "access:conditional");
        }

        #[test]
        fn test_cache_stats_in_report() {
            let rows = entries(&[(1, "[(h6){h2}]"), (2, "[(h6){h2}]"), (3, "[(h6){h2}]")]);
            let report = cached_tagger().tag_all(&rows).unwrap();
            let cache = report.stats.cache.unwrap();
            assert_eq!(cache.misses, 1);
            assert_eq!(cache.hits, 2);
        }
    }
}
