//! Configuration types for the tagger.

/// Tag key used when none is configured.
pub const DEFAULT_TAG_KEY: &str = "opening_hours";

/// What to do with a feature whose patterns include an invalid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidPatternPolicy {
    /// Abort the whole run with the first error.
    #[default]
    Fail,
    /// Leave the feature untagged, record it and continue.
    Skip,
}

/// Configuration for the tagger.
///
/// # Example
///
/// ```rust
/// use timedomain_tagger::{CacheConfig, InvalidPatternPolicy, TaggerConfig};
///
/// let config = TaggerConfig::builder()
///     .with_tag_key("conditional_access")
///     .with_policy(InvalidPatternPolicy::Skip)
///     .with_cache(CacheConfig::default())
///     .with_parallel(true)
///     .build();
///
/// assert_eq!(config.tag_key, "conditional_access");
/// ```
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// Key under which restrictions are reported.
    pub tag_key: String,
    /// Handling of invalid patterns.
    pub policy: InvalidPatternPolicy,
    /// Fragment cache configuration (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Tag features on the rayon pool (requires `parallel` feature).
    pub parallel: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            policy: InvalidPatternPolicy::default(),
            cache: None,
            parallel: false,
        }
    }
}

impl TaggerConfig {
    /// Creates a new builder for TaggerConfig.
    pub fn builder() -> TaggerConfigBuilder {
        TaggerConfigBuilder::default()
    }
}

/// Builder for TaggerConfig.
#[derive(Debug, Clone, Default)]
pub struct TaggerConfigBuilder {
    tag_key: Option<String>,
    policy: InvalidPatternPolicy,
    cache: Option<CacheConfig>,
    parallel: bool,
}

impl TaggerConfigBuilder {
    /// Sets the tag key.
    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = Some(tag_key.into());
        self
    }

    /// Sets the invalid pattern policy.
    pub fn with_policy(mut self, policy: InvalidPatternPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables fragment caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Enables or disables parallel tagging.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the TaggerConfig.
    pub fn build(self) -> TaggerConfig {
        TaggerConfig {
            tag_key: self
                .tag_key
                .unwrap_or_else(|| DEFAULT_TAG_KEY.to_string()),
            policy: self.policy,
            cache: self.cache,
            parallel: self.parallel,
        }
    }
}

/// Configuration for the fragment cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached pattern texts.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagger_config_default() {
        let config = TaggerConfig::default();
        assert_eq!(config.tag_key, "opening_hours");
        assert_eq!(config.policy, InvalidPatternPolicy::Fail);
        assert!(config.cache.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_tagger_config_builder() {
        let config = TaggerConfig::builder()
            .with_tag_key("conditional_access")
            .with_policy(InvalidPatternPolicy::Skip)
            .with_cache(CacheConfig { max_entries: 64 })
            .with_parallel(true)
            .build();

        assert_eq!(config.tag_key, "conditional_access");
        assert_eq!(config.policy, InvalidPatternPolicy::Skip);
        assert_eq!(config.cache, Some(CacheConfig { max_entries: 64 }));
        assert!(config.parallel);
    }

    #[test]
    fn test_builder_without_tag_key_uses_default() {
        let config = TaggerConfig::builder().with_parallel(true).build();
        assert_eq!(config.tag_key, DEFAULT_TAG_KEY);
        assert!(config.parallel);
        assert!(config.cache.is_none());
    }

    #[test]
    fn test_cache_config_default() {
        assert_eq!(CacheConfig::default().max_entries, 10_000);
    }
}
