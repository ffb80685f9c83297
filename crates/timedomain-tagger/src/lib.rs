//! # timedomain-tagger
//!
//! Batch tagging of road network features with `opening_hours` style
//! restrictions.
//!
//! Builds on the [`timedomain`] translator: entries from any
//! [`TimeDomainSource`] are grouped by feature, each feature's patterns are
//! translated into one restriction string, and the non-empty results are
//! reported per feature under a configurable tag key.
//!
//! ## Quick Start
//!
//! ```rust
//! use timedomain::PatternEntry;
//! use timedomain_tagger::TimeDomainTagger;
//!
//! let entries = vec![
//!     PatternEntry::new(14420000000590, "[(h6){h2}]"),
//!     PatternEntry::new(14420000000591, "[[(t2t3t4t5t6h7){h3}]*[(M11){M5}]]"),
//! ];
//!
//! let report = TimeDomainTagger::new().tag_all(&entries).unwrap();
//! assert_eq!(
//!     report.get(14420000000591),
//!     Some("1970-9999; Nov-Apr Mo,Tu,We,Th,Fr 07:00-10:00 off")
//! );
//! ```
//!
//! ## With Configuration
//!
//! ```rust
//! use timedomain_tagger::{CacheConfig, InvalidPatternPolicy, TaggerConfig, TimeDomainTagger};
//!
//! let config = TaggerConfig::builder()
//!     .with_policy(InvalidPatternPolicy::Skip)
//!     .with_cache(CacheConfig { max_entries: 1_000 })
//!     .with_parallel(true)
//!     .build();
//!
//! let tagger = TimeDomainTagger::with_config(config).unwrap();
//! assert!(tagger.cache().is_some());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Tags features on the rayon thread pool
//! - `serde` - Enables `serde` support on the core data types
//!
//! ## Command Line
//!
//! The `timedomain-tag` binary reads `context_id<TAB>pattern` lines and
//! writes `context_id<TAB>tag value` lines in context id order.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod config;
mod error;
mod result;
mod source;
mod tagger;
mod traits;

// Public re-exports
pub use cache::{normalize_cache_key, CacheStats, FragmentCache};
pub use config::{
    CacheConfig, InvalidPatternPolicy, TaggerConfig, TaggerConfigBuilder, DEFAULT_TAG_KEY,
};
pub use error::{TaggerError, TaggerResult};
pub use result::{SkippedContext, TagReport, TaggingStats};
pub use source::LineSource;
pub use tagger::TimeDomainTagger;
pub use traits::TimeDomainSource;
