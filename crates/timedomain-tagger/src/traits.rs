//! Traits for pattern sources.
//!
//! The tagger does not care where patterns come from: a road network
//! reader, a database cursor or a test fixture. Anything that can list its
//! [`PatternEntry`]s implements [`TimeDomainSource`].
//!
//! # Example
//!
//! ```rust
//! use timedomain::PatternEntry;
//! use timedomain_tagger::{TimeDomainSource, TimeDomainTagger};
//!
//! struct Extract {
//!     entries: Vec<PatternEntry>,
//! }
//!
//! impl Extract {
//!     fn from_rows(rows: &[(i64, &str)]) -> Self {
//!         let entries = rows
//!             .iter()
//!             .map(|(id, text)| PatternEntry::new(*id, *text))
//!             .collect();
//!         Self { entries }
//!     }
//! }
//!
//! impl TimeDomainSource for Extract {
//!     fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_> {
//!         Box::new(self.entries.iter())
//!     }
//! }
//!
//! let extract = Extract::from_rows(&[(1, "[(h6){h2}]"), (2, "[(z37){z87}]")]);
//! let report = TimeDomainTagger::new().tag_all(&extract).unwrap();
//! assert_eq!(report.get(1), Some("1970-9999; 06:00-08:00 off"));
//! assert_eq!(report.get(2), None);
//! ```

use std::collections::HashSet;

use timedomain::PatternEntry;

/// A collection of time domain patterns keyed by feature.
pub trait TimeDomainSource: Send + Sync {
    /// Iterates every entry, in any order, duplicates allowed.
    fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_>;

    /// Number of entries, if known without iterating.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

impl TimeDomainSource for [PatternEntry] {
    fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_> {
        Box::new(self.iter())
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl TimeDomainSource for Vec<PatternEntry> {
    fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_> {
        self.as_slice().entries()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl TimeDomainSource for HashSet<PatternEntry> {
    fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_> {
        Box::new(self.iter())
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Mock store keeping patterns per feature.
    struct MockStore {
        features: HashMap<i64, Vec<PatternEntry>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                features: HashMap::new(),
            }
        }

        fn add(&mut self, context_id: i64, pattern: &str) {
            self.features
                .entry(context_id)
                .or_default()
                .push(PatternEntry::new(context_id, pattern));
        }
    }

    impl TimeDomainSource for MockStore {
        fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_> {
            Box::new(self.features.values().flatten())
        }
    }

    #[test]
    fn test_mock_store_entries() {
        let mut store = MockStore::new();
        store.add(1, "[(h6){h2}]");
        store.add(1, "[(h12)(h22)]");
        store.add(2, "[(M3)(M5)]");

        assert_eq!(store.entries().count(), 3);
        assert_eq!(store.entries().filter(|e| e.context_id == 1).count(), 2);
        assert_eq!(store.size_hint(), None);
    }

    #[test]
    fn test_vec_and_slice_sources() {
        let entries = vec![
            PatternEntry::new(1, "[(h6){h2}]"),
            PatternEntry::new(2, "[(M3)(M5)]"),
        ];
        assert_eq!(entries.size_hint(), Some(2));
        assert_eq!(entries.as_slice().entries().count(), 2);
    }

    #[test]
    fn test_set_source() {
        let entries: HashSet<PatternEntry> = [
            PatternEntry::new(1, "[(h6){h2}]"),
            PatternEntry::new(1, "[(h6){h2}]"),
        ]
        .into_iter()
        .collect();
        assert_eq!(entries.size_hint(), Some(1));
    }
}
