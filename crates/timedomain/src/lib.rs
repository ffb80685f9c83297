//! # timedomain
//!
//! A Rust library translating GDF-style *time domain* patterns, as found in
//! commercial road network data, into restriction strings in the
//! OpenStreetMap `opening_hours` notation.
//!
//! ```text
//! [(h6){h2}]                            →  06:00-08:00 off
//! [(M3)(M5)]                            →  Mar-May off
//! [[(t2t3t4t5t6h7){h3}]*[(M11){M5}]]    →  Nov-Apr Mo,Tu,We,Th,Fr 07:00-10:00 off
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use timedomain::{parse, PatternEntry};
//!
//! let entries = vec![
//!     PatternEntry::new(14420000000590, "[(h6){h2}]"),
//!     PatternEntry::new(14420000000590, "[(h12)(h22)]"),
//! ];
//!
//! let tag = parse(&entries).unwrap();
//! assert_eq!(tag, "1970-9999; 06:00-08:00 off, 12:00-22:00 off");
//! ```
//!
//! ## Pattern Syntax Quick Reference
//!
//! | Code | Meaning | Example |
//! |------|---------|---------|
//! | `h` | Hour of day | `(h6)` |
//! | `m` | Minute | `(h14m15)` |
//! | `M` | Month, `1 = January` | `(M3)` |
//! | `t` | Weekday, `1 = Sunday` | `(t2t3)` |
//! | `z` `f` `l` `d` | Recognized, not translated | `(z37)` |
//! | `(..)(..)` | Interval: start and end | `[(h12)(h22)]` |
//! | `(..){..}` | Duration: start and length | `[(h22){h8}]` |
//! | `[..]*[..]` | Both apply (months × days/hours) | `[[(h7){h3}]*[(M11){M5}]]` |
//! | `[..]+[..]` | Either applies (not translated) | `[[(d12){d1}]+[(d13){d1}]]` |
//!
//! ## Errors
//!
//! Malformed text, unknown letters, a duration before its start, and values
//! outside their domain fail with [`TimeDomainError::InvalidPattern`].
//! Recognized but untranslatable constructs never fail: they contribute
//! nothing, and a feature whose patterns all degrade gets an empty string.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod aggregate;
mod ast;
mod code;
mod error;
mod parser;
mod render;
mod resolve;

pub use aggregate::{
    join_fragments, ordered_entries, parse, render_entry, render_pattern, PatternEntry,
    FRAGMENT_SEPARATOR, VALIDITY_PREFIX,
};
pub use ast::{CodedValue, CompoundOperator, Group, GroupKind, SimplePattern, TimeDomain};
pub use code::{classify, CodeClass};
pub use error::{PatternError, ResolveError, SyntaxError, TimeDomainError, TimeDomainResult};
pub use parser::{parse_group, parse_pattern};
pub use render::{render, OFF_SUFFIX};
pub use resolve::{
    resolve, resolve_compound, resolve_simple, Month, MonthRange, Resolution, Restriction,
    TimeOfDay, TimeRange, UnsupportedReason, Weekday, MINUTES_PER_DAY,
};

/// Identifier of the feature a pattern belongs to.
pub type ContextId = i64;
