//! Aggregation of the patterns that belong to one feature.

use tracing::debug;

use crate::error::{PatternError, TimeDomainError, TimeDomainResult};
use crate::parser::parse_pattern;
use crate::render::render;
use crate::resolve::{resolve, Resolution};
use crate::ContextId;

/// Prefix of every non-empty result: the patterns carry no year range.
pub const VALIDITY_PREFIX: &str = "1970-9999; ";

/// Separator between fragments.
pub const FRAGMENT_SEPARATOR: &str = ", ";

/// One raw pattern and the feature it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternEntry {
    /// Feature identifier shared by all patterns of one feature.
    pub context_id: ContextId,
    /// Pattern text as supplied, e.g. `[(h6){h2}]`.
    pub raw_text: String,
}

impl PatternEntry {
    /// Creates an entry.
    pub fn new(context_id: ContextId, raw_text: impl Into<String>) -> Self {
        Self {
            context_id,
            raw_text: raw_text.into(),
        }
    }
}

/// Translate every pattern of one feature into a single restriction string.
///
/// Identical entries count once. Patterns that are valid but not translatable
/// are dropped; if none remain the result is empty and the caller should not
/// emit a tag. The first invalid pattern, in raw text order, fails the call.
/// Fragments are joined in order of their rendered text, not of the pattern text.
///
/// # Examples
///
/// ```rust
/// use timedomain::{parse, PatternEntry};
///
/// let entries = vec![
///     PatternEntry::new(144, "[(h12)(h22)]"),
///     PatternEntry::new(144, "[(h6){h2}]"),
/// ];
/// assert_eq!(
///     parse(&entries).unwrap(),
///     "1970-9999; 06:00-08:00 off, 12:00-22:00 off"
/// );
///
/// let unsupported = vec![PatternEntry::new(144, "[(z37){z87}]")];
/// assert_eq!(parse(&unsupported).unwrap(), "");
///
/// let invalid = vec![PatternEntry::new(144, "error")];
/// assert!(parse(&invalid).is_err());
/// ```
pub fn parse<'a, I>(entries: I) -> TimeDomainResult<String>
where
    I: IntoIterator<Item = &'a PatternEntry>,
{
    let fragments = ordered_entries(entries)
        .into_iter()
        .map(render_entry)
        .collect::<TimeDomainResult<Vec<_>>>()?;
    Ok(join_fragments(fragments))
}

/// Render one entry, attaching its context to any failure.
pub fn render_entry(entry: &PatternEntry) -> TimeDomainResult<Option<String>> {
    render_pattern(&entry.raw_text).map_err(|reason| TimeDomainError::InvalidPattern {
        context_id: entry.context_id,
        pattern: entry.raw_text.clone(),
        reason,
    })
}

/// Parse, resolve and render one pattern text.
///
/// `Ok(None)` means the pattern is valid but contributes nothing.
pub fn render_pattern(text: &str) -> Result<Option<String>, PatternError> {
    let pattern = parse_pattern(text)?;
    let resolution = resolve(&pattern)?;
    if let Resolution::Unsupported(reason) = &resolution {
        debug!(pattern = text, %reason, "time domain not translated");
    }
    Ok(render(&resolution))
}

/// Join rendered fragments into the final restriction string.
///
/// `None` fragments are skipped and the rest are ordered by their text, so the
/// result does not depend on the order the fragments arrive in.
pub fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut fragments: Vec<String> = fragments.into_iter().flatten().collect();
    if fragments.is_empty() {
        return String::new();
    }
    fragments.sort_unstable();
    format!("{}{}", VALIDITY_PREFIX, fragments.join(FRAGMENT_SEPARATOR))
}

/// Distinct entries ordered by raw text, then context id.
pub fn ordered_entries<'a, I>(entries: I) -> Vec<&'a PatternEntry>
where
    I: IntoIterator<Item = &'a PatternEntry>,
{
    let mut entries: Vec<&PatternEntry> = entries.into_iter().collect();
    entries.sort_by(|a, b| {
        a.raw_text
            .cmp(&b.raw_text)
            .then(a.context_id.cmp(&b.context_id))
    });
    entries.dedup();
    entries
}
