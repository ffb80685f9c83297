//! Tab-separated pattern input.
//!
//! One entry per line, `context_id<TAB>pattern`. Blank lines and lines
//! starting with `#` are ignored.
//!
//! ```text
//! # context_id	time domain
//! 14420000000590	[(h6){h2}]
//! 14420000000590	[(h12)(h22)]
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use timedomain::{ContextId, PatternEntry};
use tracing::debug;

use crate::error::{TaggerError, TaggerResult};
use crate::traits::TimeDomainSource;

/// Entries read from tab-separated lines.
#[derive(Debug, Clone, Default)]
pub struct LineSource {
    entries: Vec<PatternEntry>,
}

impl LineSource {
    /// Reads every line of `reader`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use timedomain_tagger::{LineSource, TimeDomainSource};
    ///
    /// let input = "# features\n1\t[(h6){h2}]\n\n2\t[(M3)(M5)]\n";
    /// let source = LineSource::from_reader(input.as_bytes()).unwrap();
    /// assert_eq!(source.size_hint(), Some(2));
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> TaggerResult<Self> {
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(entry) = parse_line(index + 1, &line)? {
                entries.push(entry);
            }
        }
        debug!(entries = entries.len(), "read time domain entries");
        Ok(Self { entries })
    }

    /// Reads a file.
    pub fn from_path(path: impl AsRef<Path>) -> TaggerResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of entries read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry was read.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TimeDomainSource for LineSource {
    fn entries(&self) -> Box<dyn Iterator<Item = &PatternEntry> + '_> {
        Box::new(self.entries.iter())
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

fn parse_line(line_number: usize, line: &str) -> TaggerResult<Option<PatternEntry>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let invalid = |message: String| TaggerError::InvalidInput {
        line: line_number,
        message,
    };
    let (id, pattern) = trimmed
        .split_once('\t')
        .ok_or_else(|| invalid("missing tab separator".to_string()))?;
    let context_id: ContextId = id
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid context id '{}'", id.trim())))?;

    Ok(Some(PatternEntry::new(context_id, pattern.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> TaggerResult<LineSource> {
        LineSource::from_reader(input.as_bytes())
    }

    #[test]
    fn test_reads_entries() {
        let source = read("1\t[(h6){h2}]\n2\t[(M3)(M5)]\n").unwrap();
        let entries: Vec<&PatternEntry> = source.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(*entries[0], PatternEntry::new(1, "[(h6){h2}]"));
        assert_eq!(*entries[1], PatternEntry::new(2, "[(M3)(M5)]"));
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let source = read("# header\n\n   \n1\t[(h6){h2}]\n").unwrap();
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_pattern_text_is_trimmed() {
        let source = read("7\t  [(h6){h2}]  \r\n").unwrap();
        let entry = source.entries().next().unwrap();
        assert_eq!(entry.raw_text, "[(h6){h2}]");
    }

    #[test]
    fn test_pattern_keeps_inner_spaces() {
        let source = read("7\t[[(d12){d1}] + [(d13){d1}]]\n").unwrap();
        let entry = source.entries().next().unwrap();
        assert_eq!(entry.raw_text, "[[(d12){d1}] + [(d13){d1}]]");
    }

    #[test]
    fn test_missing_separator() {
        match read("1\t[(h6){h2}]\n2 [(M3)(M5)]\n") {
            Err(TaggerError::InvalidInput { line, message }) => {
                assert_eq!(line, 2);
                assert_eq!(message, "missing tab separator");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_context_id() {
        match read("abc\t[(h6){h2}]\n") {
            Err(TaggerError::InvalidInput { line, message }) => {
                assert_eq!(line, 1);
                assert_eq!(message, "invalid context id 'abc'");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_pattern_is_read_verbatim() {
        let source = read("1\terror\n").unwrap();
        assert_eq!(source.entries().next().unwrap().raw_text, "error");
    }

    #[test]
    fn test_missing_file() {
        let result = LineSource::from_path("/nonexistent/timedomain/input.tsv");
        assert!(matches!(result, Err(TaggerError::Io(_))));
    }
}
