//! Letter code classification.

/// Semantic dimension carried by a code letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CodeClass {
    /// `h`: hour of day.
    Hour,
    /// `m`: minute of hour.
    Minute,
    /// `M`: month of year.
    Month,
    /// `t`: day of week, `1 = Sunday`.
    Weekday,
    /// `z`, `f`, `l`, `d`: valid in the format but never translated.
    RecognizedUnsupported,
    /// Anything else.
    Unknown,
}

impl CodeClass {
    /// Whether the code is part of the format at all.
    pub fn is_known(self) -> bool {
        !matches!(self, CodeClass::Unknown)
    }

    /// Whether the code can be rendered.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            CodeClass::Hour | CodeClass::Minute | CodeClass::Month | CodeClass::Weekday
        )
    }
}

impl std::fmt::Display for CodeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CodeClass::Hour => "hour",
            CodeClass::Minute => "minute",
            CodeClass::Month => "month",
            CodeClass::Weekday => "weekday",
            CodeClass::RecognizedUnsupported => "unsupported",
            CodeClass::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Maps a code letter to its dimension. Case-sensitive: `m` is a minute, `M` a month.
///
/// # Examples
///
/// ```rust
/// use timedomain::{classify, CodeClass};
///
/// assert_eq!(classify('h'), CodeClass::Hour);
/// assert_eq!(classify('M'), CodeClass::Month);
/// assert_eq!(classify('z'), CodeClass::RecognizedUnsupported);
/// assert_eq!(classify('Q'), CodeClass::Unknown);
/// ```
pub fn classify(code: char) -> CodeClass {
    match code {
        'h' => CodeClass::Hour,
        'm' => CodeClass::Minute,
        'M' => CodeClass::Month,
        't' => CodeClass::Weekday,
        'z' | 'f' | 'l' | 'd' => CodeClass::RecognizedUnsupported,
        _ => CodeClass::Unknown,
    }
}
