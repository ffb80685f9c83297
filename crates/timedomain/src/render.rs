//! Rendering of resolved restrictions as opening_hours fragments.
//!
//! A fragment lists the present components in fixed order, month range,
//! weekday list, hour range, followed by [`OFF_SUFFIX`]:
//!
//! ```text
//! Nov-Apr Mo,Tu,We,Th,Fr 07:00-10:00 off
//! ```

use crate::resolve::{Month, MonthRange, Resolution, Restriction, TimeOfDay, TimeRange, Weekday};

/// Rule modifier appended to every fragment.
pub const OFF_SUFFIX: &str = " off";

/// Render a resolution as a fragment.
///
/// Returns `None` for unsupported patterns and for restrictions with no
/// component at all.
///
/// # Examples
///
/// ```rust
/// use timedomain::{parse_pattern, render, resolve};
///
/// let resolution = resolve(&parse_pattern("[(M10){M5}]").unwrap()).unwrap();
/// assert_eq!(render(&resolution).as_deref(), Some("Oct-Mar off"));
///
/// let resolution = resolve(&parse_pattern("[(z37){z87}]").unwrap()).unwrap();
/// assert_eq!(render(&resolution), None);
/// ```
pub fn render(resolution: &Resolution) -> Option<String> {
    match resolution {
        Resolution::Restriction(restriction) if !restriction.is_empty() => {
            Some(format!("{}{}", restriction, OFF_SUFFIX))
        }
        _ => None,
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::fmt::Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Components only, without [`OFF_SUFFIX`].
impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(months) = self.months {
            parts.push(months.to_string());
        }
        if !self.weekdays.is_empty() {
            let days: Vec<&str> = self.weekdays.iter().map(|d| d.abbreviation()).collect();
            parts.push(days.join(","));
        }
        if let Some(hours) = self.hours {
            parts.push(hours.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}
