//! Dimension resolution and compound assembly.
//!
//! Turns a [`TimeDomain`] syntax tree into a [`Resolution`]: either a
//! [`Restriction`] ready for rendering or an [`UnsupportedReason`] explaining
//! why the pattern is valid but not translatable.
//!
//! Hard errors ([`ResolveError`]) are reserved for input that cannot be
//! meaningful: unknown letters, a duration group before its start, values
//! outside their domain, and ranges missing an endpoint.

use crate::ast::{CompoundOperator, Group, GroupKind, TimeDomain};
use crate::code::CodeClass;
use crate::error::ResolveError;

/// Minutes in one day; hour durations wrap at this boundary.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// =============================================================================
// Dimension values
// =============================================================================

/// Month of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Month {
    /// January
    Jan,
    /// February
    Feb,
    /// March
    Mar,
    /// April
    Apr,
    /// May
    May,
    /// June
    Jun,
    /// July
    Jul,
    /// August
    Aug,
    /// September
    Sep,
    /// October
    Oct,
    /// November
    Nov,
    /// December
    Dec,
}

impl Month {
    const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Month from its number, `1 = January`.
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Month number, `1 = January`.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// The month `months` later, wrapping over the year end.
    pub fn plus(self, months: u32) -> Self {
        let index = (self as u32 + months % 12) % 12;
        Self::ALL[index as usize]
    }

    /// Three-letter English abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    /// Sunday (`t1`)
    Su,
    /// Monday (`t2`)
    Mo,
    /// Tuesday (`t3`)
    Tu,
    /// Wednesday (`t4`)
    We,
    /// Thursday (`t5`)
    Th,
    /// Friday (`t6`)
    Fr,
    /// Saturday (`t7`)
    Sa,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Su,
        Weekday::Mo,
        Weekday::Tu,
        Weekday::We,
        Weekday::Th,
        Weekday::Fr,
        Weekday::Sa,
    ];

    /// Weekday from its number, `1 = Sunday`.
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Two-letter abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Weekday::Su => "Su",
            Weekday::Mo => "Mo",
            Weekday::Tu => "Tu",
            Weekday::We => "We",
            Weekday::Th => "Th",
            Weekday::Fr => "Fr",
            Weekday::Sa => "Sa",
        }
    }
}

/// Time of day in minutes since midnight, `0..=1440` (`1440` is `24:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    minutes: u32,
}

impl TimeOfDay {
    /// Creates a time of day, rejecting values past `24:00`.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute > 0) {
            return None;
        }
        Some(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Midnight at the start of the day.
    pub fn midnight() -> Self {
        Self { minutes: 0 }
    }

    /// Hour component.
    pub fn hour(self) -> u32 {
        self.minutes / 60
    }

    /// Minute component.
    pub fn minute(self) -> u32 {
        self.minutes % 60
    }

    /// The time `hours:minutes` later, wrapping at midnight.
    pub fn plus(self, hours: u32, minutes: u32) -> Self {
        let offset = (u64::from(hours) * 60 + u64::from(minutes)) % u64::from(MINUTES_PER_DAY);
        // offset < MINUTES_PER_DAY, so the cast is lossless
        let total = (self.minutes % MINUTES_PER_DAY + offset as u32) % MINUTES_PER_DAY;
        Self { minutes: total }
    }
}

// =============================================================================
// Resolved restriction
// =============================================================================

/// Inclusive month range; `end` may precede `start` across the year end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthRange {
    /// First month.
    pub start: Month,
    /// Last month.
    pub end: Month,
}

/// Daily time range; `end` may precede `start` across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRange {
    /// Start time.
    pub start: TimeOfDay,
    /// End time.
    pub end: TimeOfDay,
}

/// A translatable restriction. Absent components are unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restriction {
    /// Months the restriction applies to.
    pub months: Option<MonthRange>,
    /// Weekdays the restriction applies to, in source order.
    pub weekdays: Vec<Weekday>,
    /// Hours of the day the restriction applies to.
    pub hours: Option<TimeRange>,
}

impl Restriction {
    /// Whether no component is present.
    pub fn is_empty(&self) -> bool {
        self.months.is_none() && self.weekdays.is_empty() && self.hours.is_none()
    }

    fn is_month_only(&self) -> bool {
        self.months.is_some() && self.weekdays.is_empty() && self.hours.is_none()
    }
}

/// Why a well-formed pattern is not translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnsupportedReason {
    /// A recognized code that has no translation (`z`, `f`, `l`, `d`).
    Code(char),
    /// A compound operator other than `*`.
    Operator(CompoundOperator),
    /// A compound with other than two members.
    Arity(usize),
    /// A compound member that is itself a compound.
    NestedCompound,
    /// Weekday codes inside the end or duration group.
    WeekdaySpan,
    /// Compound members that do not split into months × weekdays/hours.
    IncompatibleMembers,
}

impl std::fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsupportedReason::Code(code) => write!(f, "untranslated code '{}'", code),
            UnsupportedReason::Operator(op) => write!(f, "compound operator '{}'", op),
            UnsupportedReason::Arity(n) => write!(f, "compound of {} members", n),
            UnsupportedReason::NestedCompound => write!(f, "nested compound"),
            UnsupportedReason::WeekdaySpan => write!(f, "weekday in end or duration group"),
            UnsupportedReason::IncompatibleMembers => write!(f, "incompatible compound members"),
        }
    }
}

/// Outcome of resolving one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// Renderable restriction.
    Restriction(Restriction),
    /// Valid but not translated.
    Unsupported(UnsupportedReason),
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve a parsed pattern.
///
/// # Examples
///
/// ```rust
/// use timedomain::{parse_pattern, resolve, Resolution};
///
/// let pattern = parse_pattern("[(h22){h8}]").unwrap();
/// match resolve(&pattern).unwrap() {
///     Resolution::Restriction(r) => {
///         let hours = r.hours.unwrap();
///         assert_eq!((hours.start.hour(), hours.end.hour()), (22, 6));
///     }
///     Resolution::Unsupported(reason) => panic!("unsupported: {reason}"),
/// }
/// ```
pub fn resolve(pattern: &TimeDomain) -> Result<Resolution, ResolveError> {
    match pattern {
        TimeDomain::Simple(simple) => resolve_simple(&simple.start, simple.span.as_ref()),
        TimeDomain::Compound { members, operators } => resolve_compound(members, operators),
    }
}

/// Resolve a start group and its optional end (`(...)`) or duration (`{...}`) group.
pub fn resolve_simple(start: &Group, span: Option<&Group>) -> Result<Resolution, ResolveError> {
    check_groups(start, span)?;

    let unsupported = std::iter::once(start)
        .chain(span)
        .flat_map(|g| g.values.iter())
        .find(|v| v.class() == CodeClass::RecognizedUnsupported);
    if let Some(value) = unsupported {
        return Ok(Resolution::Unsupported(UnsupportedReason::Code(value.code)));
    }

    if span.is_some_and(|s| s.has(CodeClass::Weekday)) {
        return Ok(Resolution::Unsupported(UnsupportedReason::WeekdaySpan));
    }

    let weekdays = start
        .all(CodeClass::Weekday)
        .map(|v| {
            Weekday::from_number(v.value).ok_or(ResolveError::OutOfRange {
                code: v.code,
                value: v.value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Resolution::Restriction(Restriction {
        months: resolve_months(start, span)?,
        weekdays,
        hours: resolve_hours(start, span)?,
    }))
}

/// Resolve bracketed members joined by operators.
///
/// Only `[A]*[B]` where one member is month-only translates; every other
/// shape is [`Resolution::Unsupported`]. Every simple pattern in the tree is
/// resolved first, so a member that fails on its own fails the compound
/// whatever the shape, operators or member order.
pub fn resolve_compound(
    members: &[TimeDomain],
    operators: &[CompoundOperator],
) -> Result<Resolution, ResolveError> {
    let resolved = members
        .iter()
        .flat_map(|m| m.simple_patterns())
        .map(|simple| resolve_simple(&simple.start, simple.span.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(op) = operators
        .iter()
        .find(|op| **op != CompoundOperator::Conjunction)
    {
        return Ok(Resolution::Unsupported(UnsupportedReason::Operator(*op)));
    }

    if members.len() != 2 {
        return Ok(Resolution::Unsupported(UnsupportedReason::Arity(
            members.len(),
        )));
    }

    // two members and two simple patterns means neither member nests
    let Ok([first, second]) = <[Resolution; 2]>::try_from(resolved) else {
        return Ok(Resolution::Unsupported(UnsupportedReason::NestedCompound));
    };

    match (first, second) {
        (Resolution::Restriction(a), Resolution::Restriction(b)) => Ok(merge(a, b)),
        (Resolution::Unsupported(reason), _) | (_, Resolution::Unsupported(reason)) => {
            Ok(Resolution::Unsupported(reason))
        }
    }
}

fn merge(a: Restriction, b: Restriction) -> Resolution {
    let (calendar, daily) = match (a.months.is_some(), b.months.is_some()) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => return Resolution::Unsupported(UnsupportedReason::IncompatibleMembers),
    };
    if !calendar.is_month_only() {
        return Resolution::Unsupported(UnsupportedReason::IncompatibleMembers);
    }

    Resolution::Restriction(Restriction {
        months: calendar.months,
        weekdays: daily.weekdays,
        hours: daily.hours,
    })
}

/// Group order first, then the alphabet.
fn check_groups(start: &Group, span: Option<&Group>) -> Result<(), ResolveError> {
    if start.kind == GroupKind::Span {
        return Err(ResolveError::WrongGroupOrder);
    }

    let unknown = std::iter::once(start)
        .chain(span)
        .flat_map(|g| g.values.iter())
        .find(|v| !v.class().is_known());
    match unknown {
        Some(value) => Err(ResolveError::UnknownCode { code: value.code }),
        None => Ok(()),
    }
}

fn resolve_months(start: &Group, span: Option<&Group>) -> Result<Option<MonthRange>, ResolveError> {
    let from = start.first(CodeClass::Month);
    let to = span.and_then(|s| s.first(CodeClass::Month).map(|v| (s.kind, v)));

    let (from, (kind, to)) = match (from, to) {
        (None, None) => return Ok(None),
        (Some(_), None) => {
            return Err(ResolveError::MissingEnd {
                dimension: CodeClass::Month,
            })
        }
        (None, Some(_)) => {
            return Err(ResolveError::MissingStart {
                dimension: CodeClass::Month,
            })
        }
        (Some(from), Some(to)) => (from, to),
    };

    let start_month = month(from)?;
    let end_month = match kind {
        GroupKind::Start => month(to)?,
        GroupKind::Span => start_month.plus(to),
    };

    Ok(Some(MonthRange {
        start: start_month,
        end: end_month,
    }))
}

fn resolve_hours(start: &Group, span: Option<&Group>) -> Result<Option<TimeRange>, ResolveError> {
    let from_hour = start.first(CodeClass::Hour);
    let from_minute = start.first(CodeClass::Minute);
    let has_start = from_hour.is_some() || from_minute.is_some();

    let Some(span) = span.filter(|s| s.has(CodeClass::Hour) || s.has(CodeClass::Minute)) else {
        return if has_start {
            Err(ResolveError::MissingEnd {
                dimension: CodeClass::Hour,
            })
        } else {
            Ok(None)
        };
    };

    // weekday-only starts begin at midnight
    let from = time_of_day(from_hour.unwrap_or(0), from_minute.unwrap_or(0), 23)?;
    let to_hour = span.first(CodeClass::Hour).unwrap_or(0);
    let to_minute = span.first(CodeClass::Minute).unwrap_or(0);
    let to = match span.kind {
        GroupKind::Start => time_of_day(to_hour, to_minute, 24)?,
        GroupKind::Span => from.plus(to_hour, to_minute),
    };

    Ok(Some(TimeRange {
        start: from,
        end: to,
    }))
}

fn month(value: u32) -> Result<Month, ResolveError> {
    Month::from_number(value).ok_or(ResolveError::OutOfRange { code: 'M', value })
}

fn time_of_day(hour: u32, minute: u32, max_hour: u32) -> Result<TimeOfDay, ResolveError> {
    if hour > max_hour {
        return Err(ResolveError::OutOfRange {
            code: 'h',
            value: hour,
        });
    }
    TimeOfDay::new(hour, minute).ok_or(ResolveError::OutOfRange {
        code: 'm',
        value: minute,
    })
}
