//! Time domain parser implementation using nom.
//!
//! Grammar, with `ws` standing for optional whitespace:
//!
//! ```text
//! pattern   := ws bracketed stray ws
//! bracketed := '[' ws body ws ']'
//! body      := chain | simple
//! chain     := bracketed (ws operator ws bracketed)*
//! simple    := group (ws group)?
//! group     := '(' token+ ')' | '{' token+ '}'
//! token     := letter digit+
//! operator  := '*' | '+' | '-'
//! stray     := (')' | ']' | whitespace)*
//! ```
//!
//! Stray closing brackets after the pattern occur in real data and are ignored.

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{all_consuming, cut, map, opt, value},
    error::{ErrorKind, FromExternalError, ParseError},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::ast::{CodedValue, CompoundOperator, Group, GroupKind, SimplePattern, TimeDomain};
use crate::error::SyntaxError;

/// nom error that keeps a group tokenization failure intact through `alt`/`cut`.
#[derive(Debug)]
struct PatternParseError<'a> {
    input: &'a str,
    syntax: Option<SyntaxError>,
}

impl<'a> ParseError<&'a str> for PatternParseError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self {
            input,
            syntax: None,
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> FromExternalError<&'a str, SyntaxError> for PatternParseError<'a> {
    fn from_external_error(input: &'a str, _kind: ErrorKind, e: SyntaxError) -> Self {
        Self {
            input,
            syntax: Some(e),
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, PatternParseError<'a>>;

/// Parse a complete time domain pattern into its syntax tree.
///
/// Only the grammar is checked here; unknown letters and group order are
/// judged by [`resolve`](crate::resolve).
///
/// # Examples
///
/// ```rust
/// use timedomain::{parse_pattern, TimeDomain};
///
/// let simple = parse_pattern("[(h6){h2}]").unwrap();
/// assert!(matches!(simple, TimeDomain::Simple(_)));
///
/// let compound = parse_pattern("[[(t2h7){h3}]*[(M11){M5}]]").unwrap();
/// assert!(matches!(compound, TimeDomain::Compound { .. }));
///
/// assert!(parse_pattern("error").is_err());
/// ```
pub fn parse_pattern(input: &str) -> Result<TimeDomain, SyntaxError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SyntaxError::MalformedStructure {
            position: 0,
            message: "empty pattern".to_string(),
        });
    }

    match all_consuming(terminated(bracketed, stray_closers))(input) {
        Ok((_, pattern)) => Ok(pattern),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(into_syntax_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(SyntaxError::MalformedStructure {
            position: input.len(),
            message: "incomplete pattern".to_string(),
        }),
    }
}

/// Parse the content between one bracket pair into a [`Group`].
///
/// `content` excludes the brackets themselves. Positions in the returned
/// error are relative to `content`.
///
/// ```rust
/// use timedomain::{parse_group, GroupKind};
///
/// let group = parse_group("t2t6h7", GroupKind::Start).unwrap();
/// assert_eq!(group.values.len(), 3);
/// assert!(parse_group("h 7", GroupKind::Start).is_err());
/// ```
pub fn parse_group(content: &str, kind: GroupKind) -> Result<Group, SyntaxError> {
    if content.is_empty() {
        return Err(SyntaxError::MalformedToken {
            position: 0,
            found: String::new(),
        });
    }

    match all_consuming(many1(coded_value))(content) {
        Ok((_, values)) => Ok(Group::new(kind, values)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(SyntaxError::MalformedToken {
            position: content.len() - e.input.len(),
            found: truncate(e.input, 20).to_string(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(SyntaxError::MalformedToken {
            position: content.len(),
            found: String::new(),
        }),
    }
}

fn into_syntax_error(input: &str, e: PatternParseError<'_>) -> SyntaxError {
    let position = input.len() - e.input.len();
    match e.syntax {
        Some(syntax) => syntax.shifted(position),
        None if e.input.is_empty() => SyntaxError::MalformedStructure {
            position,
            message: "unexpected end of pattern".to_string(),
        },
        None => SyntaxError::MalformedStructure {
            position,
            message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
        },
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Brackets and compounds
// ============================================================================

fn bracketed(input: &str) -> PResult<'_, TimeDomain> {
    let (input, _) = char('[')(input)?;
    let (input, _) = ws(input)?;
    let (input, body) = cut(pattern_body)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = cut(char(']'))(input)?;
    Ok((input, body))
}

fn pattern_body(input: &str) -> PResult<'_, TimeDomain> {
    alt((chain, map(simple_pattern, TimeDomain::Simple)))(input)
}

fn chain(input: &str) -> PResult<'_, TimeDomain> {
    let (input, first) = bracketed(input)?;
    let (input, rest) = many0(pair(
        delimited(ws, compound_operator, ws),
        cut(bracketed),
    ))(input)?;

    // `[[...]]` is the same pattern as `[...]`
    if rest.is_empty() {
        return Ok((input, first));
    }

    let mut members = Vec::with_capacity(rest.len() + 1);
    let mut operators = Vec::with_capacity(rest.len());
    members.push(first);
    for (op, member) in rest {
        operators.push(op);
        members.push(member);
    }

    Ok((input, TimeDomain::Compound { members, operators }))
}

fn compound_operator(input: &str) -> PResult<'_, CompoundOperator> {
    alt((
        value(CompoundOperator::Conjunction, char('*')),
        value(CompoundOperator::Union, char('+')),
        value(CompoundOperator::Subtraction, char('-')),
    ))(input)
}

// ============================================================================
// Groups and tokens
// ============================================================================

fn simple_pattern(input: &str) -> PResult<'_, SimplePattern> {
    let (input, start) = group(input)?;
    let (input, span) = opt(preceded(ws, group))(input)?;
    Ok((input, SimplePattern::new(start, span)))
}

fn group(input: &str) -> PResult<'_, Group> {
    alt((start_group, span_group))(input)
}

fn start_group(input: &str) -> PResult<'_, Group> {
    bracket_group(input, GroupKind::Start)
}

fn span_group(input: &str) -> PResult<'_, Group> {
    bracket_group(input, GroupKind::Span)
}

fn bracket_group(input: &str, kind: GroupKind) -> PResult<'_, Group> {
    let (open, close) = kind.delimiters();
    let (content_start, _) = char(open)(input)?;
    let (rest, content) =
        cut(terminated(take_till(|c: char| c == close), char(close)))(content_start)?;
    let group = parse_group(content, kind).map_err(|e| {
        nom::Err::Failure(PatternParseError::from_external_error(
            content_start,
            ErrorKind::MapRes,
            e,
        ))
    })?;
    Ok((rest, group))
}

fn coded_value(input: &str) -> PResult<'_, CodedValue> {
    let (rest, code) = satisfy(|c| c.is_ascii_alphabetic())(input)?;
    let (rest, digits) = digit1(rest)?;
    match digits.parse::<u32>() {
        Ok(value) => Ok((rest, CodedValue::new(code, value))),
        Err(_) => Err(nom::Err::Error(PatternParseError::from_error_kind(
            input,
            ErrorKind::Digit,
        ))),
    }
}

// ============================================================================
// Whitespace handling
// ============================================================================

fn ws(input: &str) -> PResult<'_, &str> {
    multispace0(input)
}

fn stray_closers(input: &str) -> PResult<'_, &str> {
    take_while(|c: char| c == ')' || c == ']' || c.is_whitespace())(input)
}

// ============================================================================
// Tests
// ============================================================================
