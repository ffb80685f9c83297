//! Syntax tree for time domain patterns.
//!
//! Every type prints back to canonical pattern text, so
//! `parse_pattern(&tree.to_string())` yields the same tree.

use crate::code::{classify, CodeClass};

/// One letter-prefixed number, e.g. `h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodedValue {
    /// Code letter.
    pub code: char,
    /// Numeric value following the letter.
    pub value: u32,
}

impl CodedValue {
    /// Creates a coded value.
    pub fn new(code: char, value: u32) -> Self {
        Self { code, value }
    }

    /// Dimension of the code letter.
    pub fn class(&self) -> CodeClass {
        classify(self.code)
    }
}

impl std::fmt::Display for CodedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.code, self.value)
    }
}

/// Bracket shape of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupKind {
    /// `( ... )`: an absolute point (start, or end in interval form).
    Start,
    /// `{ ... }`: a duration added to the start.
    Span,
}

impl GroupKind {
    /// Opening and closing bracket characters.
    pub fn delimiters(self) -> (char, char) {
        match self {
            GroupKind::Start => ('(', ')'),
            GroupKind::Span => ('{', '}'),
        }
    }
}

/// A non-empty, ordered run of coded values inside one bracket pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    /// Bracket shape.
    pub kind: GroupKind,
    /// Values in source order.
    pub values: Vec<CodedValue>,
}

impl Group {
    /// Creates a group.
    pub fn new(kind: GroupKind, values: Vec<CodedValue>) -> Self {
        Self { kind, values }
    }

    /// First value of the given dimension, if any.
    pub fn first(&self, class: CodeClass) -> Option<u32> {
        self.values
            .iter()
            .find(|v| v.class() == class)
            .map(|v| v.value)
    }

    /// All values of the given dimension, in source order.
    pub fn all(&self, class: CodeClass) -> impl Iterator<Item = &CodedValue> + '_ {
        self.values.iter().filter(move |v| v.class() == class)
    }

    /// Whether any value belongs to the given dimension.
    pub fn has(&self, class: CodeClass) -> bool {
        self.values.iter().any(|v| v.class() == class)
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (open, close) = self.kind.delimiters();
        write!(f, "{open}")?;
        for value in &self.values {
            write!(f, "{value}")?;
        }
        write!(f, "{close}")
    }
}

/// One or two groups: a start plus an optional end (interval) or duration (span).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplePattern {
    /// First group as written. Must be a [`GroupKind::Start`] group to resolve.
    pub start: Group,
    /// Second group, if present.
    pub span: Option<Group>,
}

impl SimplePattern {
    /// Creates a simple pattern.
    pub fn new(start: Group, span: Option<Group>) -> Self {
        Self { start, span }
    }

    /// Iterates over both groups.
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        std::iter::once(&self.start).chain(self.span.as_ref())
    }
}

impl std::fmt::Display for SimplePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)?;
        if let Some(ref span) = self.span {
            write!(f, "{}", span)?;
        }
        Ok(())
    }
}

/// Operator joining bracketed members of a compound pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompoundOperator {
    /// `*`: both members apply at once.
    Conjunction,
    /// `+`: either member applies.
    Union,
    /// `-`: the first member minus the second.
    Subtraction,
}

impl CompoundOperator {
    /// The operator character.
    pub fn symbol(self) -> char {
        match self {
            CompoundOperator::Conjunction => '*',
            CompoundOperator::Union => '+',
            CompoundOperator::Subtraction => '-',
        }
    }
}

impl std::fmt::Display for CompoundOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A complete time domain pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeDomain {
    /// `[ group group? ]`
    Simple(SimplePattern),
    /// `[ [..] op [..] op ... ]`; `operators.len() == members.len() - 1`.
    Compound {
        /// Bracketed members, at least two.
        members: Vec<TimeDomain>,
        /// Operators between consecutive members.
        operators: Vec<CompoundOperator>,
    },
}

impl TimeDomain {
    /// Collects every simple pattern in the tree, depth first.
    pub fn simple_patterns(&self) -> Vec<&SimplePattern> {
        let mut out = Vec::new();
        self.collect_simple(&mut out);
        out
    }

    fn collect_simple<'a>(&'a self, out: &mut Vec<&'a SimplePattern>) {
        match self {
            TimeDomain::Simple(simple) => out.push(simple),
            TimeDomain::Compound { members, .. } => {
                for member in members {
                    member.collect_simple(out);
                }
            }
        }
    }
}

impl std::fmt::Display for TimeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeDomain::Simple(simple) => write!(f, "[{}]", simple),
            TimeDomain::Compound { members, operators } => {
                write!(f, "[")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        if let Some(op) = operators.get(i - 1) {
                            write!(f, "{}", op)?;
                        }
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, "]")
            }
        }
    }
}
