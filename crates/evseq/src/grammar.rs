//! Quantified sequence grammars.
//!
//! A grammar is an ordered list of terms, each an event kind with a
//! quantifier, followed by an implicit end-of-stream assertion. The text
//! notation writes kinds separated by whitespace with a regex-style suffix:
//!
//! ```text
//! Entered Moved+ Pressed Moved* Released Tapped Moved* Exited
//! ```
//!
//! `+` is one-or-more, `*` zero-or-more, `?` zero-or-one, no suffix exactly one.
//! Commas and `->` also separate terms.
//! An empty notation (or `End`) is the grammar of the empty sequence.

use crate::event::EventKind;
use crate::result::{EvseqError, EvseqResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many consecutive matching records a term consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    /// Exactly one
    Exactly,
    /// One or more (greedy)
    OneOrMore,
    /// Zero or one; never fails
    ZeroOrOne,
    /// Zero or more (greedy); never fails
    ZeroOrMore,
}

impl Quantifier {
    /// Suffix used in the text notation
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Exactly => "",
            Self::OneOrMore => "+",
            Self::ZeroOrOne => "?",
            Self::ZeroOrMore => "*",
        }
    }

    /// Whether a term with this quantifier can fail
    #[must_use]
    pub const fn can_fail(self) -> bool {
        matches!(self, Self::Exactly | Self::OneOrMore)
    }

    /// Whether a term with this quantifier may consume a variable count
    #[must_use]
    pub const fn is_variable(self) -> bool {
        !matches!(self, Self::Exactly)
    }
}

/// One grammar term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Expected event kind
    pub kind: EventKind,
    /// Quantifier
    pub quantifier: Quantifier,
}

impl Term {
    /// Create a term
    #[must_use]
    pub const fn new(kind: EventKind, quantifier: Quantifier) -> Self {
        Self { kind, quantifier }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.quantifier.suffix())
    }
}

impl FromStr for Term {
    type Err = EvseqError;

    fn from_str(s: &str) -> EvseqResult<Self> {
        let (name, quantifier) = match s.as_bytes().last() {
            Some(b'+') => (&s[..s.len() - 1], Quantifier::OneOrMore),
            Some(b'*') => (&s[..s.len() - 1], Quantifier::ZeroOrMore),
            Some(b'?') => (&s[..s.len() - 1], Quantifier::ZeroOrOne),
            _ => (s, Quantifier::Exactly),
        };
        Ok(Self::new(name.parse()?, quantifier))
    }
}

/// A quantified term that starves a later term of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ambiguity {
    /// Index of the greedy term
    pub greedy: usize,
    /// Index of the starved term
    pub starved: usize,
    /// Kind both terms match
    pub kind: EventKind,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "term {} ({}) consumes every {} that term {} expects",
            self.greedy, self.kind, self.kind, self.starved
        )
    }
}

/// An immutable, ordered list of quantified terms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Grammar {
    terms: Vec<Term>,
}

impl Grammar {
    /// Grammar of the empty sequence
    #[must_use]
    pub const fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    /// Create a grammar from terms
    #[must_use]
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Append a term
    #[must_use]
    pub fn then(mut self, kind: EventKind, quantifier: Quantifier) -> Self {
        self.terms.push(Term::new(kind, quantifier));
        self
    }

    /// Append an exactly-one term
    #[must_use]
    pub fn one(self, kind: EventKind) -> Self {
        self.then(kind, Quantifier::Exactly)
    }

    /// Append a one-or-more term
    #[must_use]
    pub fn some(self, kind: EventKind) -> Self {
        self.then(kind, Quantifier::OneOrMore)
    }

    /// Append a zero-or-one term
    #[must_use]
    pub fn maybe_one(self, kind: EventKind) -> Self {
        self.then(kind, Quantifier::ZeroOrOne)
    }

    /// Append a zero-or-more term
    #[must_use]
    pub fn maybe_some(self, kind: EventKind) -> Self {
        self.then(kind, Quantifier::ZeroOrMore)
    }

    /// Terms in evaluation order
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms, not counting the implicit end assertion
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether this grammar only accepts the empty sequence
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Fewest records an accepted sequence can contain
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.terms
            .iter()
            .filter(|term| term.quantifier.can_fail())
            .count()
    }

    /// Terms the greedy matcher can never satisfy as written.
    ///
    /// A variable-count term consumes every matching record before the next
    /// term runs, so a later term of the same kind reachable only through
    /// optional terms is starved.
    #[must_use]
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut found = Vec::new();
        for (greedy, term) in self.terms.iter().enumerate() {
            if !term.quantifier.is_variable() {
                continue;
            }
            for (offset, later) in self.terms[greedy + 1..].iter().enumerate() {
                if later.kind == term.kind {
                    // `Kind? Kind?` still accepts two records; `Kind? Kind` cannot accept one
                    if term.quantifier != Quantifier::ZeroOrOne || later.quantifier.can_fail() {
                        found.push(Ambiguity {
                            greedy,
                            starved: greedy + 1 + offset,
                            kind: term.kind,
                        });
                    }
                    break;
                }
                if later.quantifier.can_fail() {
                    break;
                }
            }
        }
        found
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("End");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = EvseqError;

    fn from_str(s: &str) -> EvseqResult<Self> {
        let mut terms = Vec::new();
        let normalized = s.replace("->", " ");
        let tokens: Vec<&str> = normalized
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect();
        for (position, token) in tokens.iter().enumerate() {
            if token.eq_ignore_ascii_case("end") {
                if position + 1 != tokens.len() {
                    return Err(EvseqError::grammar(position, "End must be the last term"));
                }
                break;
            }
            let term = token
                .parse::<Term>()
                .map_err(|err| EvseqError::grammar(position, err.to_string()))?;
            terms.push(term);
        }
        Ok(Self { terms })
    }
}

impl TryFrom<String> for Grammar {
    type Error = EvseqError;

    fn try_from(value: String) -> EvseqResult<Self> {
        value.parse()
    }
}

impl From<Grammar> for String {
    fn from(grammar: Grammar) -> Self {
        grammar.to_string()
    }
}
