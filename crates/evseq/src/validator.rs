//! Single-pass, greedy, non-backtracking sequence validation.
//!
//! The validator walks a buffer once with a forward-only cursor. Each
//! quantified term consumes as many matching records as it can before the next
//! term runs, and that consumption is never undone. Grammars must be written so
//! this is unambiguous (see [`Grammar::ambiguities`]).

use crate::buffer::SequenceBuffer;
use crate::event::{EventKind, EventRecord};
use crate::grammar::{Grammar, Quantifier, Term};
use std::fmt;

/// Cursor over a finalized sequence of records
#[derive(Debug, Clone)]
pub struct SequenceValidator<'a> {
    records: &'a [EventRecord],
    index: usize,
}

impl<'a> SequenceValidator<'a> {
    /// Create a validator positioned at the first record
    #[must_use]
    pub const fn new(records: &'a [EventRecord]) -> Self {
        Self { records, index: 0 }
    }

    /// Current cursor position
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.index
    }

    /// Kind of the record under the cursor
    #[must_use]
    pub fn peek(&self) -> Option<EventKind> {
        self.records.get(self.index).map(|record| record.kind)
    }

    /// `[1..1]`: consume one record of `kind`. The cursor does not move on failure.
    pub fn exactly(&mut self, kind: EventKind) -> bool {
        if self.peek() == Some(kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// `[1..*]`: consume a maximal run of at least one record of `kind`
    pub fn one_or_more(&mut self, kind: EventKind) -> bool {
        self.exactly(kind) && self.zero_or_more(kind)
    }

    /// `[0..1]`: consume one record of `kind` if present. Always succeeds.
    pub fn zero_or_one(&mut self, kind: EventKind) -> bool {
        if self.peek() == Some(kind) {
            self.index += 1;
        }
        true
    }

    /// `[0..*]`: consume a maximal run of records of `kind`. Always succeeds.
    pub fn zero_or_more(&mut self, kind: EventKind) -> bool {
        while self.peek() == Some(kind) {
            self.index += 1;
        }
        true
    }

    /// Succeeds iff every record has been consumed
    #[must_use]
    pub const fn end(&self) -> bool {
        self.index >= self.records.len()
    }

    /// Apply one term
    pub fn term(&mut self, term: Term) -> bool {
        let matched = match term.quantifier {
            Quantifier::Exactly => self.exactly(term.kind),
            Quantifier::OneOrMore => self.one_or_more(term.kind),
            Quantifier::ZeroOrOne => self.zero_or_one(term.kind),
            Quantifier::ZeroOrMore => self.zero_or_more(term.kind),
        };
        tracing::trace!(term = %term, matched, cursor = self.index, "grammar term");
        matched
    }
}

/// Where a grammar stopped matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// A term failed
    Term {
        /// Index of the failing term
        index: usize,
        /// The failing term
        expected: Term,
        /// Kind found under the cursor, `None` if the buffer was exhausted
        found: Option<EventKind>,
    },
    /// All terms matched but records remained
    TrailingRecords {
        /// Kind of the first unconsumed record
        found: EventKind,
    },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term {
                index,
                expected,
                found: Some(found),
            } => write!(f, "term {index} expected {expected}, found {found}"),
            Self::Term {
                index,
                expected,
                found: None,
            } => write!(f, "term {index} expected {expected}, found end of sequence"),
            Self::TrailingRecords { found } => {
                write!(f, "expected end of sequence, found {found}")
            }
        }
    }
}

/// Outcome of checking a sequence against a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether the sequence satisfied the grammar
    pub passed: bool,
    /// Cursor position when evaluation stopped
    pub cursor: usize,
    /// Number of records in the sequence
    pub len: usize,
    /// Why the grammar failed
    pub failure: Option<Failure>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "matched {} records", self.len),
            Some(failure) => write!(f, "{failure} (at record {} of {})", self.cursor, self.len),
        }
    }
}

/// Check records against a grammar, reporting where matching stopped
#[must_use]
pub fn check_records(records: &[EventRecord], grammar: &Grammar) -> ValidationReport {
    let mut validator = SequenceValidator::new(records);
    let mut failure = None;
    for (index, term) in grammar.terms().iter().enumerate() {
        let found = validator.peek();
        if !validator.term(*term) {
            failure = Some(Failure::Term {
                index,
                expected: *term,
                found,
            });
            break;
        }
    }
    if failure.is_none() && !validator.end() {
        if let Some(found) = validator.peek() {
            failure = Some(Failure::TrailingRecords { found });
        }
    }
    ValidationReport {
        passed: failure.is_none(),
        cursor: validator.cursor(),
        len: records.len(),
        failure,
    }
}

/// Check a buffer against a grammar, reporting where matching stopped
#[must_use]
pub fn check(buffer: &SequenceBuffer, grammar: &Grammar) -> ValidationReport {
    let report = check_records(&buffer.records(), grammar);
    match &report.failure {
        None => tracing::debug!(buffer = buffer.name(), grammar = %grammar, "sequence matched"),
        Some(failure) => {
            tracing::debug!(buffer = buffer.name(), grammar = %grammar, %failure, "sequence rejected");
        }
    }
    report
}

/// Whether a buffer satisfies a grammar
#[must_use]
pub fn validate(buffer: &SequenceBuffer, grammar: &Grammar) -> bool {
    check(buffer, grammar).passed
}
