//! Parse errors
//!
//! Everything the input can do wrong ends up as a [`ParseError`]. Errors carry a byte
//! offset into the source; [`ParseError::position`] turns it into a line and column for
//! display.
//!
//! Broken wiring between the grammar and the builder (a notification arriving out of
//! nesting order, a finished parse with no result) is not an input error. Those are
//! reported through [`invariant_violation`], which panics.

use std::fmt;

use crate::json::unescape::UnescapeError;

/// Errors that can occur while parsing a document
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input does not match the JSON grammar. `offset` is the furthest point the
    /// grammar reached; `found` is the character there, or `None` at end of input.
    GrammarMismatch { offset: usize, found: Option<char> },
    /// A number literal matched the grammar but has no finite 64-bit float value.
    NumberFormat { literal: String, offset: usize },
    /// An escape sequence inside a string literal could not be decoded.
    EscapeDecode {
        fragment: String,
        offset: usize,
        source: UnescapeError,
    },
    /// Arrays and objects are nested deeper than the configured limit.
    DepthLimitExceeded { limit: usize, offset: usize },
}

impl ParseError {
    /// Byte offset of the error in the parsed source.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::GrammarMismatch { offset, .. }
            | ParseError::NumberFormat { offset, .. }
            | ParseError::EscapeDecode { offset, .. }
            | ParseError::DepthLimitExceeded { offset, .. } => *offset,
        }
    }

    /// Line and column of the error in `source`, which must be the parsed text.
    pub fn position(&self, source: &str) -> Position {
        Position::from_offset(source, self.offset())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::GrammarMismatch {
                found: Some(c),
                offset,
            } => write!(f, "unexpected character {:?} at offset {}", c, offset),
            ParseError::GrammarMismatch {
                found: None,
                offset,
            } => write!(f, "unexpected end of input at offset {}", offset),
            ParseError::NumberFormat { literal, offset } => write!(
                f,
                "number {} at offset {} is out of range for a 64-bit float",
                literal, offset
            ),
            ParseError::EscapeDecode {
                fragment,
                offset,
                source,
            } => write!(
                f,
                "invalid escape {:?} at offset {}: {}",
                fragment, offset, source
            ),
            ParseError::DepthLimitExceeded { limit, offset } => write!(
                f,
                "nesting deeper than {} levels at offset {}",
                limit, offset
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::EscapeDecode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A 1-based line and column, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Locate a byte offset in `source`. Offsets past the end map to the end of input.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (index, c) in source.char_indices() {
            if index >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Abort on a builder invariant violation.
///
/// Continuing after one could hand the caller a silently corrupted tree.
#[track_caller]
pub(crate) fn invariant_violation(detail: impl fmt::Display) -> ! {
    panic!("builder invariant violated: {}", detail)
}
