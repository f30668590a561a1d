//! Error types for tokenizing and parsing.

use std::fmt;
use thiserror::Error;

/// A location in the source text. `line` and `column` are 1-based, `offset`
/// is a byte index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position of the first byte of any input.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} col {}", self.line, self.column)
    }
}

/// What went wrong, independent of where.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// An opening `{`, `[` or `(` was never closed, or was closed by the wrong
    /// delimiter.
    #[error("unbalanced delimiter")]
    UnbalancedDelimiter,

    /// A token that cannot appear at this point (missing separator, bad key,
    /// stray character).
    #[error("unexpected token")]
    UnexpectedToken,

    /// `new` not followed by an identifier, member chain, or parenthesized
    /// expression.
    #[error("missing constructor target")]
    MissingConstructorTarget,

    /// A string literal or block comment runs off the end of its line or
    /// the input.
    #[error("unterminated literal")]
    UnterminatedLiteral,

    /// Nesting went past `ParseOptions::max_depth`.
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
}

/// A syntax error with the position of the offending token.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {position}: {detail}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: Position,
    pub detail: String,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: Position, detail: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout jsexpr-core.
pub type Result<T> = std::result::Result<T, SyntaxError>;
