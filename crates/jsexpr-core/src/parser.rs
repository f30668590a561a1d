//! Token cursor shared by the literal parser and the `new` resolver.
//!
//! Grammar productions live next to the trees they build: literal values in
//! [`crate::literal`], expressions and `new` chains in [`crate::resolver`].
//! Both are `impl Parser` blocks over this cursor so they can call into each
//! other and share one nesting budget.

use crate::error::{Position, Result, SyntaxError, SyntaxErrorKind};
use crate::options::ParseOptions;
use crate::token::{Token, TokenKind};

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    options: ParseOptions,
    /// Returned by `peek` once the slice is exhausted, so a stream without a
    /// trailing `Eof` still terminates cleanly.
    eof: Token,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], start: usize, options: ParseOptions) -> Self {
        let end = tokens
            .last()
            .map(|t| t.position)
            .unwrap_or_else(Position::start);
        Self {
            tokens,
            pos: start.min(tokens.len()),
            depth: 0,
            options,
            eof: Token::new(TokenKind::Eof, end),
        }
    }

    /// Index of the next unconsumed token.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() && token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it equals `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn error_here(
        &self,
        kind: SyntaxErrorKind,
        detail: impl Into<String>,
    ) -> SyntaxError {
        SyntaxError::new(kind, self.peek().position, detail)
    }

    /// Error for a token that does not fit. End of input means an open
    /// delimiter was never closed; anything else is simply unexpected.
    pub(crate) fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = &self.peek().kind;
        let kind = if *found == TokenKind::Eof {
            SyntaxErrorKind::UnbalancedDelimiter
        } else {
            SyntaxErrorKind::UnexpectedToken
        };
        self.error_here(kind, format!("expected {expected}, found {found}"))
    }

    /// Consume the closing delimiter of a group opened at `open`. End of
    /// input and a different closer are both unbalanced.
    pub(crate) fn expect_closer(&mut self, closer: &TokenKind, open: Position) -> Result<()> {
        if self.eat(closer) {
            return Ok(());
        }
        let found = &self.peek().kind;
        if *found == TokenKind::Eof || found.is_closer() {
            return Err(self.error_here(
                SyntaxErrorKind::UnbalancedDelimiter,
                format!("expected {closer} to close the group opened at {open}, found {found}"),
            ));
        }
        Err(self.unexpected(&closer.to_string()))
    }

    /// Descend one nesting level, failing once `max_depth` is passed.
    pub(crate) fn enter(&mut self, at: Position) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(self.too_deep(at));
        }
        self.depth += 1;
        Ok(())
    }

    /// Fail if a finished node of `height` levels, placed at the current
    /// depth, would nest past `max_depth`.
    pub(crate) fn check_height(&self, height: usize, at: Position) -> Result<()> {
        if self.depth + height > self.options.max_depth {
            return Err(self.too_deep(at));
        }
        Ok(())
    }

    fn too_deep(&self, at: Position) -> SyntaxError {
        SyntaxError::new(
            SyntaxErrorKind::DepthLimitExceeded,
            at,
            format!("nesting deeper than {} levels", self.options.max_depth),
        )
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Accept one optional `;`, then require end of input.
    pub fn finish(&mut self) -> Result<()> {
        self.eat(&TokenKind::Semicolon);
        let found = &self.peek().kind;
        match found {
            TokenKind::Eof => Ok(()),
            closer if closer.is_closer() => Err(self.error_here(
                SyntaxErrorKind::UnbalancedDelimiter,
                format!("unmatched {closer}"),
            )),
            other => Err(self.error_here(
                SyntaxErrorKind::UnexpectedToken,
                format!("expected end of input, found {other}"),
            )),
        }
    }
}
