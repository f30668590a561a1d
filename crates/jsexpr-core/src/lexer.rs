//! Source text → token stream.
//!
//! The lexer knows just enough of the JavaScript lexical grammar for literal
//! values and `new` chains: identifiers and the handful of keywords the
//! parsers care about, decimal/hex/octal/binary numbers, single- and
//! double-quoted strings with escape processing, the punctuators `()[]{},:;.+-`
//! and both comment forms. Anything else is rejected with the position of the
//! offending character.

use crate::error::{Position, Result, SyntaxError, SyntaxErrorKind};
use crate::token::{Token, TokenKind};
use crate::value::Number;

/// Tokenize a complete source string. The returned stream always ends with a
/// single [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let tokens = Lexer::new(source).tokenize()?;
    tracing::debug!(bytes = source.len(), tokens = tokens.len(), "tokenized");
    Ok(tokens)
}

pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia()?;
        let start = self.position();
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, start));
        };

        let kind = match ch {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '.' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number(start)?
            }
            '.' => self.single(TokenKind::Period),
            '"' | '\'' => {
                self.bump();
                self.scan_string(ch, start)?
            }
            c if c.is_ascii_digit() => self.scan_number(start)?,
            c if is_ident_start(c) => self.scan_word(),
            other => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedToken,
                    start,
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        Ok(Token::new(kind, start))
    }

    fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    /// Skip whitespace, line comments and block comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match (self.peek(), self.peek_nth(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.position();
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(SyntaxError::new(
                                    SyntaxErrorKind::UnterminatedLiteral,
                                    start,
                                    "unterminated block comment",
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn scan_word(&mut self) -> TokenKind {
        let begin = self.offset;
        while self.peek().is_some_and(is_ident_part) {
            self.bump();
        }
        let word = &self.source[begin..self.offset];
        TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Identifier(word.to_string()))
    }

    fn scan_number(&mut self, start: Position) -> Result<TokenKind> {
        let begin = self.offset;

        let radix = match (self.peek(), self.peek_nth(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let number = if let Some(radix) = radix {
            self.bump();
            self.bump();
            let digits_begin = self.offset;
            while self.peek().is_some_and(|c| c.is_digit(radix)) {
                self.bump();
            }
            let digits = &self.source[digits_begin..self.offset];
            if digits.is_empty() {
                return Err(malformed_number(start, &self.source[begin..self.offset]));
            }
            radix_number(digits, radix)
        } else {
            let mut is_float = false;
            self.eat_digits();
            if self.peek() == Some('.') {
                is_float = true;
                self.bump();
                self.eat_digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                is_float = true;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(malformed_number(start, &self.source[begin..self.offset]));
                }
                self.eat_digits();
            }
            let text = &self.source[begin..self.offset];
            decimal_number(text, is_float).ok_or_else(|| malformed_number(start, text))?
        };

        // `3in`, `0x1g` and friends are a single malformed token, not two.
        if self.peek().is_some_and(is_ident_part) {
            while self.peek().is_some_and(is_ident_part) {
                self.bump();
            }
            return Err(malformed_number(start, &self.source[begin..self.offset]));
        }

        Ok(TokenKind::Number(number))
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    /// Scan the remainder of a string literal. The opening quote has already
    /// been consumed; `start` points at it.
    fn scan_string(&mut self, quote: char, start: Position) -> Result<TokenKind> {
        let mut out = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedLiteral,
                        start,
                        "unterminated string literal",
                    ));
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(TokenKind::String(out));
                }
                Some('\\') => {
                    self.bump();
                    self.scan_escape(&mut out, start)?;
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    fn scan_escape(&mut self, out: &mut String, start: Position) -> Result<()> {
        let escape_at = self.position();
        let Some(ch) = self.bump() else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnterminatedLiteral,
                start,
                "unterminated string literal",
            ));
        };
        match ch {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation.
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            'x' => {
                let code = self.hex_digits(2, escape_at)?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => {
                let code = self.unicode_escape(escape_at)?;
                out.push(self.combine_surrogates(code, escape_at)?);
            }
            other => out.push(other),
        }
        Ok(())
    }

    /// Read the body of a `\u` escape: either `{H...}` or exactly four hex digits.
    fn unicode_escape(&mut self, escape_at: Position) -> Result<u32> {
        if self.peek() != Some('{') {
            return self.hex_digits(4, escape_at);
        }
        self.bump();
        let mut code: u32 = 0;
        let mut digits = 0;
        while let Some(c) = self.peek() {
            if c == '}' {
                break;
            }
            let digit = c.to_digit(16).ok_or_else(|| invalid_escape(escape_at))?;
            code = code
                .checked_mul(16)
                .and_then(|v| v.checked_add(digit))
                .filter(|v| *v <= 0x10FFFF)
                .ok_or_else(|| invalid_escape(escape_at))?;
            digits += 1;
            self.bump();
        }
        if digits == 0 || self.bump() != Some('}') {
            return Err(invalid_escape(escape_at));
        }
        Ok(code)
    }

    /// Turn a UTF-16 high surrogate followed by a `\uDC00`-range escape into a
    /// single scalar value. Lone surrogates become U+FFFD.
    fn combine_surrogates(&mut self, high: u32, escape_at: Position) -> Result<char> {
        if !(0xD800..0xDC00).contains(&high) {
            return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        if self.peek() == Some('\\') && self.peek_nth(1) == Some('u') {
            let saved = (self.offset, self.line, self.column);
            self.bump();
            self.bump();
            let low = self.unicode_escape(escape_at)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            (self.offset, self.line, self.column) = saved;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn hex_digits(&mut self, count: usize, escape_at: Position) -> Result<u32> {
        let mut code = 0;
        for _ in 0..count {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| invalid_escape(escape_at))?;
            self.bump();
            code = code * 16 + digit;
        }
        Ok(code)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn decimal_number(text: &str, is_float: bool) -> Option<Number> {
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Integer(n));
        }
    }
    text.parse::<f64>().ok().map(Number::Float)
}

fn radix_number(digits: &str, radix: u32) -> Number {
    match i64::from_str_radix(digits, radix) {
        Ok(n) => Number::Integer(n),
        Err(_) => Number::Float(digits.chars().fold(0.0, |acc, c| {
            acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
        })),
    }
}

fn malformed_number(at: Position, text: &str) -> SyntaxError {
    SyntaxError::new(
        SyntaxErrorKind::UnexpectedToken,
        at,
        format!("malformed number literal '{text}'"),
    )
}

fn invalid_escape(at: Position) -> SyntaxError {
    SyntaxError::new(
        SyntaxErrorKind::UnexpectedToken,
        at,
        "invalid escape sequence in string literal",
    )
}
