//! Token definitions shared by the lexer and both parsers.

use crate::error::Position;
use crate::value::Number;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    /// String literal contents with escapes already processed.
    String(String),
    Number(Number),

    New,
    This,
    True,
    False,
    Null,
    Undefined,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Period,
    Plus,
    Minus,

    Eof,
}

impl TokenKind {
    /// Map a scanned word to its keyword kind, or `None` for plain identifiers.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "new" => Some(TokenKind::New),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "null" => Some(TokenKind::Null),
            "undefined" => Some(TokenKind::Undefined),
            _ => None,
        }
    }

    /// The text of an identifier or keyword. Keywords are valid property
    /// names after `.` and as object keys.
    pub fn name(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(name) => Some(name),
            TokenKind::New => Some("new"),
            TokenKind::This => Some("this"),
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            TokenKind::Undefined => Some("undefined"),
            _ => None,
        }
    }

    pub fn is_closer(&self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier '{name}'"),
            TokenKind::String(_) => f.write_str("string literal"),
            TokenKind::Number(n) => write!(f, "number '{n}'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::Period => f.write_str("'.'"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Eof => f.write_str("end of input"),
            keyword => write!(f, "'{}'", keyword.name().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}
