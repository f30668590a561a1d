//! Literal value parser: object/array/primitive literals → [`Value`].
//!
//! Parsing runs on an explicit work stack instead of recursion, one frame per
//! open container, so nesting depth is bounded only by
//! [`ParseOptions::max_depth`] and never by the call stack.
//!
//! Policies:
//! - trailing commas are ignored, elisions (`[1,,2]`, `[,]`) produce
//!   `undefined` holes;
//! - duplicate object keys resolve last-write-wins;
//! - object keys may be identifiers, keywords, strings or numbers; numeric
//!   keys take their JavaScript string form (`0x10` → `"16"`, `1e21` →
//!   `"1e+21"`);
//! - a leading `+`/`-` on a numeric literal is folded into the number.

use crate::error::{Position, Result, SyntaxErrorKind};
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::token::{Token, TokenKind};
use crate::value::{insert_entry, Number, Value};

/// Parse one literal starting at token index `start`. Returns the value and
/// the index of the first token after it.
pub fn parse_literal(tokens: &[Token], start: usize) -> Result<(Value, usize)> {
    parse_literal_with(tokens, start, &ParseOptions::default())
}

pub fn parse_literal_with(
    tokens: &[Token],
    start: usize,
    options: &ParseOptions,
) -> Result<(Value, usize)> {
    let mut parser = Parser::new(tokens, start, *options);
    let value = parser.parse_literal()?;
    tracing::debug!(start, end = parser.cursor(), depth = value.depth(), "parsed literal");
    Ok((value, parser.cursor()))
}

enum Frame {
    Array(Vec<Value>),
    Object {
        entries: Vec<(String, Value)>,
        pending_key: Option<String>,
    },
}

impl Frame {
    fn accept(&mut self, value: Value) {
        match self {
            Frame::Array(items) => items.push(value),
            Frame::Object {
                entries,
                pending_key,
            } => {
                if let Some(key) = pending_key.take() {
                    insert_entry(entries, key, value);
                }
            }
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array(items) => Value::Array(items),
            Frame::Object { entries, .. } => Value::Object(entries),
        }
    }

    fn closer(&self) -> TokenKind {
        match self {
            Frame::Array(_) => TokenKind::RBracket,
            Frame::Object { .. } => TokenKind::RBrace,
        }
    }
}

/// What the work loop expects next.
enum Step {
    /// Any literal value.
    Value,
    /// An array element, a hole, or `]`.
    Element,
    /// An object key or `}`.
    Key,
    /// `,` or the closer of the innermost container.
    Separator,
}

impl<'t> Parser<'t> {
    pub fn parse_literal(&mut self) -> Result<Value> {
        let mut stack: Vec<(Frame, Position)> = Vec::new();
        let mut step = Step::Value;

        loop {
            let completed = match step {
                Step::Value => match self.peek_kind() {
                    TokenKind::LBracket | TokenKind::LBrace => {
                        let open = self.advance();
                        self.enter(open.position)?;
                        if open.kind == TokenKind::LBracket {
                            stack.push((Frame::Array(Vec::new()), open.position));
                            step = Step::Element;
                        } else {
                            stack.push((
                                Frame::Object {
                                    entries: Vec::new(),
                                    pending_key: None,
                                },
                                open.position,
                            ));
                            step = Step::Key;
                        }
                        continue;
                    }
                    _ => self.parse_primitive(stack.last().map(|(f, _)| f))?,
                },
                Step::Element => match self.peek_kind() {
                    TokenKind::Comma => {
                        self.advance();
                        if let Some((frame, _)) = stack.last_mut() {
                            frame.accept(Value::Undefined);
                        }
                        continue;
                    }
                    TokenKind::RBracket => {
                        self.advance();
                        self.close(&mut stack)
                    }
                    _ => {
                        step = Step::Value;
                        continue;
                    }
                },
                Step::Key => {
                    if self.eat(&TokenKind::RBrace) {
                        self.close(&mut stack)
                    } else {
                        let key = self.parse_key()?;
                        if !self.eat(&TokenKind::Colon) {
                            return Err(self.unexpected("':' after object key"));
                        }
                        if let Some((Frame::Object { pending_key, .. }, _)) = stack.last_mut() {
                            *pending_key = Some(key);
                        }
                        step = Step::Value;
                        continue;
                    }
                }
                Step::Separator => {
                    let Some((frame, open)) = stack.last() else {
                        unreachable!("separator step always has an open container");
                    };
                    let closer = frame.closer();
                    let open = *open;
                    if self.eat(&TokenKind::Comma) {
                        step = if closer == TokenKind::RBracket {
                            Step::Element
                        } else {
                            Step::Key
                        };
                        continue;
                    }
                    let found = self.peek_kind();
                    if *found == TokenKind::Eof || (found.is_closer() && *found != closer) {
                        return Err(self.error_here(
                            SyntaxErrorKind::UnbalancedDelimiter,
                            format!(
                                "expected ',' or {closer} to close the literal opened at {open}, found {found}"
                            ),
                        ));
                    }
                    if *found != closer {
                        return Err(self.unexpected(&format!("',' or {closer}")));
                    }
                    self.advance();
                    self.close(&mut stack)
                }
            };

            match stack.last_mut() {
                Some((frame, _)) => {
                    frame.accept(completed);
                    step = Step::Separator;
                }
                None => return Ok(completed),
            }
        }
    }

    fn close(&mut self, stack: &mut Vec<(Frame, Position)>) -> Value {
        self.leave();
        stack
            .pop()
            .map(|(frame, _)| frame.into_value())
            .unwrap_or(Value::Undefined)
    }

    /// A primitive literal token, with an optional sign on numbers. `enclosing`
    /// is the innermost open container, if any, used to classify closers.
    fn parse_primitive(&mut self, enclosing: Option<&Frame>) -> Result<Value> {
        let found = self.peek_kind();
        let value = match found {
            TokenKind::Number(n) => Value::Number(*n),
            TokenKind::String(s) => Value::String(s.clone()),
            TokenKind::True => Value::Boolean(true),
            TokenKind::False => Value::Boolean(false),
            TokenKind::Null => Value::Null,
            TokenKind::Undefined => Value::Undefined,
            TokenKind::Plus | TokenKind::Minus => {
                let negate = *found == TokenKind::Minus;
                self.advance();
                let TokenKind::Number(n) = *self.peek_kind() else {
                    return Err(self.unexpected("a number after the sign"));
                };
                self.advance();
                let n = if negate { n.negate() } else { n };
                return Ok(Value::Number(n));
            }
            TokenKind::Eof if enclosing.is_some() => {
                return Err(self.error_here(
                    SyntaxErrorKind::UnbalancedDelimiter,
                    "expected a literal value, found end of input",
                ));
            }
            closer if closer.is_closer() => {
                let kind = match enclosing {
                    Some(frame) if frame.closer() == *closer => SyntaxErrorKind::UnexpectedToken,
                    _ => SyntaxErrorKind::UnbalancedDelimiter,
                };
                return Err(self.error_here(
                    kind,
                    format!("expected a literal value, found {closer}"),
                ));
            }
            other => {
                return Err(self.error_here(
                    SyntaxErrorKind::UnexpectedToken,
                    format!("expected a literal value, found {other}"),
                ));
            }
        };
        self.advance();
        Ok(value)
    }

    fn parse_key(&mut self) -> Result<String> {
        let key = match self.peek_kind() {
            TokenKind::String(s) => s.clone(),
            TokenKind::Number(Number::Integer(n)) => n.to_string(),
            TokenKind::Number(Number::Float(f)) => float_key(*f),
            kind => match kind.name() {
                Some(name) => name.to_string(),
                None => return Err(self.unexpected("an object key")),
            },
        };
        self.advance();
        Ok(key)
    }
}

/// JavaScript `Number::toString` for a float: plain digits while the decimal
/// exponent is in `-7..21`, exponent form with an explicit sign otherwise.
fn float_key(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}` gives the shortest round-trip digits as `d.ddde±x`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let e = (n - 1).abs();
        match digits.split_at(1) {
            (first, "") => format!("{first}e{sign}{e}"),
            (first, rest) => format!("{first}.{rest}e{sign}{e}"),
        }
    };
    if f < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}
