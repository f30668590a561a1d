//! New-expression resolver: `new` chains and their suffixes → [`Expression`].
//!
//! The grammar is the member/call slice of JavaScript with no operators:
//!
//! ```text
//! expression    := new_expr suffix* | atom suffix* | literal
//! new_expr      := "new" ( new_expr | member_target ) arguments?
//! member_target := atom ( "." name | "[" expression "]" )*
//! atom          := identifier | "this" | "(" expression ")"
//! suffix        := "." name | "[" expression "]" | arguments
//! ```
//!
//! `member_target` never contains a call, so the first argument list after a
//! constructor belongs to the innermost pending `new`, and each enclosing `new`
//! takes the next one: `new new Foo(a)(b)` is `NEW(NEW(Foo, a), b)`. A
//! parenthesized `(new Foo)` is an atom, so arguments after it go to the outer
//! `new`. Whatever follows the chain is applied left to right as member
//! accesses and calls.
//!
//! A bare identifier followed by `.name` folds into one dotted identifier
//! (`MyNS.Widget`); member access on anything else stays a `MEMBER` node.
//!
//! Every finished node is checked against [`ParseOptions::max_depth`] along
//! with the depth it sits at, so a suffix chain costs one level per suffix.

use crate::ast::{ConstructionNode, Expression};
use crate::error::{Position, Result, SyntaxError, SyntaxErrorKind};
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::render::render;
use crate::token::{Token, TokenKind};

/// Parse one expression starting at token index `start`. Returns the
/// expression and the index of the first token after it.
pub fn resolve_new(tokens: &[Token], start: usize) -> Result<(Expression, usize)> {
    resolve_new_with(tokens, start, &ParseOptions::default())
}

pub fn resolve_new_with(
    tokens: &[Token],
    start: usize,
    options: &ParseOptions,
) -> Result<(Expression, usize)> {
    let mut parser = Parser::new(tokens, start, *options);
    let expr = parser.parse_expression()?;
    tracing::debug!(start, end = parser.cursor(), "resolved expression");
    Ok((expr, parser.cursor()))
}

impl<'t> Parser<'t> {
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let base = match self.peek_kind() {
            TokenKind::New => self.parse_new()?,
            TokenKind::Identifier(_) | TokenKind::This | TokenKind::LParen => {
                match self.parse_atom()? {
                    Expression::Construction(node) => node,
                    literal => return Ok(literal),
                }
            }
            kind if starts_literal(kind) => return Ok(Expression::Literal(self.parse_literal()?)),
            TokenKind::Eof if self.depth() > 0 => {
                return Err(self.error_here(
                    SyntaxErrorKind::UnbalancedDelimiter,
                    "expected an expression, found end of input",
                ));
            }
            other => {
                return Err(self.error_here(
                    SyntaxErrorKind::UnexpectedToken,
                    format!("expected an expression, found {other}"),
                ));
            }
        };
        Ok(Expression::Construction(self.parse_suffixes(base)?))
    }

    /// `new` followed by its constructor and, optionally, its argument list.
    fn parse_new(&mut self) -> Result<ConstructionNode> {
        let new_token = self.advance();
        self.enter(new_token.position)?;

        let target = match self.peek_kind() {
            TokenKind::New => self.parse_new()?,
            TokenKind::Identifier(_) | TokenKind::This | TokenKind::LParen => {
                self.parse_member_target()?
            }
            other => {
                return Err(self.error_here(
                    SyntaxErrorKind::MissingConstructorTarget,
                    format!("expected a constructor after 'new', found {other}"),
                ));
            }
        };

        let (args, has_parens) = if *self.peek_kind() == TokenKind::LParen {
            (self.parse_arguments()?, true)
        } else {
            (Vec::new(), false)
        };
        self.leave();

        tracing::trace!(
            ctor = %target,
            args = args.len(),
            has_parens,
            "bound argument list to new"
        );
        let target_height = target.height();
        let node = ConstructionNode::new_expr(target, args, has_parens);
        self.charge(&node, target_height, new_token.position)?;
        Ok(node)
    }

    /// A constructor expression: an atom plus `.name`/`[expr]` accesses, but
    /// no calls.
    fn parse_member_target(&mut self) -> Result<ConstructionNode> {
        let at = self.peek().position;
        let mut node = match self.parse_atom()? {
            Expression::Construction(node) => node,
            Expression::Literal(value) => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingConstructorTarget,
                    at,
                    format!("literal {value} is not a constructor"),
                ));
            }
        };
        let mut height = node.height();
        loop {
            let at = self.peek().position;
            node = match self.peek_kind() {
                TokenKind::Period => self.parse_dot(node)?,
                TokenKind::LBracket => self.parse_index(node)?,
                _ => return Ok(node),
            };
            height = self.charge(&node, height, at)?;
        }
    }

    /// Trailing `.name`, `[expr]` and `(args)` applied left to right.
    fn parse_suffixes(&mut self, mut node: ConstructionNode) -> Result<ConstructionNode> {
        let mut height = node.height();
        loop {
            let at = self.peek().position;
            node = match self.peek_kind() {
                TokenKind::Period => self.parse_dot(node)?,
                TokenKind::LBracket => self.parse_index(node)?,
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    tracing::trace!(callee = %node, args = args.len(), "applied call suffix");
                    ConstructionNode::call(node, args)
                }
                _ => return Ok(node),
            };
            height = self.charge(&node, height, at)?;
        }
    }

    /// Height of `node`, built on top of a node `inner` levels high, checked
    /// against the depth budget. A suffix chain grows one level per suffix.
    fn charge(&self, node: &ConstructionNode, inner: usize, at: Position) -> Result<usize> {
        let height = match node {
            ConstructionNode::Identifier { .. } => return Ok(inner),
            ConstructionNode::New { args, .. } | ConstructionNode::Call { args, .. } => {
                1 + args.iter().map(Expression::height).fold(inner, usize::max)
            }
            ConstructionNode::MemberAccess { .. } => 1 + inner,
        };
        self.check_height(height, at)?;
        Ok(height)
    }

    fn parse_atom(&mut self) -> Result<Expression> {
        let token = self.advance();
        match token.kind {
            TokenKind::Identifier(name) => Ok(ConstructionNode::identifier(name).into()),
            TokenKind::This => Ok(ConstructionNode::identifier("this").into()),
            TokenKind::LParen => {
                self.enter(token.position)?;
                let inner = self.parse_expression()?;
                self.expect_closer(&TokenKind::RParen, token.position)?;
                self.leave();
                Ok(inner)
            }
            other => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken,
                token.position,
                format!("expected an identifier or '(', found {other}"),
            )),
        }
    }

    fn parse_dot(&mut self, target: ConstructionNode) -> Result<ConstructionNode> {
        self.advance();
        let Some(name) = self.peek_kind().name().map(str::to_string) else {
            return Err(self.unexpected("a property name after '.'"));
        };
        self.advance();
        Ok(match target {
            ConstructionNode::Identifier { name: base } => {
                ConstructionNode::identifier(format!("{base}.{name}"))
            }
            other => ConstructionNode::member(other, name),
        })
    }

    fn parse_index(&mut self, target: ConstructionNode) -> Result<ConstructionNode> {
        let open = self.advance();
        self.enter(open.position)?;
        let index = self.parse_expression()?;
        self.expect_closer(&TokenKind::RBracket, open.position)?;
        self.leave();
        Ok(ConstructionNode::index(target, render(&index)))
    }

    /// `( expression, ... )` with an optional trailing comma.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        let open = self.advance();
        self.enter(open.position)?;
        let mut args = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.eat(&TokenKind::Comma) {
                    if self.eat(&TokenKind::RParen) {
                        break;
                    }
                    continue;
                }
                self.expect_closer(&TokenKind::RParen, open.position)?;
                break;
            }
        }
        self.leave();
        Ok(args)
    }
}

fn starts_literal(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::Number(_)
            | TokenKind::String(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::Undefined
            | TokenKind::Plus
            | TokenKind::Minus
    )
}
