//! # jsexpr-core
//!
//! Parsing for the two corners of JavaScript expression syntax that literal
//! and construction fixtures exercise:
//!
//! - **literal values**: nested object/array literals with mixed primitives,
//!   parsed into a [`Value`] tree;
//! - **`new` chains**: stacked `new`, parenthesized constructors, argument
//!   binding and trailing member/call suffixes, resolved into a
//!   [`ConstructionNode`] tree that renders to the canonical
//!   `NEW(...)`/`CALL(...)`/`MEMBER(...)` annotation form.
//!
//! ## Quick start
//!
//! ```rust
//! use jsexpr_core::{parse_expression, parse_value, render, to_source};
//!
//! let expr = parse_expression("new new Foo(x)(x)").unwrap();
//! assert_eq!(render(&expr), "NEW(NEW(Foo, x), x)");
//!
//! let value = parse_value("{a: 1, a: 2, list: [true, undefined,]}").unwrap();
//! assert_eq!(to_source(&value), "{a: 2, list: [true, undefined]}");
//! ```
//!
//! ## Modules
//!
//! - [`lexer`]: source text → tokens
//! - [`literal`]: literal value parser (work-stack based)
//! - [`resolver`]: `new` chain and suffix resolution
//! - [`render`]: canonical annotation rendering
//! - [`serializer`]: value → literal source
//! - [`fixture`]: checks `expr // EXPECTED` annotated fixtures
//! - [`error`]: syntax error taxonomy

pub mod ast;
pub mod error;
pub mod fixture;
pub mod lexer;
pub mod literal;
pub mod options;
mod parser;
pub mod render;
pub mod resolver;
pub mod serializer;
pub mod token;
pub mod value;

pub use ast::{ConstructionNode, Expression};
pub use error::{Position, Result, SyntaxError, SyntaxErrorKind};
pub use fixture::{
    annotated_cases, check_case, check_fixture, AnnotatedCase, CaseOutcome, CheckReport,
};
pub use lexer::tokenize;
pub use literal::{parse_literal, parse_literal_with};
pub use options::ParseOptions;
pub use render::render;
pub use resolver::{resolve_new, resolve_new_with};
pub use serializer::{to_source, to_source_pretty};
pub use token::{Token, TokenKind};
pub use value::{Number, Value};

use parser::Parser;

/// Parse a complete source string as one literal value. One trailing `;` is
/// allowed.
pub fn parse_value(source: &str) -> Result<Value> {
    parse_value_with(source, &ParseOptions::default())
}

pub fn parse_value_with(source: &str, options: &ParseOptions) -> Result<Value> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens, 0, *options);
    let value = parser.parse_literal()?;
    parser.finish()?;
    Ok(value)
}

/// Parse a complete source string as one expression. One trailing `;` is
/// allowed.
pub fn parse_expression(source: &str) -> Result<Expression> {
    parse_expression_with(source, &ParseOptions::default())
}

pub fn parse_expression_with(source: &str, options: &ParseOptions) -> Result<Expression> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens, 0, *options);
    let expr = parser.parse_expression()?;
    parser.finish()?;
    tracing::debug!(
        news = expr.as_construction().map_or(0, ConstructionNode::new_count),
        "parsed expression"
    );
    Ok(expr)
}
