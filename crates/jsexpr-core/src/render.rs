//! Canonical annotation form: `NEW(target[, arg...])`, `CALL(target[, arg...])`,
//! `MEMBER(target, name)` and `MEMBER(target, [index])`, composed
//! recursively. Literal arguments render as compact literal source.

use crate::ast::{ConstructionNode, Expression};
use std::fmt;

pub fn render(expr: &Expression) -> String {
    expr.to_string()
}

impl fmt::Display for ConstructionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionNode::Identifier { name } => f.write_str(name),
            ConstructionNode::New { target, args, .. } => write_applied(f, "NEW", target, args),
            ConstructionNode::Call { target, args } => write_applied(f, "CALL", target, args),
            ConstructionNode::MemberAccess {
                target,
                property,
                computed: false,
            } => write!(f, "MEMBER({target}, {property})"),
            ConstructionNode::MemberAccess {
                target,
                property,
                computed: true,
            } => write!(f, "MEMBER({target}, [{property}])"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::Construction(node) => write!(f, "{node}"),
        }
    }
}

fn write_applied(
    f: &mut fmt::Formatter<'_>,
    tag: &str,
    target: &ConstructionNode,
    args: &[Expression],
) -> fmt::Result {
    write!(f, "{tag}({target}")?;
    for arg in args {
        write!(f, ", {arg}")?;
    }
    f.write_str(")")
}
