//! Construction trees produced by the `new` resolver.

use crate::value::Value;
use serde::Serialize;

/// A resolved `new` chain with its trailing member/call suffixes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstructionNode {
    /// A bare name, or a dotted chain like `MyNS.Widget`.
    Identifier { name: String },
    New {
        target: Box<ConstructionNode>,
        args: Vec<Expression>,
        /// Whether an argument list was written, even an empty one.
        has_parens: bool,
    },
    Call {
        target: Box<ConstructionNode>,
        args: Vec<Expression>,
    },
    /// `target.property`, or `target[property]` when `computed`. For computed
    /// access `property` holds the canonical text of the index expression.
    MemberAccess {
        target: Box<ConstructionNode>,
        property: String,
        computed: bool,
    },
}

impl ConstructionNode {
    pub fn identifier(name: impl Into<String>) -> Self {
        ConstructionNode::Identifier { name: name.into() }
    }

    pub fn new_expr(target: ConstructionNode, args: Vec<Expression>, has_parens: bool) -> Self {
        ConstructionNode::New {
            target: Box::new(target),
            args,
            has_parens,
        }
    }

    pub fn call(target: ConstructionNode, args: Vec<Expression>) -> Self {
        ConstructionNode::Call {
            target: Box::new(target),
            args,
        }
    }

    pub fn member(target: ConstructionNode, property: impl Into<String>) -> Self {
        ConstructionNode::MemberAccess {
            target: Box::new(target),
            property: property.into(),
            computed: false,
        }
    }

    pub fn index(target: ConstructionNode, property: impl Into<String>) -> Self {
        ConstructionNode::MemberAccess {
            target: Box::new(target),
            property: property.into(),
            computed: true,
        }
    }

    /// Nesting levels in this tree. Each `new`, call and member access adds
    /// one; identifiers, dotted or not, add none.
    pub fn height(&self) -> usize {
        match self {
            ConstructionNode::Identifier { .. } => 0,
            ConstructionNode::New { target, args, .. } | ConstructionNode::Call { target, args } => {
                1 + args
                    .iter()
                    .map(Expression::height)
                    .fold(target.height(), usize::max)
            }
            ConstructionNode::MemberAccess { target, .. } => 1 + target.height(),
        }
    }

    /// Number of `new` applications anywhere in this tree.
    pub fn new_count(&self) -> usize {
        match self {
            ConstructionNode::Identifier { .. } => 0,
            ConstructionNode::New { target, args, .. } => {
                1 + target.new_count() + args.iter().map(Expression::new_count).sum::<usize>()
            }
            ConstructionNode::Call { target, args } => {
                target.new_count() + args.iter().map(Expression::new_count).sum::<usize>()
            }
            ConstructionNode::MemberAccess { target, .. } => target.new_count(),
        }
    }
}

/// An operand: either a literal value or a construction tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Literal(Value),
    Construction(ConstructionNode),
}

impl Expression {
    pub fn as_construction(&self) -> Option<&ConstructionNode> {
        match self {
            Expression::Construction(node) => Some(node),
            Expression::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expression::Literal(value) => Some(value),
            Expression::Construction(_) => None,
        }
    }

    /// Nesting levels: container depth for literals, [`ConstructionNode::height`]
    /// otherwise.
    pub fn height(&self) -> usize {
        match self {
            Expression::Literal(value) => value.depth(),
            Expression::Construction(node) => node.height(),
        }
    }

    fn new_count(&self) -> usize {
        self.as_construction().map_or(0, ConstructionNode::new_count)
    }
}

impl From<ConstructionNode> for Expression {
    fn from(node: ConstructionNode) -> Self {
        Expression::Construction(node)
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}
