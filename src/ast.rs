//! AST node kinds and payloads.
//!
//! `AstKind` carries a few variants (`Head`, `Expression`, `Grouping`,
//! `Unary`, `Binary`) that the grammar in `grammar.rs` never actually
//! constructs; they stay part of the enum for completeness.

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

use ptree::TreeItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstKind {
    Head,
    Body,
    Identifier,
    Assignment,
    Expression,
    Literal,
    Grouping,
    Unary,
    Binary,
    Negate,
    Invert,
    Operator,
    Conditional,
}

impl Display for AstKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(u32),
    Str(String),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Eq => "==",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
        };
        write!(f, "{}", s)
    }
}

/// The payload union carried by a subset of [AstKind] variants. Most node
/// kinds carry no payload at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Literal(Literal),
    Identifier(String),
    Operator(Operator),
    Body(Vec<AstNode>),
}

/// An AST node: a tagged variant plus up to three child slots
/// (`left`, `right`, `expression`) and a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: AstKind,
    pub left: Option<Box<AstNode>>,
    pub right: Option<Box<AstNode>>,
    pub expression: Option<Box<AstNode>>,
    pub payload: Payload,
}

impl AstNode {
    pub fn new(kind: AstKind) -> Self {
        Self {
            kind,
            left: None,
            right: None,
            expression: None,
            payload: Payload::None,
        }
    }

    pub fn with_payload(kind: AstKind, payload: Payload) -> Self {
        Self {
            kind,
            left: None,
            right: None,
            expression: None,
            payload,
        }
    }

    pub fn identifier(name: String) -> Self {
        Self::with_payload(AstKind::Identifier, Payload::Identifier(name))
    }

    pub fn literal(value: Literal) -> Self {
        Self::with_payload(AstKind::Literal, Payload::Literal(value))
    }

    pub fn operator(op: Operator) -> Self {
        Self::with_payload(AstKind::Operator, Payload::Operator(op))
    }

    pub fn body(statements: Vec<AstNode>) -> Self {
        Self::with_payload(AstKind::Body, Payload::Body(statements))
    }

    pub fn operator_value(&self) -> Option<Operator> {
        match &self.payload {
            Payload::Operator(op) => Some(*op),
            _ => None,
        }
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match &self.payload {
            Payload::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn literal_value(&self) -> Option<&Literal> {
        match &self.payload {
            Payload::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn statements(&self) -> &[AstNode] {
        match &self.payload {
            Payload::Body(stmts) => stmts.as_slice(),
            _ => &[],
        }
    }

    fn label(&self) -> String {
        match (&self.kind, &self.payload) {
            (AstKind::Literal, Payload::Literal(Literal::Number(n))) => format!("LITERAL({})", n),
            (AstKind::Literal, Payload::Literal(Literal::Str(s))) => format!("LITERAL({:?})", s),
            (AstKind::Literal, Payload::Literal(Literal::Boolean(b))) => {
                format!("LITERAL({})", b)
            }
            (AstKind::Identifier, Payload::Identifier(name)) => format!("IDENTIFIER({})", name),
            (AstKind::Operator, Payload::Operator(op)) => format!("OPERATOR({})", op),
            (kind, _) => format!("{}", kind),
        }
    }

    fn child_nodes(&self) -> Vec<AstNode> {
        let mut out = Vec::new();
        if let Some(expression) = &self.expression {
            out.push((**expression).clone());
        }
        if let Some(left) = &self.left {
            out.push((**left).clone());
        }
        if let Some(right) = &self.right {
            out.push((**right).clone());
        }
        if let Payload::Body(statements) = &self.payload {
            out.extend(statements.iter().cloned());
        }
        out
    }

    pub fn print(&self) -> std::io::Result<()> {
        ptree::print_tree(self)
    }
}

impl TreeItem for AstNode {
    type Child = AstNode;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{}", self.label())
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::Owned(self.child_nodes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_node_holds_left_and_right() {
        let mut add = AstNode::operator(Operator::Add);
        add.left = Some(Box::new(AstNode::literal(Literal::Number(1))));
        add.right = Some(Box::new(AstNode::literal(Literal::Number(2))));
        assert!(add.left.is_some() && add.right.is_some());
        assert_eq!(add.operator_value(), Some(Operator::Add));
    }

    #[test]
    fn body_owns_statements() {
        let body = AstNode::body(vec![AstNode::identifier("x".into())]);
        assert_eq!(body.statements().len(), 1);
    }
}
