//! The production ladder: each rung declares its own rule list and
//! delegates to [crate::rule::parse_rule]. Precedence rises as the ladder
//! descends; `program` is the only entry point the rest of the crate calls.
//!
//! ```text
//! expression = equality
//! equality   = comparison ( (!= | ==) comparison )*
//! comparison = term       ( (> | >= | < | <=) term )*
//! term       = factor     ( (- | +) factor )*
//! factor     = unary      ( (/ | *) unary )*
//! unary      = (! | -) unary | primary
//! primary    = NUMBER | STRING | WAAR | ONWAAR
//! assignment = NAME '=' expression
//! if         = ALS expression '{' body '}'
//! statement  = if | assignment
//! program    = statement*
//! ```

use crate::ast::{AstKind, AstNode, Literal, Operator};
use crate::rule::{parse_rule, Cursor, Priority, Repeat, Rule, RuleItem};
use crate::token::{Token, TokenKind, TokenTag};

// `TerminalBuilder` is a bare `fn`, so each operator gets its own named
// top-level function rather than a capturing closure.
fn add_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Add)
}
fn subtract_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Subtract)
}
fn multiply_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Multiply)
}
fn divide_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Divide)
}
fn eq_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Eq)
}
fn neq_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Neq)
}
fn lt_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Lt)
}
fn lte_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Lte)
}
fn gt_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Gt)
}
fn gte_builder(_: &Token) -> AstNode {
    AstNode::operator(Operator::Gte)
}

fn number_builder(token: &Token) -> AstNode {
    match &token.kind {
        TokenKind::Number(n) => AstNode::literal(Literal::Number(*n as u32)),
        _ => unreachable!("rule engine only calls this builder on a matched NUMBER"),
    }
}
fn string_builder(token: &Token) -> AstNode {
    match &token.kind {
        TokenKind::Str(s) => AstNode::literal(Literal::Str(s.clone())),
        _ => unreachable!("rule engine only calls this builder on a matched STRING"),
    }
}
fn waar_builder(_: &Token) -> AstNode {
    AstNode::literal(Literal::Boolean(true))
}
fn onwaar_builder(_: &Token) -> AstNode {
    AstNode::literal(Literal::Boolean(false))
}
fn identifier_builder(token: &Token) -> AstNode {
    match &token.kind {
        TokenKind::Name(name) => AstNode::identifier(name.clone()),
        _ => unreachable!("rule engine only calls this builder on a matched NAME"),
    }
}
fn assignment_builder(_: &Token) -> AstNode {
    AstNode::new(AstKind::Assignment)
}
fn negate_builder(_: &Token) -> AstNode {
    AstNode::new(AstKind::Negate)
}
fn invert_builder(_: &Token) -> AstNode {
    AstNode::new(AstKind::Invert)
}
fn paren_builder(_: &Token) -> AstNode {
    AstNode::new(AstKind::Grouping)
}

/// `primary = NUMBER | STRING | WAAR | ONWAAR | '(' expression ')'`. The
/// parens carry no precedence node of their own; both are matched with
/// [Priority::None] so the inner `expression` result passes straight
/// through.
pub fn parse_primary(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[RuleItem::new(
        Rule::Or(&[
            RuleItem::new(Rule::Terminal(TokenTag::Number, number_builder), Priority::Primary),
            RuleItem::new(
                Rule::Terminal(TokenTag::Str, string_builder),
                Priority::Primary,
            ),
            RuleItem::new(Rule::Terminal(TokenTag::Waar, waar_builder), Priority::Primary),
            RuleItem::new(Rule::Terminal(TokenTag::Onwaar, onwaar_builder), Priority::Primary),
            RuleItem::new(
                Rule::Group(&[
                    RuleItem::new(Rule::Terminal(TokenTag::LParen, paren_builder), Priority::None),
                    RuleItem::new(Rule::NonTerminal(parse_expression), Priority::Primary),
                    RuleItem::new(Rule::Terminal(TokenTag::RParen, paren_builder), Priority::None),
                ]),
                Priority::Primary,
            ),
        ]),
        Priority::Primary,
    )];
    parse_rule(items, cursor)
}

pub fn parse_unary(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[RuleItem::new(
        Rule::Or(&[
            RuleItem::new(
                Rule::Group(&[
                    RuleItem::new(Rule::Terminal(TokenTag::Bang, invert_builder), Priority::Primary),
                    RuleItem::new(Rule::NonTerminal(parse_unary), Priority::Secondary),
                ]),
                Priority::Primary,
            ),
            RuleItem::new(
                Rule::Group(&[
                    RuleItem::new(Rule::Terminal(TokenTag::Minus, negate_builder), Priority::Primary),
                    RuleItem::new(Rule::NonTerminal(parse_unary), Priority::Secondary),
                ]),
                Priority::Primary,
            ),
            RuleItem::new(Rule::NonTerminal(parse_primary), Priority::Primary),
        ]),
        Priority::Primary,
    )];
    parse_rule(items, cursor)
}

pub fn parse_factor(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[
        RuleItem::new(Rule::NonTerminal(parse_unary), Priority::Secondary),
        RuleItem::repeating(
            Rule::Group(&[
                RuleItem::new(
                    Rule::Or(&[
                        RuleItem::new(Rule::Terminal(TokenTag::Slash, divide_builder), Priority::Primary),
                        RuleItem::new(Rule::Terminal(TokenTag::Star, multiply_builder), Priority::Primary),
                    ]),
                    Priority::Primary,
                ),
                RuleItem::new(Rule::NonTerminal(parse_unary), Priority::Secondary),
            ]),
            Priority::Primary,
            Repeat::ZeroOrMore,
        ),
    ];
    parse_rule(items, cursor)
}

pub fn parse_term(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[
        RuleItem::new(Rule::NonTerminal(parse_factor), Priority::Secondary),
        RuleItem::repeating(
            Rule::Group(&[
                RuleItem::new(
                    Rule::Or(&[
                        RuleItem::new(Rule::Terminal(TokenTag::Minus, subtract_builder), Priority::Primary),
                        RuleItem::new(Rule::Terminal(TokenTag::Plus, add_builder), Priority::Primary),
                    ]),
                    Priority::Primary,
                ),
                RuleItem::new(Rule::NonTerminal(parse_factor), Priority::Secondary),
            ]),
            Priority::Primary,
            Repeat::ZeroOrMore,
        ),
    ];
    parse_rule(items, cursor)
}

pub fn parse_comparison(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[
        RuleItem::new(Rule::NonTerminal(parse_term), Priority::Secondary),
        RuleItem::repeating(
            Rule::Group(&[
                RuleItem::new(
                    Rule::Or(&[
                        RuleItem::new(Rule::Terminal(TokenTag::Gte, gte_builder), Priority::Primary),
                        RuleItem::new(Rule::Terminal(TokenTag::Gt, gt_builder), Priority::Primary),
                        RuleItem::new(Rule::Terminal(TokenTag::Lte, lte_builder), Priority::Primary),
                        RuleItem::new(Rule::Terminal(TokenTag::Lt, lt_builder), Priority::Primary),
                    ]),
                    Priority::Primary,
                ),
                RuleItem::new(Rule::NonTerminal(parse_term), Priority::Secondary),
            ]),
            Priority::Primary,
            Repeat::ZeroOrMore,
        ),
    ];
    parse_rule(items, cursor)
}

pub fn parse_equality(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[
        RuleItem::new(Rule::NonTerminal(parse_comparison), Priority::Secondary),
        RuleItem::repeating(
            Rule::Group(&[
                RuleItem::new(
                    Rule::Or(&[
                        RuleItem::new(Rule::Terminal(TokenTag::Neq, neq_builder), Priority::Primary),
                        RuleItem::new(Rule::Terminal(TokenTag::Eq, eq_builder), Priority::Primary),
                    ]),
                    Priority::Primary,
                ),
                RuleItem::new(Rule::NonTerminal(parse_comparison), Priority::Secondary),
            ]),
            Priority::Primary,
            Repeat::ZeroOrMore,
        ),
    ];
    parse_rule(items, cursor)
}

pub fn parse_expression(cursor: &mut Cursor) -> Option<AstNode> {
    parse_equality(cursor)
}

pub fn parse_assignment(cursor: &mut Cursor) -> Option<AstNode> {
    let items: &[RuleItem] = &[
        RuleItem::new(
            Rule::Terminal(TokenTag::Name, identifier_builder),
            Priority::Secondary,
        ),
        RuleItem::new(Rule::Terminal(TokenTag::Assign, assignment_builder), Priority::Primary),
        RuleItem::new(Rule::NonTerminal(parse_expression), Priority::Secondary),
    ];
    parse_rule(items, cursor)
}

fn body_of(statements: Vec<AstNode>) -> AstNode {
    AstNode::body(statements)
}

/// `if = ALS expression '{' body '}'`. Not expressible as a flat
/// [RuleItem] sequence (the body is a nested zero-or-more of `statement`,
/// and the result needs reshaping into a `CONDITIONAL` node rather than
/// whatever the generic attachment policy would produce), so it is hand
/// written directly against the [Cursor], restoring position on failure.
pub fn parse_if(cursor: &mut Cursor) -> Option<AstNode> {
    let mark = cursor.mark();

    let als = cursor.peek()?;
    if !matches!(als.kind, TokenKind::Als) {
        return None;
    }
    cursor.advance();

    let test = match parse_expression(cursor) {
        Some(node) => node,
        None => {
            cursor.reset(mark);
            return None;
        }
    };

    match cursor.peek() {
        Some(token) if matches!(token.kind, TokenKind::LBrace) => {
            cursor.advance();
        }
        _ => {
            cursor.reset(mark);
            return None;
        }
    }

    let mut statements = Vec::new();
    while let Some(statement) = parse_statement(cursor) {
        statements.push(statement);
    }

    match cursor.peek() {
        Some(token) if matches!(token.kind, TokenKind::RBrace) => {
            cursor.advance();
        }
        _ => {
            cursor.reset(mark);
            return None;
        }
    }

    let mut node = AstNode::new(AstKind::Conditional);
    node.expression = Some(Box::new(test));
    node.right = Some(Box::new(body_of(statements)));
    node.left = None;
    Some(node)
}

/// `statement = if | assignment`.
pub fn parse_statement(cursor: &mut Cursor) -> Option<AstNode> {
    parse_if(cursor).or_else(|| parse_assignment(cursor))
}

/// `program = statement*`. Top-level entry point: loops trying `statement`
/// until it fails, with no error recovery.
pub fn parse(tokens: &[Token]) -> AstNode {
    let mut cursor = Cursor::new(tokens);
    let mut statements = Vec::new();
    while !cursor.at_end() {
        match parse_statement(&mut cursor) {
            Some(statement) => statements.push(statement),
            None => break,
        }
    }
    body_of(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Payload;
    use crate::lexer::lex;

    fn parse_source(src: &str) -> AstNode {
        let tokens = lex(src.as_bytes());
        parse(&tokens)
    }

    #[test]
    fn precedence_and_left_associativity() {
        // x = 1 + 2 * 3;
        let program = parse_source("x = 1 + 2 * 3;");
        assert_eq!(program.statements().len(), 1);
        let assignment = &program.statements()[0];
        assert_eq!(assignment.kind, AstKind::Assignment);
        let rhs = assignment.right.as_ref().unwrap();
        assert_eq!(rhs.operator_value(), Some(Operator::Add));
        // left = 1 (the MULTIPLY binds tighter and stays on the right)
        match &rhs.left.as_ref().unwrap().payload {
            Payload::Literal(Literal::Number(n)) => assert_eq!(*n, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(rhs.right.as_ref().unwrap().operator_value(), Some(Operator::Multiply));
    }

    #[test]
    fn left_associative_subtraction_chain() {
        // x = 10 - 4 - 2;  =>  (10 - 4) - 2
        let program = parse_source("x = 10 - 4 - 2;");
        let rhs = program.statements()[0].right.as_ref().unwrap();
        assert_eq!(rhs.operator_value(), Some(Operator::Subtract));
        let left = rhs.left.as_ref().unwrap();
        assert_eq!(left.operator_value(), Some(Operator::Subtract));
    }

    #[test]
    fn string_assignment() {
        let program = parse_source(r#"x = "hoi";"#);
        let rhs = program.statements()[0].right.as_ref().unwrap();
        match &rhs.payload {
            Payload::Literal(Literal::Str(s)) => assert_eq!(s, "hoi"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn conditional_with_comparison() {
        let program = parse_source("als 3 < 5 { x = 1; }");
        assert_eq!(program.statements().len(), 1);
        let cond = &program.statements()[0];
        assert_eq!(cond.kind, AstKind::Conditional);
        assert_eq!(
            cond.expression.as_ref().unwrap().operator_value(),
            Some(Operator::Lt)
        );
        assert_eq!(cond.right.as_ref().unwrap().statements().len(), 1);
    }

    #[test]
    fn parenthesized_expression_collapses_to_inner_value() {
        // x = (3 < 5) + (5 < 3);
        let program = parse_source("x = (3 < 5) + (5 < 3);");
        let rhs = program.statements()[0].right.as_ref().unwrap();
        assert_eq!(rhs.operator_value(), Some(Operator::Add));
        assert_eq!(rhs.left.as_ref().unwrap().operator_value(), Some(Operator::Lt));
        assert_eq!(rhs.right.as_ref().unwrap().operator_value(), Some(Operator::Lt));
    }

    #[test]
    fn unary_negate_and_invert() {
        let program = parse_source("x = -5;");
        let rhs = program.statements()[0].right.as_ref().unwrap();
        assert_eq!(rhs.kind, AstKind::Negate);
        match &rhs.right.as_ref().unwrap().payload {
            Payload::Literal(Literal::Number(n)) => assert_eq!(*n, 5),
            other => panic!("unexpected {:?}", other),
        }
    }
}
