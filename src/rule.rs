//! The declarative rule engine: a small sum-type grammar representation
//! plus the shared `parse_rule` driver every production in `grammar.rs` is
//! built from.
//!
//! The attachment policy below (rotate-up for a primary match, attach-right
//! for a secondary match, push-left as the fallback) drives how a matched
//! node is woven into the tree being built. `Rule::Or` alternatives are
//! tried as proper alternation: the first successful alternative wins and
//! the cursor resets between failed attempts.

use crate::ast::AstNode;
use crate::token::{Token, TokenTag};

/// Cursor over a token slice that transparently skips trivia. Every
/// position handed out by [Cursor::mark] can be restored with
/// [Cursor::reset], which is how every `ParseFn` undoes a failed attempt.
pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let mut cursor = Self { tokens, pos: 0 };
        cursor.skip_trivia();
        cursor
    }

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if token.is_trivia() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        self.skip_trivia();
        Some(token)
    }

    pub fn mark(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

/// A fully parsed non-terminal is a plain function pointer: flut's grammar
/// is closed and has no captured state, so a `fn` is enough, and it keeps
/// every production's rule table a `const`.
pub type ParseFn = fn(&mut Cursor) -> Option<AstNode>;

/// Builds the node a matched terminal contributes to the tree. Punctuation
/// terminals that exist only to be consumed (`;`, `(`, `)`) still need a
/// builder to satisfy the type, but are paired with [Priority::None] so the
/// driver never attaches their output.
pub type TerminalBuilder = fn(&Token) -> AstNode;

/// Attachment role of a matched rule item, plus a `None` role for rule
/// items whose match never produces anything worth attaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Primary,
    Secondary,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    None,
    ZeroOrMore,
    OneOrMore,
}

pub enum Rule {
    Terminal(TokenTag, TerminalBuilder),
    NonTerminal(ParseFn),
    Group(&'static [RuleItem]),
    Or(&'static [RuleItem]),
}

pub struct RuleItem {
    pub rule: Rule,
    pub priority: Priority,
    pub repeat: Repeat,
}

impl RuleItem {
    pub const fn new(rule: Rule, priority: Priority) -> Self {
        Self {
            rule,
            priority,
            repeat: Repeat::None,
        }
    }

    pub const fn repeating(rule: Rule, priority: Priority, repeat: Repeat) -> Self {
        Self {
            rule,
            priority,
            repeat,
        }
    }
}

#[cfg(debug_assertions)]
fn trace(msg: std::fmt::Arguments) {
    println!("[rule] {}", msg);
}

/// Attempt one rule, once, at the current cursor position. `None` means no
/// match and the cursor is left untouched.
fn parse_item(rule: &Rule, cursor: &mut Cursor) -> Option<AstNode> {
    match rule {
        Rule::Terminal(expected, builder) => {
            let token = cursor.peek()?;
            if token.kind.tag() == *expected {
                let token = cursor.advance().cloned().expect("peek succeeded");
                #[cfg(debug_assertions)]
                trace(format_args!("terminal matched {:?}", token.kind));
                Some(builder(&token))
            } else {
                None
            }
        }
        Rule::NonTerminal(f) => f(cursor),
        Rule::Group(items) => parse_rule(items, cursor),
        Rule::Or(alternatives) => {
            for alt in *alternatives {
                let mark = cursor.mark();
                if let Some(node) = parse_item(&alt.rule, cursor) {
                    return Some(node);
                }
                cursor.reset(mark);
            }
            None
        }
    }
}

/// Attach a freshly matched node to the running parent per the rotate-up /
/// attach-right / push-left policy.
fn attach(parent: &mut Option<AstNode>, mut node: AstNode, priority: Priority) {
    let mut root = match parent.take() {
        None => {
            *parent = Some(node);
            return;
        }
        Some(root) => root,
    };

    if node.right.is_none() && priority == Priority::Primary {
        node.right = Some(Box::new(root));
        *parent = Some(node);
    } else if node.left.is_none() && priority == Priority::Primary {
        node.left = Some(Box::new(root));
        *parent = Some(node);
    } else if root.right.is_none() && priority == Priority::Secondary {
        root.right = Some(Box::new(node));
        *parent = Some(root);
    } else if root.left.is_none() {
        root.left = root.right.take();
        root.right = Some(Box::new(node));
        *parent = Some(root);
    } else {
        *parent = Some(root);
    }
}

/// The shared driver every production in `grammar.rs` calls: a single pass
/// over `items` with index `i` and a running `parent` pointer.
///
/// Before every attempt, if the next token is `;` it is consumed and the
/// whole list stops immediately, returning whatever `parent` holds so far.
/// This is what lets a trailing `;` terminate a statement without any
/// grammar rule ever mentioning `SEMICOLON` explicitly: whichever nested
/// rule list happens to be active when the `;` is reached absorbs it and
/// every enclosing list unwinds normally.
///
/// A `ZeroOrMore`/`OneOrMore` item is retried in place (the index does not
/// advance) until it fails to match; only then does the list move on.
pub fn parse_rule(items: &[RuleItem], cursor: &mut Cursor) -> Option<AstNode> {
    let mark = cursor.mark();
    let mut parent: Option<AstNode> = None;
    let mut matches = vec![0usize; items.len()];
    let mut i = 0;

    while i < items.len() {
        if let Some(token) = cursor.peek() {
            if token.kind.tag() == TokenTag::Semicolon {
                cursor.advance();
                return parent;
            }
        }

        let item = &items[i];
        match parse_item(&item.rule, cursor) {
            Some(node) => {
                if item.priority != Priority::None {
                    attach(&mut parent, node, item.priority);
                }
                matches[i] += 1;
                if item.repeat == Repeat::None {
                    i += 1;
                }
            }
            None => match item.repeat {
                Repeat::None => {
                    cursor.reset(mark);
                    return None;
                }
                Repeat::ZeroOrMore => {
                    i += 1;
                }
                Repeat::OneOrMore => {
                    if matches[i] == 0 {
                        cursor.reset(mark);
                        return None;
                    }
                    i += 1;
                }
            },
        }
    }

    parent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstKind, Literal, Operator, Payload};
    use crate::lexer::lex;
    use crate::token::TokenKind;

    fn plus_builder(_: &Token) -> AstNode {
        AstNode::operator(Operator::Add)
    }

    fn number_builder(token: &Token) -> AstNode {
        match &token.kind {
            TokenKind::Number(n) => AstNode::literal(Literal::Number(*n as u32)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn terminal_sequence_builds_left_associative_chain() {
        // 1 + 2 + 3, modeled directly as a rule table (no grammar.rs needed
        // for this unit test): NUMBER (PRIMARY) then (PLUS NUMBER)*, the
        // group itself PRIMARY so each iteration rotates above the prior
        // subtree.
        let items = [
            RuleItem::new(Rule::Terminal(TokenTag::Number, number_builder), Priority::Primary),
            RuleItem::repeating(
                Rule::Group(&[
                    RuleItem::new(Rule::Terminal(TokenTag::Plus, plus_builder), Priority::Primary),
                    RuleItem::new(Rule::Terminal(TokenTag::Number, number_builder), Priority::Secondary),
                ]),
                Priority::Primary,
                Repeat::ZeroOrMore,
            ),
        ];

        let tokens = lex(b"1 + 2 + 3");
        let mut cursor = Cursor::new(&tokens);
        let node = parse_rule(&items, &mut cursor).expect("should parse");

        // Left-associative: ((1 + 2) + 3)
        assert_eq!(node.kind, AstKind::Operator);
        assert_eq!(node.operator_value(), Some(Operator::Add));
        let left = node.left.as_ref().expect("left");
        assert_eq!(left.kind, AstKind::Operator);
        assert_eq!(left.operator_value(), Some(Operator::Add));
        match &left.left.as_ref().unwrap().payload {
            Payload::Literal(Literal::Number(n)) => assert_eq!(*n, 1),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn mismatched_terminal_restores_cursor() {
        let items = [RuleItem::new(
            Rule::Terminal(TokenTag::Plus, plus_builder),
            Priority::Primary,
        )];
        let tokens = lex(b"1");
        let mut cursor = Cursor::new(&tokens);
        let mark = cursor.mark();
        assert!(parse_rule(&items, &mut cursor).is_none());
        assert_eq!(cursor.mark(), mark);
    }
}
