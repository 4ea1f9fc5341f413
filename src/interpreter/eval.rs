//! Tree-walking evaluator. `Interpreter` owns its `VariableStore` rather
//! than reaching into a global, so multiple interpreters can coexist.

use crate::ast::{AstKind, AstNode, Literal, Operator};
use crate::interpreter::store::VariableStore;
use crate::interpreter::value::Value;

enum Side {
    Left,
    Right,
}

pub struct Interpreter {
    pub store: VariableStore,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            store: VariableStore::new(),
        }
    }

    pub fn run(&mut self, body: &[AstNode]) {
        for node in body {
            self.execute_node(node);
        }
    }

    fn execute_node(&mut self, node: &AstNode) {
        match node.kind {
            AstKind::Assignment => self.execute_assignment(node),
            AstKind::Body => self.run(node.statements()),
            AstKind::Conditional => self.execute_conditional(node),
            _ => println!("Onbekende node"),
        }
    }

    fn execute_assignment(&mut self, node: &AstNode) {
        let name = match node.left.as_deref().and_then(AstNode::identifier_name) {
            Some(name) => name,
            None => return,
        };
        let right = match node.right.as_deref() {
            Some(right) => right,
            None => return,
        };

        match right.kind {
            AstKind::Operator => {
                let result = self.execute_operator(right);
                self.store.set(name, Value::Number(result));
            }
            AstKind::Literal => match right.literal_value() {
                Some(Literal::Number(n)) => self.store.set(name, Value::Number(*n)),
                Some(Literal::Boolean(b)) => self.store.set(name, Value::Number(*b as u32)),
                Some(Literal::Str(s)) => self.store.set(name, Value::Str(s.clone())),
                None => {}
            },
            _ => {}
        }
    }

    fn execute_conditional(&mut self, node: &AstNode) {
        let test = match node.expression.as_deref() {
            Some(test) => test,
            None => return,
        };
        let result = match test.kind {
            AstKind::Operator => self.execute_operator(test),
            AstKind::Literal => match test.literal_value() {
                Some(Literal::Number(n)) => *n,
                Some(Literal::Boolean(b)) => *b as u32,
                _ => 0,
            },
            _ => 0,
        };

        if result != 0 {
            if let Some(then_branch) = node.right.as_deref() {
                self.execute_node(then_branch);
            }
        } else if let Some(else_branch) = node.left.as_deref() {
            self.execute_node(else_branch);
        }
    }

    fn execute_operator(&self, node: &AstNode) -> u32 {
        let left = self.evaluate_operand(node.left.as_deref(), Side::Left);
        let right = self.evaluate_operand(node.right.as_deref(), Side::Right);

        match node.operator_value() {
            Some(Operator::Add) => left.wrapping_add(right),
            Some(Operator::Subtract) => left.wrapping_sub(right),
            Some(Operator::Multiply) => left.wrapping_mul(right),
            Some(Operator::Divide) => left.checked_div(right).unwrap_or(0),
            Some(Operator::Eq) => (left == right) as u32,
            Some(Operator::Neq) => (left != right) as u32,
            Some(Operator::Lt) => (left < right) as u32,
            Some(Operator::Lte) => (left <= right) as u32,
            Some(Operator::Gt) => (left > right) as u32,
            Some(Operator::Gte) => (left >= right) as u32,
            None => {
                println!("unsupported operator");
                0
            }
        }
    }

    fn evaluate_operand(&self, node: Option<&AstNode>, side: Side) -> u32 {
        let node = match node {
            Some(node) => node,
            None => return 0,
        };

        match node.kind {
            AstKind::Literal => match node.literal_value() {
                Some(Literal::Number(n)) => *n,
                Some(Literal::Boolean(b)) => *b as u32,
                _ => {
                    match side {
                        Side::Left => println!("Can't do other types yet"),
                        Side::Right => println!("unsupported type"),
                    }
                    0
                }
            },
            AstKind::Operator => self.execute_operator(node),
            _ => {
                match side {
                    Side::Left => println!("can't do other nodes yet"),
                    Side::Right => println!("unsupported node"),
                }
                0
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse;
    use crate::lexer::lex;

    fn run_source(src: &str) -> Interpreter {
        let tokens = lex(src.as_bytes());
        let program = parse(&tokens);
        let mut interpreter = Interpreter::new();
        interpreter.run(program.statements());
        interpreter
    }

    #[test]
    fn precedence_scenario() {
        let interpreter = run_source("x = 1 + 2 * 3;");
        assert_eq!(interpreter.store.get("x"), Some(&Value::Number(7)));
    }

    #[test]
    fn left_associative_subtraction_scenario() {
        let interpreter = run_source("x = 10 - 4 - 2;");
        assert_eq!(interpreter.store.get("x"), Some(&Value::Number(4)));
    }

    #[test]
    fn string_assignment_scenario() {
        let interpreter = run_source(r#"x = "hoi";"#);
        assert_eq!(interpreter.store.get("x"), Some(&Value::Str("hoi".into())));
    }

    #[test]
    fn conditional_dispatch_scenario() {
        let interpreter = run_source("x = 0; als 1 { x = 5; } als 0 { x = 9; }");
        assert_eq!(interpreter.store.get("x"), Some(&Value::Number(5)));
    }

    #[test]
    fn comparison_yields_zero_or_one() {
        let interpreter = run_source("x = (3 < 5) + (5 < 3);");
        assert_eq!(interpreter.store.get("x"), Some(&Value::Number(1)));
    }
}
