use crate::ast::{Expr, Visitor};
use crate::token::{Literal, Token, TokenType};

/// Renders a tree in prefix form, e.g. `1 + 2 * 3` as `+ 1 * 2 3`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_literal(&mut self, token: &Token) -> String {
        match (token.kind, &token.literal) {
            (TokenType::True, _) => "true".to_string(),
            (TokenType::False, _) => "false".to_string(),
            (TokenType::Nil, _) => "nil".to_string(),
            (TokenType::Number, Some(Literal::Number(n))) => n.to_string(),
            (TokenType::String, Some(Literal::String(s))) => s.clone(),
            (kind, _) => unreachable!("literal node holds a {} token", kind),
        }
    }

    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> String {
        format!("{} {}", operator.lexeme, operand.accept(self))
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        format!("{} {} {}", operator.lexeme, left.accept(self), right.accept(self))
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        format!("({})", inner.accept(self))
    }
}
