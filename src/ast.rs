use crate::token::Token;

/// Expression tree produced by the parser. Every node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Token),
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
}

/// A whole-tree operation over [`Expr`]. Every variant has its own method and
/// none of them has a default body.
pub trait Visitor<T> {
    fn visit_literal(&mut self, token: &Token) -> T;
    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> T;
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> T;
    fn visit_grouping(&mut self, inner: &Expr) -> T;
}

impl Expr {
    pub fn accept<T, V: Visitor<T> + ?Sized>(&self, visitor: &mut V) -> T {
        match self {
            Expr::Literal(token) => visitor.visit_literal(token),
            Expr::Unary { operator, operand } => visitor.visit_unary(operator, operand),
            Expr::Binary { left, operator, right } => visitor.visit_binary(left, operator, right),
            Expr::Grouping(inner) => visitor.visit_grouping(inner),
        }
    }

    pub fn literal(token: Token) -> Self {
        Expr::Literal(token)
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Literal, TokenType};

    struct NodeCounter;

    impl Visitor<usize> for NodeCounter {
        fn visit_literal(&mut self, _token: &Token) -> usize {
            1
        }

        fn visit_unary(&mut self, _operator: &Token, operand: &Expr) -> usize {
            1 + operand.accept(self)
        }

        fn visit_binary(&mut self, left: &Expr, _operator: &Token, right: &Expr) -> usize {
            1 + left.accept(self) + right.accept(self)
        }

        fn visit_grouping(&mut self, inner: &Expr) -> usize {
            1 + inner.accept(self)
        }
    }

    fn number(n: f64) -> Expr {
        Expr::literal(Token::new(1, TokenType::Number, n.to_string(), Some(Literal::Number(n))))
    }

    #[test]
    fn accept_dispatches_to_matching_visit() {
        // -(1 + 2)
        let expr = Expr::unary(
            Token::new(1, TokenType::Minus, "-", None),
            Expr::grouping(Expr::binary(
                number(1.0),
                Token::new(1, TokenType::Plus, "+", None),
                number(2.0),
            )),
        );
        assert_eq!(expr.accept(&mut NodeCounter), 5);
    }
}
