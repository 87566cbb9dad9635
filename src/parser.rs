// expression → equality
// equality   → comparison ( ( "==" | "!=" ) comparison )*
// comparison → term ( ( "<" | "<=" | ">" | ">=" ) term )*
// term       → factor ( ( "+" | "-" ) factor )*
// factor     → unary ( ( "*" | "/" ) unary )*
// unary      → ( "!" | "-" ) unary | primary
// primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"

use crate::ast::Expr;
use crate::error::{Diagnostics, ParseError};
use crate::token::{Token, TokenType};

pub const DEFAULT_MAX_DEPTH: usize = 128;

const TOO_DEEP: &str = "Expression nests too deeply.";

/// A subtree and its height in nodes, leaf included.
type Parsed = (Expr, usize);

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// `tokens` is expected to end with the END token, as produced by the
    /// scanner.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a single expression. The first syntax error is recorded into
    /// `diagnostics` and no tree is returned. A returned tree is never higher
    /// than `max_depth` nodes.
    pub fn parse(&mut self, diagnostics: &mut Diagnostics) -> Option<Expr> {
        if self.tokens.is_empty() {
            return None;
        }

        match self.parse_program() {
            Ok(expr) => Some(expr),
            Err(err) => {
                diagnostics.report_syntax(err);
                None
            }
        }
    }

    fn parse_program(&mut self) -> Result<Expr, ParseError> {
        let (expr, _) = self.parse_expression()?;

        if !self.is_eof() {
            return Err(ParseError::from_token(self.at(), "Expect end of expression."));
        }

        Ok(expr)
    }

    fn at(&self) -> &'a Token {
        let index = self.current.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn previous(&self) -> &'a Token {
        &self.tokens[self.current - 1]
    }

    fn is_eof(&self) -> bool {
        self.at().kind == TokenType::End
    }

    /// Returns the current token and moves past it. END is never consumed.
    fn next_token(&mut self) -> &'a Token {
        let token = self.at();
        if !self.is_eof() {
            self.current += 1;
        }
        token
    }

    /// Consumes the current token if it is one of `kinds`.
    fn matches(&mut self, kinds: &[TokenType]) -> bool {
        if kinds.contains(&self.at().kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    fn eat(&mut self, expecting: TokenType, message: &str) -> Result<&'a Token, ParseError> {
        if self.at().kind != expecting {
            return Err(ParseError::from_token(self.at(), message));
        }

        Ok(self.next_token())
    }

    fn parse_expression(&mut self) -> Result<Parsed, ParseError> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Parsed, ParseError> {
        self.parse_binary(
            &[TokenType::EqualEqual, TokenType::BangEqual],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self) -> Result<Parsed, ParseError> {
        self.parse_binary(
            &[
                TokenType::Less,
                TokenType::LessEqual,
                TokenType::Greater,
                TokenType::GreaterEqual,
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> Result<Parsed, ParseError> {
        self.parse_binary(&[TokenType::Plus, TokenType::Minus], Self::parse_factor)
    }

    fn parse_factor(&mut self) -> Result<Parsed, ParseError> {
        self.parse_binary(&[TokenType::Star, TokenType::Slash], Self::parse_unary)
    }

    /// Folds `operand (operator operand)*` to the left. Each fold adds a level
    /// to the left spine, so the height is checked at every operator.
    fn parse_binary(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<Parsed, ParseError>,
    ) -> Result<Parsed, ParseError> {
        let (mut left, mut height) = operand(self)?;

        while self.matches(operators) {
            let operator = self.previous().clone();
            let (right, right_height) = operand(self)?;
            height = self.check_height(&operator, height.max(right_height) + 1)?;
            left = Expr::binary(left, operator, right);
        }

        Ok((left, height))
    }

    // Every nested grouping and every prefix operator passes through here, so
    // this is where recursion depth is counted.
    fn parse_unary(&mut self) -> Result<Parsed, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::from_token(self.at(), TOO_DEEP));
        }

        self.depth += 1;
        let result = if self.matches(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous().clone();
            self.parse_prefix(operator)
        } else {
            self.parse_primary_expression()
        };
        self.depth -= 1;

        result
    }

    fn parse_prefix(&mut self, operator: Token) -> Result<Parsed, ParseError> {
        let (operand, height) = self.parse_unary()?;
        let height = self.check_height(&operator, height + 1)?;
        Ok((Expr::unary(operator, operand), height))
    }

    fn parse_primary_expression(&mut self) -> Result<Parsed, ParseError> {
        match self.at().kind {
            TokenType::Number
            | TokenType::String
            | TokenType::True
            | TokenType::False
            | TokenType::Nil => {
                let token = self.next_token().clone();
                Ok((Expr::literal(token), 1))
            }
            TokenType::LeftParen => {
                let paren = self.next_token();
                let (inner, height) = self.parse_expression()?;
                self.eat(TokenType::RightParen, "Expect ')' after expression.")?;
                let height = self.check_height(paren, height + 1)?;
                Ok((Expr::grouping(inner), height))
            }
            _ => Err(ParseError::from_token(self.at(), "Expect expression.")),
        }
    }

    fn check_height(&self, token: &Token, height: usize) -> Result<usize, ParseError> {
        if height > self.max_depth {
            return Err(ParseError::from_token(token, TOO_DEEP));
        }

        Ok(height)
    }
}
