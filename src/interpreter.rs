use crate::ast::{Expr, Visitor};
use crate::error::{Diagnostics, RuntimeError};
use crate::token::{Literal, Token, TokenType};
use crate::value::Value;

pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `expr`. A runtime error stops evaluation, is recorded into
    /// `diagnostics`, and no value is returned.
    pub fn interpret(&mut self, expr: &Expr, diagnostics: &mut Diagnostics) -> Option<Value> {
        match self.evaluate(expr) {
            Ok(value) => Some(value),
            Err(err) => {
                diagnostics.report_runtime(err);
                None
            }
        }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        expr.accept(self)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn number_operand(operator: &Token, operand: &Value) -> Result<f64, RuntimeError> {
    operand
        .as_number()
        .ok_or_else(|| RuntimeError::from_token(operator, "Operand must be a number."))
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::from_token(operator, "Operands must be numbers.")),
    }
}

impl Visitor<Result<Value, RuntimeError>> for Interpreter {
    fn visit_literal(&mut self, token: &Token) -> Result<Value, RuntimeError> {
        let value = match (token.kind, &token.literal) {
            (TokenType::Number, Some(Literal::Number(n))) => Value::Number(*n),
            (TokenType::String, Some(Literal::String(s))) => Value::String(s.clone()),
            (TokenType::True, _) => Value::Boolean(true),
            (TokenType::False, _) => Value::Boolean(false),
            (TokenType::Nil, _) => Value::Nil,
            (kind, literal) => unreachable!(
                "literal node holds a {} token with payload {:?}",
                kind, literal
            ),
        };
        Ok(value)
    }

    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> Result<Value, RuntimeError> {
        let operand = operand.accept(self)?;

        match operator.kind {
            TokenType::Minus => Ok(Value::Number(-number_operand(operator, &operand)?)),
            TokenType::Bang => Ok(Value::Boolean(!operand.is_truthy())),
            kind => unreachable!("unary node holds a {} operator", kind),
        }
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = left.accept(self)?;
        let right = right.accept(self)?;

        match operator.kind {
            TokenType::Plus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeError::from_token(
                    operator,
                    "Operands must be 2 numbers or strings.",
                )),
            },
            TokenType::Minus => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenType::Star => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a * b))
            }
            TokenType::Slash => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a / b))
            }
            TokenType::Greater => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a > b))
            }
            TokenType::GreaterEqual => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a >= b))
            }
            TokenType::Less => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a < b))
            }
            TokenType::LessEqual => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a <= b))
            }
            TokenType::EqualEqual => Ok(Value::Boolean(left == right)),
            TokenType::BangEqual => Ok(Value::Boolean(left != right)),
            kind => unreachable!("binary node holds a {} operator", kind),
        }
    }

    fn visit_grouping(&mut self, inner: &Expr) -> Result<Value, RuntimeError> {
        inner.accept(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> Expr {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).tokenize(&mut diagnostics);
        let expr = Parser::new(&tokens).parse(&mut diagnostics);
        assert!(!diagnostics.has_syntax_errors(), "{:?}", diagnostics.syntax_errors());
        expr.expect("expression")
    }

    fn run(source: &str) -> Value {
        Interpreter::new().evaluate(&parse(source)).expect("evaluation failed")
    }

    fn run_err(source: &str) -> RuntimeError {
        match Interpreter::new().evaluate(&parse(source)) {
            Ok(value) => panic!("expected a runtime error, got {}", value),
            Err(err) => err,
        }
    }

    fn token(kind: TokenType, lexeme: &str, literal: Option<Literal>) -> Token {
        Token::new(1, kind, lexeme, literal)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(run("1 + 2 * 3"), Value::Number(7.0));
        assert_eq!(run("(1 + 2) * 3"), Value::Number(9.0));
        assert_eq!(run("1 - 2 - 3"), Value::Number(-4.0));
        assert_eq!(run("8 / 4 / 2"), Value::Number(1.0));
        assert_eq!(run("-(2.5)"), Value::Number(-2.5));
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        assert_eq!(run("1 / 0"), Value::Number(f64::INFINITY));
        assert_eq!(run("-1 / 0"), Value::Number(f64::NEG_INFINITY));
        match run("0 / 0") {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(run("\"a\" + \"b\""), Value::from("ab"));
        let err = run_err("\"a\" + 1");
        assert_eq!(err.message(), "Operands must be 2 numbers or strings.");
        assert_eq!(err.to_string(), "[line 1] Error at '+': Operands must be 2 numbers or strings.");
    }

    #[test]
    fn comparison() {
        assert_eq!(run("1 < 2"), Value::Boolean(true));
        assert_eq!(run("2 <= 2"), Value::Boolean(true));
        assert_eq!(run("1 > 2"), Value::Boolean(false));
        assert_eq!(run("2 >= 3"), Value::Boolean(false));
        assert_eq!(run_err("\"a\" < \"b\"").message(), "Operands must be numbers.");
    }

    #[test]
    fn equality_never_fails() {
        assert_eq!(run("1 == 1"), Value::Boolean(true));
        assert_eq!(run("1 == \"1\""), Value::Boolean(false));
        assert_eq!(run("nil == nil"), Value::Boolean(true));
        assert_eq!(run("false != nil"), Value::Boolean(true));
        assert_eq!(run("\"a\" == \"a\""), Value::Boolean(true));
        assert_eq!(run("(0 / 0) == (0 / 0)"), Value::Boolean(false));
    }

    #[test]
    fn unary() {
        assert_eq!(run("-5"), Value::Number(-5.0));
        assert_eq!(run("!false"), Value::Boolean(true));
        assert_eq!(run("!nil"), Value::Boolean(true));
        assert_eq!(run("!0"), Value::Boolean(false));
        assert_eq!(run("!\"\""), Value::Boolean(false));
        let err = run_err("-\"a\"");
        assert_eq!(err.message(), "Operand must be a number.");
        assert_eq!(err.to_string(), "[line 1] Error at '-': Operand must be a number.");
    }

    #[test]
    fn runtime_error_reports_operator_line() {
        let err = run_err("1 +\n\n true");
        assert_eq!(err.line(), 1);
        let err = run_err("1\n*\nnil");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn mismatch_is_recorded_not_returned() {
        // - "a" 1
        let expr = Expr::binary(
            Expr::literal(token(TokenType::String, "\"a\"", Some(Literal::String("a".to_string())))),
            token(TokenType::Minus, "-", None),
            Expr::literal(token(TokenType::Number, "1", Some(Literal::Number(1.0)))),
        );
        let mut diagnostics = Diagnostics::new();
        assert_eq!(Interpreter::new().interpret(&expr, &mut diagnostics), None);
        let errors = diagnostics.drain_runtime();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Operands must be numbers.");
    }

    #[test]
    fn error_stops_the_rest_of_the_expression() {
        let mut diagnostics = Diagnostics::new();
        let value = Interpreter::new().interpret(&parse("(-nil) + (1 - \"x\")"), &mut diagnostics);
        assert_eq!(value, None);
        let errors = diagnostics.drain_runtime();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Operand must be a number.");
    }

    #[test]
    fn evaluation_is_repeatable() {
        let expr = parse("\"x\" + \"y\" == \"xy\"");
        let mut interpreter = Interpreter::new();
        let first = interpreter.evaluate(&expr).expect("first");
        let second = interpreter.evaluate(&expr).expect("second");
        assert_eq!(first, second);
        assert_eq!(first, Value::Boolean(true));
    }

    #[test]
    #[should_panic(expected = "literal node holds a IDENTIFIER token")]
    fn non_literal_token_is_a_bug() {
        let expr = Expr::literal(token(TokenType::Identifier, "x", None));
        let _ = Interpreter::new().evaluate(&expr);
    }
}
