//! # lox-expr
//!
//! Front end and tree-walking evaluator for Lox expressions: source text is
//! scanned into tokens, parsed into an [`ast::Expr`] and evaluated into a
//! [`value::Value`]. Errors are never printed by the library; they are
//! collected into a caller-owned [`error::Diagnostics`].

pub mod ast;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod report;
pub mod scanner;
pub mod token;
pub mod value;

use crate::ast::Expr;
use crate::error::Diagnostics;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::token::Token;
use crate::value::Value;

pub use crate::parser::DEFAULT_MAX_DEPTH;

/// Everything one run produced. `expr` is `None` when parsing failed and
/// `value` is `None` when either parsing or evaluation failed.
#[derive(Debug)]
pub struct Run {
    pub tokens: Vec<Token>,
    pub expr: Option<Expr>,
    pub value: Option<Value>,
}

pub fn scan(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Scanner::new(source).tokenize(diagnostics)
}

pub fn parse(tokens: &[Token], max_depth: usize, diagnostics: &mut Diagnostics) -> Option<Expr> {
    Parser::new(tokens).with_max_depth(max_depth).parse(diagnostics)
}

/// Scans, parses and, if no syntax error was recorded, evaluates `source`.
///
/// # Examples
/// ```
/// use lox_expr::{error::Diagnostics, run, value::Value, DEFAULT_MAX_DEPTH};
///
/// let mut diagnostics = Diagnostics::new();
/// let result = run("1 + 2 * 3", DEFAULT_MAX_DEPTH, &mut diagnostics);
/// assert_eq!(result.value, Some(Value::Number(7.0)));
///
/// let result = run("1 + \"a\"", DEFAULT_MAX_DEPTH, &mut diagnostics);
/// assert_eq!(result.value, None);
/// assert_eq!(diagnostics.drain_runtime().len(), 1);
/// ```
pub fn run(source: &str, max_depth: usize, diagnostics: &mut Diagnostics) -> Run {
    // Errors already held by `diagnostics` belong to earlier runs.
    let reported = diagnostics.syntax_errors().len();
    let tokens = scan(source, diagnostics);
    let expr = parse(&tokens, max_depth, diagnostics);

    let value = match &expr {
        Some(expr) if diagnostics.syntax_errors().len() == reported => {
            Interpreter::new().interpret(expr, diagnostics)
        }
        _ => None,
    };

    Run { tokens, expr, value }
}
