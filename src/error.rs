use crate::token::{Token, TokenType};
use std::error::Error;
use std::fmt;
use std::mem;

#[derive(Debug)]
pub enum LoxError {
    FileNotFound(String),
    IO(std::io::Error),
    Config(String),
    Syntax { source: String, errors: Vec<SyntaxError> },
    Runtime { source: String, errors: Vec<RuntimeError> },
}

impl Error for LoxError {}

impl fmt::Display for LoxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoxError::IO(err) => writeln!(f, "IOError: {}", err),
            LoxError::FileNotFound(err) => writeln!(f, "FileNotFoundError: {}", err),
            LoxError::Config(err) => writeln!(f, "ConfigError: {}", err),
            LoxError::Syntax { source, errors } => {
                for err in errors {
                    writeln!(f, "SyntaxError: {}", err)?;
                }
                writeln!(f, "  --> {}", source)
            }
            LoxError::Runtime { source, errors } => {
                for err in errors {
                    writeln!(f, "RuntimeError: {}", err)?;
                }
                writeln!(f, "  --> {}", source)
            }
        }
    }
}

impl From<std::io::Error> for LoxError {
    fn from(err: std::io::Error) -> Self {
        LoxError::IO(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexingError {
    pub(crate) message: String,
    pub(crate) line: usize,
}

impl Error for LexingError {}

impl LexingError {
    pub fn new(message: String, line: usize) -> Self {
        Self { message, line }
    }
}

impl fmt::Display for LexingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

/// Where in the token stream a parse error was detected.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    AtEnd,
    Lexeme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) location: Location,
}

impl Error for ParseError {}

impl ParseError {
    pub fn from_token(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.kind == TokenType::End {
            Location::AtEnd
        } else {
            Location::Lexeme(token.lexeme.clone())
        };

        Self {
            message: message.into(),
            line: token.line,
            location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.location {
            Location::AtEnd => write!(f, "[line {}] Error at end: {}", self.line, self.message),
            Location::Lexeme(lexeme) => write!(
                f,
                "[line {}] Error at '{}': {}",
                self.line, lexeme, self.message
            ),
        }
    }
}

/// Anything reported before evaluation starts: lexing and parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    Lexing(LexingError),
    Parse(ParseError),
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Lexing(err) => err.line,
            SyntaxError::Parse(err) => err.line,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SyntaxError::Lexing(err) => &err.message,
            SyntaxError::Parse(err) => &err.message,
        }
    }
}

impl Error for SyntaxError {}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxError::Lexing(err) => fmt::Display::fmt(err, f),
            SyntaxError::Parse(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<LexingError> for SyntaxError {
    fn from(err: LexingError) -> Self {
        SyntaxError::Lexing(err)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(err: ParseError) -> Self {
        SyntaxError::Parse(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) lexeme: String,
}

impl Error for RuntimeError {}

impl RuntimeError {
    pub fn from_token(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: token.line,
            lexeme: token.lexeme.clone(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[line {}] Error at '{}': {}",
            self.line, self.lexeme, self.message
        )
    }
}

/// Errors collected over one run. The caller owns it and drains it between
/// runs; nothing here is shared between runs.
#[derive(Debug, Default)]
pub struct Diagnostics {
    syntax: Vec<SyntaxError>,
    runtime: Vec<RuntimeError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_syntax(&mut self, err: impl Into<SyntaxError>) {
        self.syntax.push(err.into());
    }

    pub fn report_runtime(&mut self, err: RuntimeError) {
        self.runtime.push(err);
    }

    pub fn has_syntax_errors(&self) -> bool {
        !self.syntax.is_empty()
    }

    pub fn has_runtime_errors(&self) -> bool {
        !self.runtime.is_empty()
    }

    pub fn syntax_errors(&self) -> &[SyntaxError] {
        &self.syntax
    }

    pub fn runtime_errors(&self) -> &[RuntimeError] {
        &self.runtime
    }

    pub fn drain_syntax(&mut self) -> Vec<SyntaxError> {
        mem::take(&mut self.syntax)
    }

    pub fn drain_runtime(&mut self) -> Vec<RuntimeError> {
        mem::take(&mut self.runtime)
    }

    /// Renders errors one per line, in the order they were reported.
    pub fn dump<E: fmt::Display>(errors: &[E]) -> String {
        errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
