use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Token {
    pub(crate) line: usize,
    pub(crate) kind: TokenType,
    pub(crate) lexeme: String,
    pub(crate) literal: Option<Literal>,
}

impl Token {
    pub fn new(line: usize, kind: TokenType, lexeme: impl Into<String>, literal: Option<Literal>) -> Self {
        Self {
            line,
            kind,
            lexeme: lexeme.into(),
            literal,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }
}

/// Payload carried by NUMBER and STRING tokens.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    String(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    // Single-character tokens
    LeftParen,   // (
    RightParen,  // )
    LeftBrace,   // {
    RightBrace,  // }
    Comma,       // ,
    Dot,         // .
    Minus,       // -
    Plus,        // +
    Semicolon,   // ;
    Slash,       // /
    Star,        // *

    // One or two character tokens
    Bang,         // !
    BangEqual,    // !=
    Equal,        // =
    EqualEqual,   // ==
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    End         // End of input marker
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::LeftParen => "LEFT_PAREN",
            TokenType::RightParen => "RIGHT_PAREN",
            TokenType::LeftBrace => "LEFT_BRACE",
            TokenType::RightBrace => "RIGHT_BRACE",
            TokenType::Comma => "COMMA",
            TokenType::Dot => "DOT",
            TokenType::Minus => "MINUS",
            TokenType::Plus => "PLUS",
            TokenType::Semicolon => "SEMICOLON",
            TokenType::Slash => "SLASH",
            TokenType::Star => "STAR",
            TokenType::Bang => "BANG",
            TokenType::BangEqual => "BANG_EQUAL",
            TokenType::Equal => "EQUAL",
            TokenType::EqualEqual => "EQUAL_EQUAL",
            TokenType::Greater => "GREATER",
            TokenType::GreaterEqual => "GREATER_EQUAL",
            TokenType::Less => "LESS",
            TokenType::LessEqual => "LESS_EQUAL",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::String => "STRING",
            TokenType::Number => "NUMBER",
            TokenType::And => "AND",
            TokenType::Class => "CLASS",
            TokenType::Else => "ELSE",
            TokenType::False => "FALSE",
            TokenType::Fun => "FUN",
            TokenType::For => "FOR",
            TokenType::If => "IF",
            TokenType::Nil => "NIL",
            TokenType::Or => "OR",
            TokenType::Print => "PRINT",
            TokenType::Return => "RETURN",
            TokenType::Super => "SUPER",
            TokenType::This => "THIS",
            TokenType::True => "TRUE",
            TokenType::Var => "VAR",
            TokenType::While => "WHILE",
            TokenType::End => "END",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{:?}", n),
            Literal::String(s) => write!(f, "{}", s),
        }
    }
}

/// One line of the `--tokens` dump: `KIND "lexeme" literal`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, " {}", literal),
            None => write!(f, " null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let token = Token::new(2, TokenType::Plus, "+", None);
        let kind: TokenType = token.kind();
        assert_eq!(kind, TokenType::Plus);
        assert_eq!(token.line(), 2);
        assert_eq!(token.lexeme(), "+");
        assert!(token.literal().is_none());
    }

    #[test]
    fn display_includes_literal() {
        let token = Token::new(1, TokenType::Number, "12", Some(Literal::Number(12.0)));
        assert_eq!(token.to_string(), "NUMBER \"12\" 12.0");

        let token = Token::new(1, TokenType::String, "\"hi\"", Some(Literal::String("hi".to_string())));
        assert_eq!(token.to_string(), "STRING \"\\\"hi\\\"\" hi");

        let token = Token::new(3, TokenType::GreaterEqual, ">=", None);
        assert_eq!(token.to_string(), "GREATER_EQUAL \">=\" null");
    }

    #[test]
    fn serializes_kind_in_screaming_case() {
        let token = Token::new(2, TokenType::BangEqual, "!=", None);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["kind"], "BANG_EQUAL");
        assert_eq!(json["line"], 2);
        assert!(json["literal"].is_null());
    }
}
