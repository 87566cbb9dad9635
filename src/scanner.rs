use crate::error::{Diagnostics, LexingError};
use crate::token::{Literal, TokenType, Token};

pub struct Scanner {
    chars: Vec<char>,
    tokens: Vec<Token>,
    line: usize,
    start: usize,
    current: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            tokens: Vec::new(),
            line: 1,
            start: 0,
            current: 0,
        }
    }

    fn at(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.at();
        self.current += 1;
        ch
    }

    /// Consumes the current character only if it is `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.is_eof() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn is_eof(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn create_token(&mut self, kind: TokenType, literal: Option<Literal>) {
        let token = Token::new(self.line, kind, self.lexeme(), literal);
        self.tokens.push(token);
    }

    pub fn tokenize(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_eof() {
            self.start = self.current;
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::new(self.line, TokenType::End, "", None));
        self.tokens
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let ch = self.advance();

        match ch {
            '(' => self.create_token(TokenType::LeftParen, None),
            ')' => self.create_token(TokenType::RightParen, None),
            '{' => self.create_token(TokenType::LeftBrace, None),
            '}' => self.create_token(TokenType::RightBrace, None),
            ',' => self.create_token(TokenType::Comma, None),
            '.' => self.create_token(TokenType::Dot, None),
            '-' => self.create_token(TokenType::Minus, None),
            '+' => self.create_token(TokenType::Plus, None),
            ';' => self.create_token(TokenType::Semicolon, None),
            '*' => self.create_token(TokenType::Star, None),
            '!' => {
                let kind = if self.matches('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.create_token(kind, None);
            }
            '=' => {
                let kind = if self.matches('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.create_token(kind, None);
            }
            '<' => {
                let kind = if self.matches('=') { TokenType::LessEqual } else { TokenType::Less };
                self.create_token(kind, None);
            }
            '>' => {
                let kind = if self.matches('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.create_token(kind, None);
            }
            '/' => {
                if self.matches('/') {
                    // Single-line comment
                    while !self.is_eof() && self.at() != '\n' {
                        self.advance();
                    }
                } else {
                    self.create_token(TokenType::Slash, None);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(diagnostics),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),
            c => {
                diagnostics.report_syntax(LexingError::new(
                    format!("Invalid character '{}'.", c),
                    self.line,
                ));
            }
        }
    }

    fn string(&mut self, diagnostics: &mut Diagnostics) {
        let start_line = self.line;

        while !self.is_eof() && self.at() != '"' {
            if self.at() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_eof() {
            diagnostics.report_syntax(LexingError::new(
                "Unterminated string.".to_string(),
                start_line,
            ));
            return;
        }

        // The closing quote.
        self.advance();

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.create_token(TokenType::String, Some(Literal::String(value)));
    }

    fn number(&mut self) {
        while self.at().is_ascii_digit() {
            self.advance();
        }

        // A fractional part needs at least one digit after the dot.
        if self.at() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.at().is_ascii_digit() {
                self.advance();
            }
        }

        // Only ASCII digits and at most one interior dot were consumed.
        let value = self.lexeme().parse::<f64>().unwrap_or(f64::NAN);
        self.create_token(TokenType::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while is_alpha(self.at()) || self.at().is_ascii_digit() {
            self.advance();
        }

        let kind = get_keyword_token(&self.lexeme()).unwrap_or(TokenType::Identifier);
        self.create_token(kind, None);
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn get_keyword_token(ident: &str) -> Option<TokenType> {
    match ident {
        "and" => Some(TokenType::And),
        "class" => Some(TokenType::Class),
        "else" => Some(TokenType::Else),
        "false" => Some(TokenType::False),
        "for" => Some(TokenType::For),
        "fun" => Some(TokenType::Fun),
        "if" => Some(TokenType::If),
        "nil" => Some(TokenType::Nil),
        "or" => Some(TokenType::Or),
        "print" => Some(TokenType::Print),
        "return" => Some(TokenType::Return),
        "super" => Some(TokenType::Super),
        "this" => Some(TokenType::This),
        "true" => Some(TokenType::True),
        "var" => Some(TokenType::Var),
        "while" => Some(TokenType::While),
        _ => None,
    }
}
