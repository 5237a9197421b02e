//! Mini-C Lexer
//!
//! Tokenizes mini-C source code on demand, skipping whitespace and
//! `//`-to-end-of-line comments. Two-character operators (`==`, `!=`,
//! `<=`, `>=`, `&&`, `||`) take priority over their one-character
//! prefixes.

pub mod stream;
pub mod token;

pub use stream::TokenStream;
pub use token::{Token, TokenType};

use mcc_common::{CompilerError, SourceLocation};
use std::collections::HashMap;

/// Mini-C lexer
///
/// Owns the read cursor and the current line/column; `next_token` produces
/// one token at a time so the parser controls how far the input is read.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    keywords: HashMap<String, TokenType>,
}

impl Lexer {
    /// Create a new lexer over the full source text
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords: HashMap::new(),
        };

        lexer.initialize_keywords();
        lexer
    }

    /// Initialize the reserved-word table
    ///
    /// `true` and `false` are reserved words that lex as boolean literals.
    fn initialize_keywords(&mut self) {
        let keywords = [
            ("int", TokenType::Int),
            ("float", TokenType::Float),
            ("bool", TokenType::Bool),
            ("void", TokenType::Void),
            ("extern", TokenType::Extern),
            ("if", TokenType::If),
            ("else", TokenType::Else),
            ("while", TokenType::While),
            ("return", TokenType::Return),
            ("true", TokenType::BoolLiteral(true)),
            ("false", TokenType::BoolLiteral(false)),
        ];

        for (keyword, token_type) in keywords {
            self.keywords.insert(keyword.to_string(), token_type);
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to the next character, updating line and column
    fn advance(&mut self) -> Option<char> {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' || ch == '\r' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Skip whitespace and `//` comments; afterwards the cursor is at the
    /// start of the next token (or at end of input)
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while let Some(ch) = self.current_char() {
                if ch.is_whitespace() {
                    self.advance();
                } else {
                    break;
                }
            }

            if self.current_char() == Some('/') && self.peek_char(1) == Some('/') {
                while let Some(ch) = self.current_char() {
                    if ch == '\n' || ch == '\r' {
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            break;
        }
    }

    /// Tokenize an identifier or reserved word
    fn tokenize_identifier(&mut self) -> (TokenType, String) {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(&identifier) {
            Some(keyword_token) => (keyword_token.clone(), identifier),
            None => (TokenType::Identifier(identifier.clone()), identifier),
        }
    }

    /// Tokenize a numeric literal
    ///
    /// `[0-9]+` is an integer; `[0-9]+.[0-9]*` and `.[0-9]+` are floats.
    fn tokenize_number(&mut self, start: SourceLocation) -> Result<(TokenType, String), CompilerError> {
        let mut text = String::new();
        let mut is_float = false;

        if self.current_char() == Some('.') {
            is_float = true;
            text.push('.');
            self.advance();
            while let Some(ch) = self.current_char() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        } else {
            while let Some(ch) = self.current_char() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            if self.current_char() == Some('.') {
                is_float = true;
                text.push('.');
                self.advance();
                while let Some(ch) = self.current_char() {
                    if ch.is_ascii_digit() {
                        text.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        if is_float {
            let value: f32 = text.parse().map_err(|_| {
                CompilerError::lexer_error(format!("Malformed float literal: {text}"), start)
            })?;
            Ok((TokenType::FloatLiteral(value), text))
        } else {
            let value: i32 = text.parse().map_err(|_| {
                CompilerError::lexer_error(format!("Malformed integer literal: {text}"), start)
            })?;
            Ok((TokenType::IntLiteral(value), text))
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_whitespace_and_comments();

        let start = self.current_location();

        let (token_type, lexeme) = match self.current_char() {
            None => return Ok(Token::eof(start)),

            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.tokenize_identifier(),

            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.tokenize_number(start)?,

            Some('=') => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    (TokenType::EqualEqual, "==".to_string())
                } else {
                    (TokenType::Assign, "=".to_string())
                }
            }

            Some('!') => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    (TokenType::BangEqual, "!=".to_string())
                } else {
                    (TokenType::Bang, "!".to_string())
                }
            }

            Some('<') => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    (TokenType::LessEqual, "<=".to_string())
                } else {
                    (TokenType::Less, "<".to_string())
                }
            }

            Some('>') => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    (TokenType::GreaterEqual, ">=".to_string())
                } else {
                    (TokenType::Greater, ">".to_string())
                }
            }

            Some('&') => {
                self.advance();
                if self.current_char() == Some('&') {
                    self.advance();
                    (TokenType::AmpAmp, "&&".to_string())
                } else {
                    return Err(CompilerError::lexer_error("Unexpected character: &", start));
                }
            }

            Some('|') => {
                self.advance();
                if self.current_char() == Some('|') {
                    self.advance();
                    (TokenType::PipePipe, "||".to_string())
                } else {
                    return Err(CompilerError::lexer_error("Unexpected character: |", start));
                }
            }

            // Division; `//` was consumed above as a comment
            Some('/') => {
                self.advance();
                (TokenType::Slash, "/".to_string())
            }

            Some('+') => {
                self.advance();
                (TokenType::Plus, "+".to_string())
            }
            Some('-') => {
                self.advance();
                (TokenType::Minus, "-".to_string())
            }
            Some('*') => {
                self.advance();
                (TokenType::Star, "*".to_string())
            }
            Some('%') => {
                self.advance();
                (TokenType::Percent, "%".to_string())
            }
            Some('(') => {
                self.advance();
                (TokenType::LeftParen, "(".to_string())
            }
            Some(')') => {
                self.advance();
                (TokenType::RightParen, ")".to_string())
            }
            Some('{') => {
                self.advance();
                (TokenType::LeftBrace, "{".to_string())
            }
            Some('}') => {
                self.advance();
                (TokenType::RightBrace, "}".to_string())
            }
            Some(';') => {
                self.advance();
                (TokenType::Semicolon, ";".to_string())
            }
            Some(',') => {
                self.advance();
                (TokenType::Comma, ",".to_string())
            }

            Some(ch) => {
                return Err(CompilerError::lexer_error(
                    format!("Unexpected character: {ch}"),
                    start,
                ));
            }
        };

        Ok(Token::new(token_type, lexeme, start))
    }

    /// Tokenize the entire input (used by tests and diagnostics)
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_identifiers() {
        let mut lexer = Lexer::new("int main void return if else while extern");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens.len(), 9); // 8 tokens + EOF
        assert!(matches!(tokens[0].token_type, TokenType::Int));
        assert!(matches!(tokens[1].token_type, TokenType::Identifier(_)));
        assert!(matches!(tokens[2].token_type, TokenType::Void));
        assert!(matches!(tokens[3].token_type, TokenType::Return));
        assert!(matches!(tokens[4].token_type, TokenType::If));
        assert!(matches!(tokens[5].token_type, TokenType::Else));
        assert!(matches!(tokens[6].token_type, TokenType::While));
        assert!(matches!(tokens[7].token_type, TokenType::Extern));
    }

    #[test]
    fn test_bool_literals_are_reserved_words() {
        let mut lexer = Lexer::new("true false truth");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].token_type, TokenType::BoolLiteral(true));
        assert_eq!(tokens[1].token_type, TokenType::BoolLiteral(false));
        assert!(matches!(tokens[2].token_type, TokenType::Identifier(_)));
    }

    #[test]
    fn test_operators() {
        let mut lexer = Lexer::new("+ - * / % == != <= >= < > && || ! =");
        let tokens = lexer.tokenize().unwrap();

        let expected = [
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Percent,
            TokenType::EqualEqual,
            TokenType::BangEqual,
            TokenType::LessEqual,
            TokenType::GreaterEqual,
            TokenType::Less,
            TokenType::Greater,
            TokenType::AmpAmp,
            TokenType::PipePipe,
            TokenType::Bang,
            TokenType::Assign,
            TokenType::EndOfFile,
        ];

        for (i, expected_type) in expected.iter().enumerate() {
            assert_eq!(tokens[i].token_type, *expected_type);
        }
    }

    #[test]
    fn test_numeric_literals() {
        let mut lexer = Lexer::new("0 42 3.25 .5 7.");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].token_type, TokenType::IntLiteral(0));
        assert_eq!(tokens[1].token_type, TokenType::IntLiteral(42));
        assert_eq!(tokens[2].token_type, TokenType::FloatLiteral(3.25));
        assert_eq!(tokens[3].token_type, TokenType::FloatLiteral(0.5));
        assert_eq!(tokens[4].token_type, TokenType::FloatLiteral(7.0));
    }

    #[test]
    fn test_lexemes_are_verbatim() {
        let mut lexer = Lexer::new("x1 <= 3.25");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].lexeme, "x1");
        assert_eq!(tokens[1].lexeme, "<=");
        assert_eq!(tokens[2].lexeme, "3.25");
    }

    #[test]
    fn test_comments_are_skipped() {
        let mut lexer = Lexer::new("int x; // declare x\nx = 1; // assign");
        let tokens = lexer.tokenize().unwrap();

        // int x ; x = 1 ; EOF
        assert_eq!(tokens.len(), 8);
        assert!(matches!(tokens[3].token_type, TokenType::Identifier(_)));
        assert_eq!(tokens[3].location.line, 2);
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new("int x;\n  x = 1;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!((tokens[0].location.line, tokens[0].location.column), (1, 1));
        assert_eq!((tokens[1].location.line, tokens[1].location.column), (1, 5));
        assert_eq!((tokens[3].location.line, tokens[3].location.column), (2, 3));
    }

    #[test]
    fn test_division_vs_comment() {
        let mut lexer = Lexer::new("a / b");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[1].token_type, TokenType::Slash);
    }

    #[test]
    fn test_lone_ampersand_is_an_error() {
        let mut lexer = Lexer::new("a & b");
        assert!(lexer.tokenize().is_err());
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("int x @");
        let err = lexer.tokenize().unwrap_err();
        assert!(format!("{err}").contains("Unexpected character"));
    }

    #[test]
    fn test_integer_overflow_is_fatal() {
        let mut lexer = Lexer::new("99999999999999999999");
        assert!(lexer.tokenize().is_err());
    }
}
