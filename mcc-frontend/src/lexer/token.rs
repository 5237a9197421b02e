//! Token definitions for the mini-C lexer
//!
//! This module defines token types and the Token struct.

use mcc_common::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mini-C token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    IntLiteral(i32),
    FloatLiteral(f32),
    BoolLiteral(bool),

    // Identifiers
    Identifier(String),

    // Keywords
    Int,
    Float,
    Bool,
    Void,
    Extern,
    If,
    Else,
    While,
    Return,

    // Operators
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    Bang,         // !
    Assign,       // =
    Less,         // <
    Greater,      // >
    LessEqual,    // <=
    GreaterEqual, // >=
    EqualEqual,   // ==
    BangEqual,    // !=
    AmpAmp,       // &&
    PipePipe,     // ||

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Semicolon,  // ;
    Comma,      // ,

    // Special
    EndOfFile,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(n) => write!(f, "{n}"),
            TokenType::FloatLiteral(x) => write!(f, "{x}"),
            TokenType::BoolLiteral(b) => write!(f, "{b}"),
            TokenType::Identifier(s) => write!(f, "{s}"),

            TokenType::Int => write!(f, "int"),
            TokenType::Float => write!(f, "float"),
            TokenType::Bool => write!(f, "bool"),
            TokenType::Void => write!(f, "void"),
            TokenType::Extern => write!(f, "extern"),
            TokenType::If => write!(f, "if"),
            TokenType::Else => write!(f, "else"),
            TokenType::While => write!(f, "while"),
            TokenType::Return => write!(f, "return"),

            TokenType::Plus => write!(f, "+"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Star => write!(f, "*"),
            TokenType::Slash => write!(f, "/"),
            TokenType::Percent => write!(f, "%"),
            TokenType::Bang => write!(f, "!"),
            TokenType::Assign => write!(f, "="),
            TokenType::Less => write!(f, "<"),
            TokenType::Greater => write!(f, ">"),
            TokenType::LessEqual => write!(f, "<="),
            TokenType::GreaterEqual => write!(f, ">="),
            TokenType::EqualEqual => write!(f, "=="),
            TokenType::BangEqual => write!(f, "!="),
            TokenType::AmpAmp => write!(f, "&&"),
            TokenType::PipePipe => write!(f, "||"),

            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::Comma => write!(f, ","),

            TokenType::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// A token with its verbatim lexeme and source position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenType::EndOfFile, "", location)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::EndOfFile)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.location)
    }
}
