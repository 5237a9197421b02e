//! Error handling for the mcc compiler
//!
//! This module defines the common error type used throughout the compiler.
//! All errors are fatal: phases return them up to the driver, which prints
//! a single diagnostic to stderr and exits non-zero.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
///
/// Lexical failures are reported in the "Syntax Error" diagnostic category;
/// the variant stays distinct so callers can tell the phases apart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("{location} - Syntax Error: {message}")]
    Lex {
        location: SourceLocation,
        message: String,
    },

    #[error("{location} - Syntax Error: {message}")]
    Parse {
        location: SourceLocation,
        message: String,
    },

    #[error("{location} - Semantic Error: {message}")]
    Semantic {
        location: SourceLocation,
        message: String,
    },

    #[error("Code generation error: {message}")]
    Codegen { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Lex {
            location,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Parse {
            location,
            message: message.into(),
        }
    }

    /// Create a semantic error
    pub fn semantic_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Semantic {
            location,
            message: message.into(),
        }
    }

    /// Create a codegen error (internal builder misuse, not a user diagnostic)
    pub fn codegen_error(message: impl Into<String>) -> Self {
        CompilerError::Codegen {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_format() {
        let err = CompilerError::parse_error("Expected ;", SourceLocation::new(3, 14));
        assert_eq!(format!("{}", err), "Ln: 3, Col: 14 - Syntax Error: Expected ;");
    }

    #[test]
    fn test_semantic_error_format() {
        let err = CompilerError::semantic_error(
            "Unknown variable name called",
            SourceLocation::new(7, 2),
        );
        assert_eq!(
            format!("{}", err),
            "Ln: 7, Col: 2 - Semantic Error: Unknown variable name called"
        );
    }

    #[test]
    fn test_lex_error_reports_syntax_category() {
        let err = CompilerError::lexer_error("Unexpected character: @", SourceLocation::new(1, 5));
        assert!(format!("{}", err).contains("Syntax Error"));
    }
}
