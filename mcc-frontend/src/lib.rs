//! mcc - Compiler Frontend
//!
//! This crate provides the whole language pipeline for the mcc mini-C
//! compiler:
//! - Lexer: tokenizes mini-C source on demand
//! - Parser: recursive descent, builds the AST
//! - AST: abstract syntax tree definitions and a diagnostic printer
//! - Codegen: type/scope analysis and lowering to IR
//! - IR: the module under construction and its textual serialization

pub mod ast;
pub mod codegen;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod types;

pub use ast::{Decl, Expression, Program, Statement};
pub use codegen::CodeGenerator;
pub use ir::Module;
pub use lexer::{Lexer, Token, TokenStream, TokenType};
pub use parser::Parser;
pub use types::Type;

use mcc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source code (for debugging and tests)
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        let mut lexer = Lexer::new(source);
        lexer.tokenize()
    }

    /// Parse mini-C source code into an AST
    pub fn parse_source(source: &str) -> Result<Program, CompilerError> {
        let stream = TokenStream::new(Lexer::new(source))?;
        let mut parser = Parser::new(stream);
        parser.parse_program()
    }

    /// Compile mini-C source code to an IR module
    pub fn compile_to_ir(source: &str, module_name: &str) -> Result<Module, CompilerError> {
        let program = Self::parse_source(source)?;

        log::info!("parsing finished, lowering to IR");
        let codegen = CodeGenerator::new(module_name);
        codegen.generate(&program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_tokenize() {
        let tokens = Frontend::tokenize_source("int x;").unwrap();
        // int, x, ;, EOF
        assert_eq!(tokens.len(), 4);
        assert!(matches!(tokens[0].token_type, TokenType::Int));
    }

    #[test]
    fn test_frontend_parse() {
        let program = Frontend::parse_source("int main(){ return 42; }").unwrap();
        assert_eq!(program.decls.len(), 1);
    }

    #[test]
    fn test_frontend_compile_end_to_end() {
        let module = Frontend::compile_to_ir(
            "extern int putchar(int c);\n\
             int g;\n\
             int main(){\n\
               g = 5;\n\
               putchar(65);\n\
               return g;\n\
             }\n",
            "mini-c",
        )
        .unwrap();

        let printed = format!("{module}");
        assert!(printed.contains("; ModuleID = 'mini-c'"));
        assert!(printed.contains("declare i32 @putchar(i32)"));
        assert!(printed.contains("@g = common global i32 0, align 4"));
        assert!(printed.contains("define i32 @main()"));
    }

    #[test]
    fn test_frontend_reports_first_error_only() {
        let err = Frontend::compile_to_ir("int main(){ return y; }", "m").unwrap_err();
        assert_eq!(
            format!("{err}"),
            "Ln: 1, Col: 20 - Semantic Error: Unknown variable name called"
        );
    }
}
