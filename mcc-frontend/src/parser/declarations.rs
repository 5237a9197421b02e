//! Top-level declaration parsing: externs, globals, function definitions
//!
//! `int|float|bool IDENT` can begin either a global variable or a function
//! definition; only the token after the identifier decides, so this is the
//! one place the parser needs two-token lookahead.

use crate::ast::{Decl, FunctionDefinition, Param, Prototype, VarDecl};
use crate::lexer::TokenType;
use crate::parser::Parser;
use crate::types::Type;
use mcc_common::CompilerError;

impl Parser {
    /// Parse `int | float | bool` (consuming it)
    pub(crate) fn parse_var_type(&mut self) -> Result<Type, CompilerError> {
        let ty = match self.current().token_type {
            TokenType::Int => Type::Int,
            TokenType::Float => Type::Float,
            TokenType::Bool => Type::Bool,
            _ => {
                return Err(
                    self.syntax_error("Expected variable type - 'int', 'float', or 'bool'")
                )
            }
        };
        self.advance()?;
        Ok(ty)
    }

    /// Parse `void | var_type` (consuming it)
    pub(crate) fn parse_type_spec(&mut self) -> Result<Type, CompilerError> {
        if self.check(&TokenType::Void) {
            self.advance()?;
            return Ok(Type::Void);
        }
        if self.starts_var_type() {
            return self.parse_var_type();
        }
        Err(self.syntax_error("Expected type specifier - 'int', 'float', 'bool', or 'void'"))
    }

    /// Parse `var_type IDENT ';'` (used for globals and block locals)
    pub(crate) fn parse_var_decl(&mut self) -> Result<VarDecl, CompilerError> {
        let var_type = self.parse_var_type()?;
        let (name, location) = self.expect_identifier("Expected variable name")?;
        self.expect(TokenType::Semicolon, "Expected ;")?;

        Ok(VarDecl {
            name,
            var_type,
            location,
        })
    }

    /// Parse `var_type IDENT` as a function parameter
    fn parse_param(&mut self) -> Result<Param, CompilerError> {
        let param_type = self.parse_var_type()?;
        let (name, location) = self.expect_identifier("Expected variable name")?;

        Ok(Param {
            name,
            param_type,
            location,
        })
    }

    /// Parse a parameter list (the caller has consumed `(`)
    ///
    /// Either empty, the lone marker `void` (normalized to an empty list),
    /// or one or more typed, named parameters.
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, CompilerError> {
        if self.check(&TokenType::Void) {
            self.advance()?;
            return Ok(Vec::new());
        }

        if self.check(&TokenType::RightParen) {
            return Ok(Vec::new());
        }

        if !self.starts_var_type() {
            return Err(self.syntax_error(
                "Incorrect parameter declaration - expected parameter type, 'void' or ')'",
            ));
        }

        let mut params = vec![self.parse_param()?];
        while self.check(&TokenType::Comma) {
            self.advance()?;
            params.push(self.parse_param()?);
        }

        Ok(params)
    }

    /// Parse `type_spec IDENT '(' params ')' block`
    pub(crate) fn parse_fun_decl(&mut self) -> Result<FunctionDefinition, CompilerError> {
        let return_type = self.parse_type_spec()?;
        let (name, location) = self.expect_identifier("Expected function name")?;

        self.expect(TokenType::LeftParen, "Expected (")?;
        let params = self.parse_params()?;
        self.expect(TokenType::RightParen, "Expected )")?;

        let body = self.parse_block()?;

        Ok(FunctionDefinition {
            proto: Prototype {
                name,
                return_type,
                params,
                location,
            },
            body,
        })
    }

    /// Parse one top-level declaration, disambiguating with two-token
    /// lookahead: after `var_type IDENT`, `(` means function, `;` means
    /// variable.
    pub(crate) fn parse_decl(&mut self) -> Result<Decl, CompilerError> {
        if self.check(&TokenType::Void) {
            return Ok(Decl::Function(self.parse_fun_decl()?));
        }

        if !self.starts_var_type() {
            return Err(
                self.syntax_error("Expected type specifier - 'int', 'float', 'bool', or 'void'")
            );
        }

        if !matches!(self.tokens.peek1()?.token_type, TokenType::Identifier(_)) {
            return Err(self.syntax_error("Expected function or variable name"));
        }

        let after_name = self.tokens.peek2()?.token_type.clone();
        match after_name {
            TokenType::LeftParen => Ok(Decl::Function(self.parse_fun_decl()?)),
            TokenType::Semicolon => Ok(Decl::Global(self.parse_var_decl()?)),
            _ => Err(self
                .syntax_error("Expected ; or ( for variable and function declaration respectively")),
        }
    }

    /// Parse `'extern' type_spec IDENT '(' params ')' ';'`
    pub(crate) fn parse_extern(&mut self) -> Result<Prototype, CompilerError> {
        self.expect(TokenType::Extern, "Expected 'extern' keyword")?;

        let return_type = self.parse_type_spec()?;
        let (name, location) = self.expect_identifier("Expected function name")?;

        self.expect(TokenType::LeftParen, "Expected (")?;
        let params = self.parse_params()?;
        self.expect(TokenType::RightParen, "Expected )")?;
        self.expect(TokenType::Semicolon, "Expected ;")?;

        Ok(Prototype {
            name,
            return_type,
            params,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Program;
    use crate::lexer::{Lexer, TokenStream};

    fn parse(input: &str) -> Result<Program, CompilerError> {
        let stream = TokenStream::new(Lexer::new(input))?;
        Parser::new(stream).parse_program()
    }

    #[test]
    fn test_void_parameter_marker_means_no_params() {
        let program = parse("int f(void){ return 0; }").unwrap();
        match &program.decls[0] {
            Decl::Function(func) => assert!(func.proto.params.is_empty()),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_parameter_list() {
        let program = parse("int add(int a, float b, bool c){ return 0; }").unwrap();
        match &program.decls[0] {
            Decl::Function(func) => {
                let params = &func.proto.params;
                assert_eq!(params.len(), 3);
                assert_eq!(params[0].name, "a");
                assert_eq!(params[0].param_type, Type::Int);
                assert_eq!(params[1].param_type, Type::Float);
                assert_eq!(params[2].param_type, Type::Bool);
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_void_only_as_return_type_for_globals() {
        let err = parse("void g;").unwrap_err();
        // `void` forces the function-declaration production
        assert!(format!("{err}").contains("Expected ("));
    }

    #[test]
    fn test_unnamed_parameter_rejected() {
        let err = parse("int f(int){ return 0; }").unwrap_err();
        assert!(format!("{err}").contains("Expected variable name"));
    }

    #[test]
    fn test_extern_requires_semicolon() {
        let err = parse("extern int putchar(int c) int main(){ return 0; }").unwrap_err();
        assert!(format!("{err}").contains("Expected ;"));
    }

    #[test]
    fn test_bad_parameter_start() {
        let err = parse("int f(42){ return 0; }").unwrap_err();
        assert!(format!("{err}").contains("Incorrect parameter declaration"));
    }
}
