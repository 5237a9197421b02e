//! Mini-C Recursive Descent Parser
//!
//! Consumes the token stream and builds the AST. Expression parsing is
//! stratified across seven precedence levels; the grammar's two ambiguous
//! spots (`IDENT = ...` vs an rvalue, and top-level variable vs function
//! declaration) are resolved with one- and two-token lookahead.
//!
//! Any mismatch is fatal. Diagnostics point at the previous token, i.e.
//! where the parser was expecting the missing construct.

pub mod declarations;
pub mod expressions;
pub mod statements;

use crate::ast::Program;
use crate::lexer::{Token, TokenStream, TokenType};
use mcc_common::CompilerError;

/// Mini-C parser
pub struct Parser {
    pub(crate) tokens: TokenStream,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens }
    }

    /// The token under the cursor
    pub(crate) fn current(&self) -> &Token {
        self.tokens.current()
    }

    /// Check the current token against an expected type (payloads ignored)
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        std::mem::discriminant(&self.current().token_type) == std::mem::discriminant(token_type)
    }

    /// Consume and return the current token
    pub(crate) fn advance(&mut self) -> Result<Token, CompilerError> {
        self.tokens.advance()
    }

    /// Consume the current token if it matches, otherwise fail with `message`
    pub(crate) fn expect(
        &mut self,
        token_type: TokenType,
        message: &str,
    ) -> Result<Token, CompilerError> {
        if self.check(&token_type) {
            self.advance()
        } else {
            Err(self.syntax_error(message))
        }
    }

    /// A syntax error at the previous token's position
    pub(crate) fn syntax_error(&self, message: &str) -> CompilerError {
        CompilerError::parse_error(message, self.tokens.error_location())
    }

    /// Consume an identifier, returning its name and location
    pub(crate) fn expect_identifier(
        &mut self,
        message: &str,
    ) -> Result<(String, mcc_common::SourceLocation), CompilerError> {
        if !matches!(self.current().token_type, TokenType::Identifier(_)) {
            return Err(self.syntax_error(message));
        }
        let token = self.advance()?;
        match token.token_type {
            TokenType::Identifier(name) => Ok((name, token.location)),
            _ => Err(self.syntax_error(message)),
        }
    }

    /// FIRST(expr): tokens that can begin an expression
    pub(crate) fn starts_expression(&self) -> bool {
        matches!(
            self.current().token_type,
            TokenType::Identifier(_)
                | TokenType::IntLiteral(_)
                | TokenType::FloatLiteral(_)
                | TokenType::BoolLiteral(_)
                | TokenType::Minus
                | TokenType::Bang
                | TokenType::LeftParen
        )
    }

    /// FIRST(stmt), as consumed by the statement-list loop
    ///
    /// `else` is deliberately in the set: an orphan `else` must reach
    /// `parse_statement` so it is rejected as a statement, not as a
    /// missing `}`.
    pub(crate) fn starts_statement(&self) -> bool {
        self.starts_expression()
            || matches!(
                self.current().token_type,
                TokenType::Semicolon
                    | TokenType::LeftBrace
                    | TokenType::If
                    | TokenType::While
                    | TokenType::Else
                    | TokenType::Return
            )
    }

    /// FIRST(var_type)
    pub(crate) fn starts_var_type(&self) -> bool {
        matches!(
            self.current().token_type,
            TokenType::Int | TokenType::Float | TokenType::Bool
        )
    }

    /// FIRST(type_spec)
    pub(crate) fn starts_type_spec(&self) -> bool {
        self.starts_var_type() || self.check(&TokenType::Void)
    }

    /// Parse a complete program: externs first, then declarations, then EOF
    pub fn parse_program(&mut self) -> Result<Program, CompilerError> {
        let mut externs = Vec::new();
        while self.check(&TokenType::Extern) {
            externs.push(self.parse_extern()?);
        }

        let mut decls = Vec::new();
        while self.starts_type_spec() {
            decls.push(self.parse_decl()?);
        }

        if !self.current().is_eof() {
            return Err(self.syntax_error("Expected EOF"));
        }

        Ok(Program { externs, decls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::lexer::Lexer;
    use crate::types::Type;

    fn parse(input: &str) -> Result<Program, CompilerError> {
        let stream = TokenStream::new(Lexer::new(input))?;
        Parser::new(stream).parse_program()
    }

    #[test]
    fn test_empty_program() {
        let program = parse("").unwrap();
        assert!(program.externs.is_empty());
        assert!(program.decls.is_empty());
    }

    #[test]
    fn test_simple_function() {
        let program = parse("int main(){ return 42; }").unwrap();
        assert_eq!(program.decls.len(), 1);

        match &program.decls[0] {
            Decl::Function(func) => {
                assert_eq!(func.proto.name, "main");
                assert_eq!(func.proto.return_type, Type::Int);
                assert!(func.proto.params.is_empty());
                assert_eq!(func.body.statements.len(), 1);
                match &func.body.statements[0].kind {
                    StatementKind::Return(Some(expr)) => {
                        assert!(matches!(expr.kind, ExpressionKind::IntLiteral(42)));
                    }
                    other => panic!("expected return, got {other:?}"),
                }
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_extern_then_decls() {
        let program = parse("extern int putchar(int c); int main(){ return 0; }").unwrap();
        assert_eq!(program.externs.len(), 1);
        assert_eq!(program.externs[0].name, "putchar");
        assert_eq!(program.decls.len(), 1);
    }

    #[test]
    fn test_extern_after_decl_is_rejected() {
        let err = parse("int main(){ return 0; } extern int f(void);").unwrap_err();
        assert!(format!("{err}").contains("Expected EOF"));
    }

    #[test]
    fn test_global_vs_function_lookahead() {
        let program = parse("int g; int f(void){ return g; }").unwrap();
        assert!(matches!(program.decls[0], Decl::Global(_)));
        assert!(matches!(program.decls[1], Decl::Function(_)));
    }

    #[test]
    fn test_decl_with_neither_semi_nor_paren() {
        let err = parse("int g =").unwrap_err();
        assert!(format!("{err}")
            .contains("Expected ; or ( for variable and function declaration respectively"));
    }

    #[test]
    fn test_error_position_is_previous_token() {
        // Missing `;` after `0`: the diagnostic points at the `0` token.
        let err = parse("int main(){ return 0 }").unwrap_err();
        assert_eq!(format!("{err}"), "Ln: 1, Col: 20 - Syntax Error: Expected ;");
    }
}
