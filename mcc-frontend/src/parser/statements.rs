//! Statement and block parsing

use crate::ast::{Block, Statement, StatementKind};
use crate::lexer::TokenType;
use crate::parser::Parser;
use mcc_common::CompilerError;

impl Parser {
    /// Parse `'{' local_decls stmt_list '}'`
    ///
    /// Local declarations come strictly before statements; a type keyword
    /// after the first statement is a syntax error.
    pub(crate) fn parse_block(&mut self) -> Result<Block, CompilerError> {
        let brace = self.expect(TokenType::LeftBrace, "Expected {")?;

        let mut locals = Vec::new();
        while self.starts_var_type() {
            locals.push(self.parse_var_decl()?);
        }

        let mut statements = Vec::new();
        while self.starts_statement() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenType::RightBrace, "Expected }")?;

        Ok(Block {
            locals,
            statements,
            location: brace.location,
        })
    }

    /// Parse one statement, dispatching on FIRST sets
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, CompilerError> {
        if self.starts_expression() || self.check(&TokenType::Semicolon) {
            return self.parse_expr_stmt();
        }
        if self.check(&TokenType::LeftBrace) {
            let location = self.current().location;
            let block = self.parse_block()?;
            return Ok(Statement::new(StatementKind::Block(block), location));
        }
        if self.check(&TokenType::If) {
            return self.parse_if_stmt();
        }
        if self.check(&TokenType::While) {
            return self.parse_while_stmt();
        }
        if self.check(&TokenType::Return) {
            return self.parse_return_stmt();
        }

        Err(self.syntax_error(
            "Expected expression statement, block, if statement, while statement, or return statement",
        ))
    }

    /// Parse `expr ';'` or the empty statement `';'`
    fn parse_expr_stmt(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current().location;

        if self.check(&TokenType::Semicolon) {
            self.advance()?;
            return Ok(Statement::new(StatementKind::Empty, location));
        }

        let expr = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "Expected ;")?;
        Ok(Statement::new(StatementKind::Expression(expr), location))
    }

    /// Parse `'if' '(' expr ')' block ('else' block)?`
    fn parse_if_stmt(&mut self) -> Result<Statement, CompilerError> {
        let if_tok = self.expect(TokenType::If, "Expected 'if' keyword")?;

        self.expect(TokenType::LeftParen, "Expected (")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "Expected )")?;

        let then_block = self.parse_block()?;

        let else_block = if self.check(&TokenType::Else) {
            self.advance()?;
            Some(self.parse_block()?)
        } else if self.starts_statement() || self.check(&TokenType::RightBrace) {
            None
        } else {
            return Err(self.syntax_error("Expected 'else' statement or another statement"));
        };

        Ok(Statement::new(
            StatementKind::If {
                condition,
                then_block,
                else_block,
            },
            if_tok.location,
        ))
    }

    /// Parse `'while' '(' expr ')' stmt` — the body may be any statement
    fn parse_while_stmt(&mut self) -> Result<Statement, CompilerError> {
        let while_tok = self.expect(TokenType::While, "Expected 'while' keyword")?;

        self.expect(TokenType::LeftParen, "Expected (")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "Expected )")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::new(
            StatementKind::While { condition, body },
            while_tok.location,
        ))
    }

    /// Parse `'return' expr? ';'`
    fn parse_return_stmt(&mut self) -> Result<Statement, CompilerError> {
        let return_tok = self.expect(TokenType::Return, "Expected return statement")?;

        if self.check(&TokenType::Semicolon) {
            self.advance()?;
            return Ok(Statement::new(
                StatementKind::Return(None),
                return_tok.location,
            ));
        }

        let expr = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "Expected ;")?;

        Ok(Statement::new(
            StatementKind::Return(Some(expr)),
            return_tok.location,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExpressionKind;
    use crate::lexer::{Lexer, TokenStream};

    fn parse_stmt(input: &str) -> Result<Statement, CompilerError> {
        let stream = TokenStream::new(Lexer::new(input))?;
        Parser::new(stream).parse_statement()
    }

    #[test]
    fn test_if_without_else() {
        let stmt = parse_stmt("if (flag) { x = 1; }").unwrap();
        match stmt.kind {
            StatementKind::If {
                else_block: None, ..
            } => {}
            other => panic!("expected if without else, got {other:?}"),
        }
    }

    #[test]
    fn test_if_with_empty_then_block() {
        let stmt = parse_stmt("if (flag) {}").unwrap();
        match stmt.kind {
            StatementKind::If { then_block, .. } => {
                assert!(then_block.locals.is_empty());
                assert!(then_block.statements.is_empty());
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_if_arm_must_be_block() {
        let err = parse_stmt("if (flag) x = 1;").unwrap_err();
        assert!(format!("{err}").contains("Expected {"));
    }

    #[test]
    fn test_while_with_single_statement_body() {
        let stmt = parse_stmt("while (i < 10) i = i + 1;").unwrap();
        match stmt.kind {
            StatementKind::While { body, .. } => {
                assert!(matches!(body.kind, StatementKind::Expression(_)));
            }
            other => panic!("expected while, got {other:?}"),
        }
    }

    #[test]
    fn test_return_without_value() {
        let stmt = parse_stmt("return;").unwrap();
        assert!(matches!(stmt.kind, StatementKind::Return(None)));
    }

    #[test]
    fn test_empty_statement() {
        let stmt = parse_stmt(";").unwrap();
        assert!(matches!(stmt.kind, StatementKind::Empty));
    }

    #[test]
    fn test_block_locals_before_statements() {
        let stmt = parse_stmt("{ int x; float y; x = 1; }").unwrap();
        match stmt.kind {
            StatementKind::Block(block) => {
                assert_eq!(block.locals.len(), 2);
                assert_eq!(block.statements.len(), 1);
            }
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn test_local_decl_after_statement_rejected() {
        let err = parse_stmt("{ x = 1; int y; }").unwrap_err();
        assert!(format!("{err}").contains("Expected }"));
    }

    #[test]
    fn test_stray_else_is_a_syntax_error() {
        let err = parse_stmt("{ else { x = 1; } }").unwrap_err();
        assert!(format!("{err}").contains(
            "Expected expression statement, block, if statement, while statement, or return statement"
        ));
    }

    #[test]
    fn test_assignment_statement_shape() {
        let stmt = parse_stmt("x = y + 1;").unwrap();
        match stmt.kind {
            StatementKind::Expression(expr) => {
                assert!(matches!(expr.kind, ExpressionKind::Assign { .. }));
            }
            other => panic!("expected expression statement, got {other:?}"),
        }
    }
}
