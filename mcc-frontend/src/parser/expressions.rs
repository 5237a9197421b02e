//! Expression parsing with stratified operator precedence
//!
//! `expr := IDENT '=' expr | rval` — a leading identifier is disambiguated
//! with one token of lookahead: `=` means assignment, anything else means
//! an rvalue (and `(` after the identifier means a call).
//!
//! The rvalue grammar is stratified across seven levels, low to high:
//! `||`, `&&`, `== !=`, `< <= > >=`, `+ -`, `* / %`, then unary `- !` and
//! primaries. Each binary level parses `P := P₊₁ (op P₊₁)*` and left-folds
//! the accumulator, so `a - b - c` parses as `(a - b) - c`.

use crate::ast::{BinaryOp, Expression, ExpressionKind, UnaryOp};
use crate::lexer::TokenType;
use crate::parser::Parser;
use mcc_common::{CompilerError, SourceLocation};

impl Parser {
    /// Parse a full expression (assignment or rvalue)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, CompilerError> {
        if matches!(self.current().token_type, TokenType::Identifier(_))
            && matches!(self.tokens.peek1()?.token_type, TokenType::Assign)
        {
            let (name, _) = self.expect_identifier("Expected variable name")?;
            let assign_tok = self.advance()?; // the `=`
            let value = self.parse_expression()?;

            return Ok(Expression::new(
                ExpressionKind::Assign {
                    name,
                    value: Box::new(value),
                },
                assign_tok.location,
            ));
        }

        self.parse_logical_or()
    }

    /// Level 1: `||` (left-associative)
    fn parse_logical_or(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_logical_and()?;

        while self.check(&TokenType::PipePipe) {
            let op_tok = self.advance()?;
            let right = self.parse_logical_and()?;
            left = Expression::new(
                ExpressionKind::Binary {
                    op: BinaryOp::LogicalOr,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                op_tok.location,
            );
        }

        Ok(left)
    }

    /// Level 2: `&&` (left-associative)
    fn parse_logical_and(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_equality()?;

        while self.check(&TokenType::AmpAmp) {
            let op_tok = self.advance()?;
            let right = self.parse_equality()?;
            left = Expression::new(
                ExpressionKind::Binary {
                    op: BinaryOp::LogicalAnd,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                op_tok.location,
            );
        }

        Ok(left)
    }

    /// Level 3: `==` `!=`
    fn parse_equality(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_relational()?;

        while let Some((op, location)) = self.match_equality_operator()? {
            let right = self.parse_relational()?;
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn match_equality_operator(
        &mut self,
    ) -> Result<Option<(BinaryOp, SourceLocation)>, CompilerError> {
        let op = match self.current().token_type {
            TokenType::EqualEqual => BinaryOp::Equal,
            TokenType::BangEqual => BinaryOp::NotEqual,
            _ => return Ok(None),
        };
        let tok = self.advance()?;
        Ok(Some((op, tok.location)))
    }

    /// Level 4: `<` `<=` `>` `>=`
    fn parse_relational(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_additive()?;

        while let Some((op, location)) = self.match_relational_operator()? {
            let right = self.parse_additive()?;
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn match_relational_operator(
        &mut self,
    ) -> Result<Option<(BinaryOp, SourceLocation)>, CompilerError> {
        let op = match self.current().token_type {
            TokenType::Less => BinaryOp::Less,
            TokenType::LessEqual => BinaryOp::LessEqual,
            TokenType::Greater => BinaryOp::Greater,
            TokenType::GreaterEqual => BinaryOp::GreaterEqual,
            _ => return Ok(None),
        };
        let tok = self.advance()?;
        Ok(Some((op, tok.location)))
    }

    /// Level 5: `+` `-`
    fn parse_additive(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_multiplicative()?;

        while let Some((op, location)) = self.match_additive_operator()? {
            let right = self.parse_multiplicative()?;
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn match_additive_operator(
        &mut self,
    ) -> Result<Option<(BinaryOp, SourceLocation)>, CompilerError> {
        let op = match self.current().token_type {
            TokenType::Plus => BinaryOp::Add,
            TokenType::Minus => BinaryOp::Sub,
            _ => return Ok(None),
        };
        let tok = self.advance()?;
        Ok(Some((op, tok.location)))
    }

    /// Level 6: `*` `/` `%`
    fn parse_multiplicative(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_unary()?;

        while let Some((op, location)) = self.match_multiplicative_operator()? {
            let right = self.parse_unary()?;
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn match_multiplicative_operator(
        &mut self,
    ) -> Result<Option<(BinaryOp, SourceLocation)>, CompilerError> {
        let op = match self.current().token_type {
            TokenType::Star => BinaryOp::Mul,
            TokenType::Slash => BinaryOp::Div,
            TokenType::Percent => BinaryOp::Mod,
            _ => return Ok(None),
        };
        let tok = self.advance()?;
        Ok(Some((op, tok.location)))
    }

    /// Level 7: unary `-` and `!` (right-associative)
    fn parse_unary(&mut self) -> Result<Expression, CompilerError> {
        let op = match self.current().token_type {
            TokenType::Minus => Some(UnaryOp::Minus),
            TokenType::Bang => Some(UnaryOp::LogicalNot),
            _ => None,
        };

        if let Some(op) = op {
            let tok = self.advance()?;
            let operand = self.parse_unary()?;
            return Ok(Expression::new(
                ExpressionKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                tok.location,
            ));
        }

        self.parse_primary()
    }

    /// Primary: literal, parenthesized expression, variable, or call
    fn parse_primary(&mut self) -> Result<Expression, CompilerError> {
        match self.current().token_type.clone() {
            TokenType::IntLiteral(value) => {
                let tok = self.advance()?;
                Ok(Expression::new(
                    ExpressionKind::IntLiteral(value),
                    tok.location,
                ))
            }
            TokenType::FloatLiteral(value) => {
                let tok = self.advance()?;
                Ok(Expression::new(
                    ExpressionKind::FloatLiteral(value),
                    tok.location,
                ))
            }
            TokenType::BoolLiteral(value) => {
                let tok = self.advance()?;
                Ok(Expression::new(
                    ExpressionKind::BoolLiteral(value),
                    tok.location,
                ))
            }
            TokenType::LeftParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenType::RightParen, "Expected )")?;
                Ok(expr)
            }
            TokenType::Identifier(_) => {
                let (name, location) = self.expect_identifier("Expected variable name")?;

                if self.check(&TokenType::LeftParen) {
                    self.advance()?;
                    let arguments = self.parse_args()?;
                    self.expect(TokenType::RightParen, "Expected )")?;
                    Ok(Expression::new(
                        ExpressionKind::Call {
                            callee: name,
                            arguments,
                        },
                        location,
                    ))
                } else {
                    Ok(Expression::new(ExpressionKind::Variable(name), location))
                }
            }
            _ => Err(self.syntax_error("Unknown token when expecting an expression")),
        }
    }

    /// Parse a call argument list (the caller has consumed `(`)
    fn parse_args(&mut self) -> Result<Vec<Expression>, CompilerError> {
        if self.check(&TokenType::RightParen) {
            return Ok(Vec::new());
        }

        let mut args = vec![self.parse_expression()?];
        while self.check(&TokenType::Comma) {
            self.advance()?;
            args.push(self.parse_expression()?);
        }

        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TokenStream};

    fn parse_expr(input: &str) -> Result<Expression, CompilerError> {
        let stream = TokenStream::new(Lexer::new(input))?;
        Parser::new(stream).parse_expression()
    }

    fn binary_parts(expr: &Expression) -> (BinaryOp, &Expression, &Expression) {
        match &expr.kind {
            ExpressionKind::Binary { op, left, right } => (*op, left, right),
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn test_literals() {
        assert!(matches!(
            parse_expr("42").unwrap().kind,
            ExpressionKind::IntLiteral(42)
        ));
        assert!(matches!(
            parse_expr(".0").unwrap().kind,
            ExpressionKind::FloatLiteral(_)
        ));
        assert!(matches!(
            parse_expr("true").unwrap().kind,
            ExpressionKind::BoolLiteral(true)
        ));
    }

    #[test]
    fn test_mul_binds_tighter_than_add() {
        // a + b * c => a + (b * c)
        let expr = parse_expr("a + b * c").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(left.kind, ExpressionKind::Variable(_)));
        let (inner, _, _) = binary_parts(right);
        assert_eq!(inner, BinaryOp::Mul);

        // a * b + c => (a * b) + c
        let expr = parse_expr("a * b + c").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Add);
        let (inner, _, _) = binary_parts(left);
        assert_eq!(inner, BinaryOp::Mul);
        assert!(matches!(right.kind, ExpressionKind::Variable(_)));
    }

    #[test]
    fn test_subtraction_left_folds() {
        // a - b - c => (a - b) - c
        let expr = parse_expr("a - b - c").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Sub);
        let (inner, _, _) = binary_parts(left);
        assert_eq!(inner, BinaryOp::Sub);
        assert!(matches!(right.kind, ExpressionKind::Variable(_)));
    }

    #[test]
    fn test_comparison_binds_looser_than_arithmetic() {
        let expr = parse_expr("a + 1 < b * 2").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Less);
        assert_eq!(binary_parts(left).0, BinaryOp::Add);
        assert_eq!(binary_parts(right).0, BinaryOp::Mul);
    }

    #[test]
    fn test_logical_stratification() {
        // a || b && c => a || (b && c)
        let expr = parse_expr("a || b && c").unwrap();
        let (op, _, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::LogicalOr);
        assert_eq!(binary_parts(right).0, BinaryOp::LogicalAnd);
    }

    #[test]
    fn test_unary_is_right_associative() {
        let expr = parse_expr("--x").unwrap();
        match expr.kind {
            ExpressionKind::Unary {
                op: UnaryOp::Minus,
                operand,
            } => {
                assert!(matches!(
                    operand.kind,
                    ExpressionKind::Unary {
                        op: UnaryOp::Minus,
                        ..
                    }
                ));
            }
            other => panic!("expected unary, got {other:?}"),
        }
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expr("(a + b) * c").unwrap();
        let (op, left, _) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Mul);
        assert_eq!(binary_parts(left).0, BinaryOp::Add);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        // x = y = 1 => x = (y = 1)
        let expr = parse_expr("x = y = 1").unwrap();
        match expr.kind {
            ExpressionKind::Assign { name, value } => {
                assert_eq!(name, "x");
                assert!(matches!(value.kind, ExpressionKind::Assign { .. }));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_identifier_vs_call_lookahead() {
        assert!(matches!(
            parse_expr("foo").unwrap().kind,
            ExpressionKind::Variable(_)
        ));

        match parse_expr("foo(1, x, 2 + 3)").unwrap().kind {
            ExpressionKind::Call { callee, arguments } => {
                assert_eq!(callee, "foo");
                assert_eq!(arguments.len(), 3);
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_call_with_no_args() {
        match parse_expr("f()").unwrap().kind {
            ExpressionKind::Call { arguments, .. } => assert!(arguments.is_empty()),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_equality_vs_relational_levels() {
        // a < b == c < d => (a < b) == (c < d)
        let expr = parse_expr("a < b == c < d").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Equal);
        assert_eq!(binary_parts(left).0, BinaryOp::Less);
        assert_eq!(binary_parts(right).0, BinaryOp::Less);
    }

    #[test]
    fn test_missing_operand_is_an_error() {
        let err = parse_expr("1 +").unwrap_err();
        assert!(format!("{err}").contains("Unknown token when expecting an expression"));
    }

    #[test]
    fn test_unclosed_paren_is_an_error() {
        let err = parse_expr("(1 + 2").unwrap_err();
        assert!(format!("{err}").contains("Expected )"));
    }
}
