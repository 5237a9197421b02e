//! Expression AST nodes for mini-C

use super::ops::{BinaryOp, UnaryOp};
use mcc_common::SourceLocation;
use serde::{Deserialize, Serialize};

/// An expression with the location of its defining token
///
/// Binary and assignment expressions are located at their operator token;
/// everything else at its first token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub location: SourceLocation,
}

impl Expression {
    pub fn new(kind: ExpressionKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// Integer literal
    IntLiteral(i32),

    /// Float literal
    FloatLiteral(f32),

    /// Boolean literal (`true` / `false`)
    BoolLiteral(bool),

    /// Variable reference
    Variable(String),

    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Function call
    Call {
        callee: String,
        arguments: Vec<Expression>,
    },

    /// Assignment to a named variable
    Assign {
        name: String,
        value: Box<Expression>,
    },
}
