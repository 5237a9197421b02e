//! Abstract Syntax Tree definitions for mini-C
//!
//! The AST is a tree of tagged enums built by the parser and consumed by
//! the IR lowering pass. Every node that can be the subject of a
//! diagnostic carries the source location of its defining token.

pub mod expressions;
pub mod ops;
pub mod printer;
pub mod statements;

pub use expressions::{Expression, ExpressionKind};
pub use ops::{BinaryOp, UnaryOp};
pub use statements::{
    Block, Decl, FunctionDefinition, Param, Program, Prototype, Statement, StatementKind, VarDecl,
};
