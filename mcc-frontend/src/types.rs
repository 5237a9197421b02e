//! Source-level type annotations
//!
//! Mini-C has exactly four type names. `void` is only legal as a function
//! return type or as a lone parameter-list marker; variable declarations
//! are restricted to the three value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type annotation as written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Int,
    Float,
    Bool,
    Void,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
        }
    }
}
