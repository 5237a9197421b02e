//! IR type system
//!
//! Mini-C lowers onto four IR types: `i32` for `int`, `float` for
//! `float`, `i1` for `bool`, and `void` for value-less functions.

use crate::ir::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrType {
    Void,
    I1,
    I32,
    F32,
}

impl IrType {
    pub fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// The zero value used for global initializers and implicit returns
    pub fn zero_value(&self) -> Option<Value> {
        match self {
            IrType::Void => None,
            IrType::I1 => Some(Value::ConstBool(false)),
            IrType::I32 => Some(Value::ConstInt(0)),
            IrType::F32 => Some(Value::ConstFloat(0.0)),
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::I1 => write!(f, "i1"),
            IrType::I32 => write!(f, "i32"),
            IrType::F32 => write!(f, "float"),
        }
    }
}
