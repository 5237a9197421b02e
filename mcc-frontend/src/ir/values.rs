//! IR value representations
//!
//! Values are the operands of IR instructions: numbered temporaries,
//! named function parameters, typed constants, and module-level symbols.

use mcc_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR value - an operand in an IR instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numbered temporary (`%0`, `%1`, ...)
    Temp(TempId),

    /// Named function parameter (`%a`)
    Param(String),

    /// Constant integer
    ConstInt(i32),

    /// Constant float
    ConstFloat(f32),

    /// Constant boolean (`true` / `false`)
    ConstBool(bool),

    /// Module-level symbol reference (`@g`)
    Global(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Temp(id) => write!(f, "%{id}"),
            Value::Param(name) => write!(f, "%{name}"),
            Value::ConstInt(v) => write!(f, "{v}"),
            Value::ConstFloat(v) => write!(f, "{v:?}"),
            Value::ConstBool(v) => write!(f, "{v}"),
            Value::Global(name) => write!(f, "@{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::Temp(3)), "%3");
        assert_eq!(format!("{}", Value::Param("a".to_string())), "%a");
        assert_eq!(format!("{}", Value::ConstInt(-7)), "-7");
        assert_eq!(format!("{}", Value::ConstFloat(1.5)), "1.5");
        assert_eq!(format!("{}", Value::ConstFloat(0.0)), "0.0");
        assert_eq!(format!("{}", Value::ConstBool(true)), "true");
        assert_eq!(format!("{}", Value::Global("g".to_string())), "@g");
    }
}
