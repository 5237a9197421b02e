//! Module and global variables
//!
//! The module is the unit of output: extern declarations, zero-initialized
//! globals, and function definitions, serialized in that order (each group
//! in source order).

use crate::ir::{Function, IrType, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Module-level global variable with a zero initializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalVariable {
    pub name: String,
    pub var_type: IrType,
    pub initializer: Value,
}

impl fmt::Display for GlobalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@{} = common global {} {}, align 4",
            self.name, self.var_type, self.initializer
        )
    }
}

/// IR module - a complete compilation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub functions: Vec<Function>,
    pub globals: Vec<GlobalVariable>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            globals: Vec::new(),
        }
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    pub fn add_global(&mut self, global: GlobalVariable) {
        self.globals.push(global);
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn get_global(&self, name: &str) -> Option<&GlobalVariable> {
        self.globals.iter().find(|g| g.name == name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;

        for func in self.functions.iter().filter(|f| f.is_external) {
            writeln!(f)?;
            write!(f, "{func}")?;
        }

        if !self.globals.is_empty() {
            writeln!(f)?;
            for global in &self.globals {
                write!(f, "{global}")?;
            }
        }

        for func in self.functions.iter().filter(|f| !f.is_external) {
            writeln!(f)?;
            write!(f, "{func}")?;
        }

        Ok(())
    }
}
