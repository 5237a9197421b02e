//! IR function definitions and declarations
//!
//! A function with `is_external` set has no blocks and prints as a
//! `declare` line; a definition prints as a `define` with its blocks in
//! creation order (the first block is the entry block).

use crate::ir::{BasicBlock, IrType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: IrType,
    pub params: Vec<(String, IrType)>,
    pub blocks: Vec<BasicBlock>,
    pub is_external: bool,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        return_type: IrType,
        params: Vec<(String, IrType)>,
        is_external: bool,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            blocks: Vec::new(),
            is_external,
        }
    }

    pub fn add_block(&mut self, block: BasicBlock) {
        self.blocks.push(block);
    }

    pub fn get_block_mut(&mut self, label: &str) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|b| b.label == label)
    }

    pub fn get_block(&self, label: &str) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.label == label)
    }

    pub fn entry_block_mut(&mut self) -> Option<&mut BasicBlock> {
        self.blocks.first_mut()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_external {
            write!(f, "declare {} @{}(", self.return_type, self.name)?;
            for (i, (_, ty)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{ty}")?;
            }
            return writeln!(f, ")");
        }

        write!(f, "define {} @{}(", self.return_type, self.name)?;
        for (i, (name, ty)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty} %{name}")?;
        }
        writeln!(f, ") {{")?;
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Instruction, Value};

    #[test]
    fn test_declare_display() {
        let func = Function::new(
            "putchar",
            IrType::I32,
            vec![("c".to_string(), IrType::I32)],
            true,
        );
        assert_eq!(format!("{func}"), "declare i32 @putchar(i32)\n");
    }

    #[test]
    fn test_define_display() {
        let mut func = Function::new(
            "id",
            IrType::I32,
            vec![("x".to_string(), IrType::I32)],
            false,
        );
        let mut entry = BasicBlock::new("entry");
        entry.add_instruction(Instruction::Return(Some((
            IrType::I32,
            Value::Param("x".to_string()),
        ))));
        func.add_block(entry);

        assert_eq!(
            format!("{func}"),
            "define i32 @id(i32 %x) {\nentry:\n  ret i32 %x\n}\n"
        );
    }
}
