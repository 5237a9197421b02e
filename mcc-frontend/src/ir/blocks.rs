//! Basic block management
//!
//! A basic block is a labelled straight-line instruction sequence. A
//! well-formed block ends in exactly one terminator; `has_terminator`
//! lets the lowering pass avoid appending past one.

use crate::ir::Instruction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic block - a labelled sequence of instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub label: String,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instructions: Vec::new(),
        }
    }

    pub fn add_instruction(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn has_terminator(&self) -> bool {
        self.instructions
            .last()
            .is_some_and(|instr| instr.is_terminator())
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for instr in &self.instructions {
            writeln!(f, "  {instr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrType, Value};

    #[test]
    fn test_has_terminator() {
        let mut block = BasicBlock::new("entry");
        assert!(!block.has_terminator());

        block.add_instruction(Instruction::Alloca {
            result: 0,
            ty: IrType::I32,
        });
        assert!(!block.has_terminator());

        block.add_instruction(Instruction::Return(Some((IrType::I32, Value::ConstInt(0)))));
        assert!(block.has_terminator());
    }

    #[test]
    fn test_display() {
        let mut block = BasicBlock::new("entry");
        block.add_instruction(Instruction::Return(None));
        assert_eq!(format!("{block}"), "entry:\n  ret void\n");
    }
}
