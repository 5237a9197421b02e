//! IR builder
//!
//! Construction utilities for one function at a time: allocates
//! temporaries, uniquifies block labels, owns the insertion cursor, and
//! appends instructions to the current block. Errors here mean the
//! lowering pass misused the builder (no current function/block), not a
//! problem with the user's program, so they surface as plain strings.

use crate::ir::{
    BasicBlock, Function, Instruction, IrBinaryOp, IrCastOp, IrType, IrUnaryOp, Value,
};
use mcc_common::TempId;
use std::collections::HashMap;

/// Builder for constructing IR functions
pub struct IrBuilder {
    current_function: Option<Function>,
    current_block: Option<String>,
    next_temp: TempId,
    label_counts: HashMap<String, u32>,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self {
            current_function: None,
            current_block: None,
            next_temp: 0,
            label_counts: HashMap::new(),
        }
    }

    pub fn new_temp(&mut self) -> TempId {
        let temp = self.next_temp;
        self.next_temp += 1;
        temp
    }

    /// Begin a function definition; temp and label numbering restart
    pub fn create_function(
        &mut self,
        name: impl Into<String>,
        return_type: IrType,
        params: Vec<(String, IrType)>,
    ) -> &mut Function {
        self.current_function = Some(Function::new(name, return_type, params, false));
        self.current_block = None;
        self.next_temp = 0;
        self.label_counts.clear();
        self.current_function.as_mut().unwrap()
    }

    /// Reserve a unique block label from a naming hint
    pub fn new_label(&mut self, hint: &str) -> String {
        let count = self.label_counts.entry(hint.to_string()).or_insert(0);
        let label = if *count == 0 {
            hint.to_string()
        } else {
            format!("{hint}{count}")
        };
        *count += 1;
        label
    }

    /// Append a block with a reserved label to the current function and
    /// move the insertion cursor to it
    pub fn create_block(&mut self, label: &str) -> Result<(), String> {
        let function = self
            .current_function
            .as_mut()
            .ok_or_else(|| "No current function".to_string())?;
        function.add_block(BasicBlock::new(label));
        self.current_block = Some(label.to_string());
        Ok(())
    }

    pub fn current_block_has_terminator(&self) -> bool {
        if let (Some(function), Some(label)) = (&self.current_function, &self.current_block) {
            if let Some(block) = function.get_block(label) {
                return block.has_terminator();
            }
        }
        false
    }

    /// Create a stack slot in the function's entry block, after any
    /// existing slots, so it dominates every use
    pub fn build_entry_alloca(&mut self, ty: IrType) -> Result<TempId, String> {
        let result = self.new_temp();
        let function = self
            .current_function
            .as_mut()
            .ok_or_else(|| "No current function".to_string())?;
        let entry = function
            .entry_block_mut()
            .ok_or_else(|| "Function has no entry block".to_string())?;

        let at = entry
            .instructions
            .iter()
            .position(|instr| !matches!(instr, Instruction::Alloca { .. }))
            .unwrap_or(entry.instructions.len());
        entry.instructions.insert(at, Instruction::Alloca { result, ty });

        Ok(result)
    }

    pub fn build_load(&mut self, ty: IrType, ptr: Value) -> Result<TempId, String> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Load { result, ty, ptr })?;
        Ok(result)
    }

    pub fn build_store(&mut self, ty: IrType, value: Value, ptr: Value) -> Result<(), String> {
        self.add_instruction(Instruction::Store { ty, value, ptr })
    }

    pub fn build_binary(
        &mut self,
        op: IrBinaryOp,
        ty: IrType,
        lhs: Value,
        rhs: Value,
    ) -> Result<TempId, String> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Binary {
            result,
            op,
            ty,
            lhs,
            rhs,
        })?;
        Ok(result)
    }

    pub fn build_unary(
        &mut self,
        op: IrUnaryOp,
        ty: IrType,
        operand: Value,
    ) -> Result<TempId, String> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Unary {
            result,
            op,
            ty,
            operand,
        })?;
        Ok(result)
    }

    pub fn build_cast(&mut self, op: IrCastOp, value: Value) -> Result<TempId, String> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Cast { result, op, value })?;
        Ok(result)
    }

    /// Emit a call; void calls produce no result temp
    pub fn build_call(
        &mut self,
        callee: impl Into<String>,
        args: Vec<(IrType, Value)>,
        result_type: IrType,
    ) -> Result<Option<TempId>, String> {
        let result = if result_type.is_void() {
            None
        } else {
            Some(self.new_temp())
        };
        self.add_instruction(Instruction::Call {
            result,
            callee: callee.into(),
            args,
            result_type,
        })?;
        Ok(result)
    }

    pub fn build_return(&mut self, value: Option<(IrType, Value)>) -> Result<(), String> {
        self.add_instruction(Instruction::Return(value))
    }

    pub fn build_branch(&mut self, label: &str) -> Result<(), String> {
        self.add_instruction(Instruction::Branch(label.to_string()))
    }

    pub fn build_cond_branch(
        &mut self,
        condition: Value,
        then_label: &str,
        else_label: &str,
    ) -> Result<(), String> {
        self.add_instruction(Instruction::CondBranch {
            condition,
            then_label: then_label.to_string(),
            else_label: else_label.to_string(),
        })
    }

    fn add_instruction(&mut self, instr: Instruction) -> Result<(), String> {
        let function = self
            .current_function
            .as_mut()
            .ok_or_else(|| "No current function".to_string())?;
        let label = self
            .current_block
            .as_ref()
            .ok_or_else(|| "No current block".to_string())?;
        let block = function
            .get_block_mut(label)
            .ok_or_else(|| "Current block not found".to_string())?;
        block.add_instruction(instr);
        Ok(())
    }

    /// Take the finished function out of the builder
    pub fn finish_function(&mut self) -> Option<Function> {
        self.current_block = None;
        self.current_function.take()
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}
