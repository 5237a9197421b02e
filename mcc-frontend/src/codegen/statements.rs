//! Statement lowering: blocks, control flow, and returns
//!
//! Control-flow lowering always terminates both arms of an `if` with a
//! branch to the merge block, even when an arm already returned; the
//! merge block is created and made current unconditionally so that
//! whatever follows in the enclosing block has somewhere to land.

use super::{convert_type, CodeGenerator, Slot};
use crate::ast::{Block, Expression, Statement, StatementKind, VarDecl};
use crate::ir::{IrBinaryOp, IrCastOp, IrType, Value};
use mcc_common::{CompilerError, SourceLocation};

impl CodeGenerator {
    pub(crate) fn lower_statement(&mut self, stmt: &Statement) -> Result<(), CompilerError> {
        match &stmt.kind {
            StatementKind::Expression(expr) => {
                self.lower_expression(expr)?;
                Ok(())
            }
            StatementKind::Block(block) => self.lower_block(block),
            StatementKind::If {
                condition,
                then_block,
                else_block,
            } => self.lower_if(condition, then_block, else_block.as_ref(), stmt.location),
            StatementKind::While { condition, body } => {
                self.lower_while(condition, body, stmt.location)
            }
            StatementKind::Return(expr) => self.lower_return(expr.as_ref(), stmt.location),
            StatementKind::Empty => Ok(()),
        }
    }

    /// Lower a block inside its own scope frame; the frame is popped on
    /// every path out, error included
    pub(crate) fn lower_block(&mut self, block: &Block) -> Result<(), CompilerError> {
        self.scopes.push();
        let result = self.lower_block_body(block);
        self.scopes.pop();
        result
    }

    fn lower_block_body(&mut self, block: &Block) -> Result<(), CompilerError> {
        for local in &block.locals {
            self.declare_local(local)?;
        }
        for stmt in &block.statements {
            self.lower_statement(stmt)?;
        }
        Ok(())
    }

    /// Declare a local: entry-block stack slot, registered at the current
    /// frame. A name present at any enclosing frame is a redeclaration.
    pub(crate) fn declare_local(&mut self, var: &VarDecl) -> Result<(), CompilerError> {
        if self.scopes.declared_anywhere(&var.name) {
            return Err(self.semantic_error(
                "Variable already declared in the local scope",
                var.location,
            ));
        }

        let ty = convert_type(var.var_type);
        let slot = self
            .builder
            .build_entry_alloca(ty)
            .map_err(CompilerError::codegen_error)?;
        self.scopes.declare(
            var.name.as_str(),
            Slot {
                ptr: Value::Temp(slot),
                ty,
            },
        );
        Ok(())
    }

    /// Branch-on-condition helper: `icmp ne cond, false`
    fn lower_condition(
        &mut self,
        condition: &Expression,
        message: &str,
        location: SourceLocation,
    ) -> Result<Value, CompilerError> {
        let (cond, cond_ty) = self.lower_expression(condition)?;
        if cond_ty != IrType::I1 {
            return Err(self.semantic_error(message, location));
        }

        let comp = self
            .builder
            .build_binary(IrBinaryOp::IcmpNe, IrType::I1, cond, Value::ConstBool(false))
            .map_err(CompilerError::codegen_error)?;
        Ok(Value::Temp(comp))
    }

    fn lower_if(
        &mut self,
        condition: &Expression,
        then_block: &Block,
        else_block: Option<&Block>,
        location: SourceLocation,
    ) -> Result<(), CompilerError> {
        let comp =
            self.lower_condition(condition, "If statement condition must be a 'bool'", location)?;

        if let Some(else_block) = else_block {
            let then_label = self.builder.new_label("ifthen");
            let else_label = self.builder.new_label("elsethen");
            let merge_label = self.builder.new_label("cont");

            self.builder
                .build_cond_branch(comp, &then_label, &else_label)
                .map_err(CompilerError::codegen_error)?;

            self.builder
                .create_block(&then_label)
                .map_err(CompilerError::codegen_error)?;
            self.lower_block(then_block)?;
            self.builder
                .build_branch(&merge_label)
                .map_err(CompilerError::codegen_error)?;

            self.builder
                .create_block(&else_label)
                .map_err(CompilerError::codegen_error)?;
            self.lower_block(else_block)?;
            self.builder
                .build_branch(&merge_label)
                .map_err(CompilerError::codegen_error)?;

            self.builder
                .create_block(&merge_label)
                .map_err(CompilerError::codegen_error)?;
        } else {
            let then_label = self.builder.new_label("ifthen");
            let merge_label = self.builder.new_label("end");

            self.builder
                .build_cond_branch(comp, &then_label, &merge_label)
                .map_err(CompilerError::codegen_error)?;

            self.builder
                .create_block(&then_label)
                .map_err(CompilerError::codegen_error)?;
            self.lower_block(then_block)?;
            self.builder
                .build_branch(&merge_label)
                .map_err(CompilerError::codegen_error)?;

            self.builder
                .create_block(&merge_label)
                .map_err(CompilerError::codegen_error)?;
        }

        Ok(())
    }

    /// While pushes its own scope frame around the whole statement (the
    /// body, if a block, pushes another)
    fn lower_while(
        &mut self,
        condition: &Expression,
        body: &Statement,
        location: SourceLocation,
    ) -> Result<(), CompilerError> {
        self.scopes.push();
        let result = self.lower_while_body(condition, body, location);
        self.scopes.pop();
        result
    }

    fn lower_while_body(
        &mut self,
        condition: &Expression,
        body: &Statement,
        location: SourceLocation,
    ) -> Result<(), CompilerError> {
        let cond_label = self.builder.new_label("cond");
        let loop_label = self.builder.new_label("loop");
        let end_label = self.builder.new_label("afterloop");

        self.builder
            .build_branch(&cond_label)
            .map_err(CompilerError::codegen_error)?;

        self.builder
            .create_block(&cond_label)
            .map_err(CompilerError::codegen_error)?;
        let comp = self.lower_condition(
            condition,
            "While statement condition must be a 'bool'",
            location,
        )?;
        self.builder
            .build_cond_branch(comp, &loop_label, &end_label)
            .map_err(CompilerError::codegen_error)?;

        self.builder
            .create_block(&loop_label)
            .map_err(CompilerError::codegen_error)?;
        self.lower_statement(body)?;
        self.builder
            .build_branch(&cond_label)
            .map_err(CompilerError::codegen_error)?;

        self.builder
            .create_block(&end_label)
            .map_err(CompilerError::codegen_error)?;

        Ok(())
    }

    fn lower_return(
        &mut self,
        expr: Option<&Expression>,
        location: SourceLocation,
    ) -> Result<(), CompilerError> {
        let return_type = match self.current_return_type {
            Some(ty) => ty,
            None => {
                return Err(self.semantic_error("Return statement outside of a function", location))
            }
        };

        let Some(expr) = expr else {
            if !return_type.is_void() {
                return Err(self.semantic_error(
                    "Return type does not match the function definition",
                    location,
                ));
            }
            return self
                .builder
                .build_return(None)
                .map_err(CompilerError::codegen_error);
        };

        let (value, ty) = self.lower_expression(expr)?;

        if ty == return_type {
            let ret = if return_type.is_void() {
                None
            } else {
                Some((return_type, value))
            };
            return self
                .builder
                .build_return(ret)
                .map_err(CompilerError::codegen_error);
        }

        let value = match (ty, return_type) {
            (IrType::I32, IrType::F32) => {
                self.warn("Implicit return from int to float");
                let cast = self
                    .builder
                    .build_cast(IrCastOp::SiToFp, value)
                    .map_err(CompilerError::codegen_error)?;
                Value::Temp(cast)
            }
            (IrType::F32, IrType::I32) => {
                self.warn("Explicit return from float to int");
                let cast = self
                    .builder
                    .build_cast(IrCastOp::FpToSi, value)
                    .map_err(CompilerError::codegen_error)?;
                Value::Temp(cast)
            }
            _ => {
                return Err(self.semantic_error(
                    "Return type does not match the function definition",
                    location,
                ))
            }
        };

        self.builder
            .build_return(Some((return_type, value)))
            .map_err(CompilerError::codegen_error)
    }
}
