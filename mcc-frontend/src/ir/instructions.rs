//! IR instructions
//!
//! The `ty` field of an instruction is the type that appears in its
//! textual form; for comparisons that is the operand type (the result is
//! always `i1`).

use crate::ir::{IrBinaryOp, IrCastOp, IrType, IrUnaryOp, Value};
use mcc_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Stack slot in the enclosing function's entry block
    Alloca { result: TempId, ty: IrType },

    /// result = load ty, ty* ptr
    Load {
        result: TempId,
        ty: IrType,
        ptr: Value,
    },

    /// store ty value, ty* ptr
    Store {
        ty: IrType,
        value: Value,
        ptr: Value,
    },

    /// result = op ty lhs, rhs
    Binary {
        result: TempId,
        op: IrBinaryOp,
        ty: IrType,
        lhs: Value,
        rhs: Value,
    },

    /// result = op ty operand
    Unary {
        result: TempId,
        op: IrUnaryOp,
        ty: IrType,
        operand: Value,
    },

    /// Numeric conversion between i32 and float
    Cast {
        result: TempId,
        op: IrCastOp,
        value: Value,
    },

    /// result = call ret_ty @callee(args...); no result for void calls
    Call {
        result: Option<TempId>,
        callee: String,
        args: Vec<(IrType, Value)>,
        result_type: IrType,
    },

    /// ret ty value / ret void
    Return(Option<(IrType, Value)>),

    /// br label %target
    Branch(String),

    /// br i1 cond, label %then, label %else
    CondBranch {
        condition: Value,
        then_label: String,
        else_label: String,
    },
}

impl Instruction {
    /// Terminators end a basic block; nothing may be appended after one
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Return(_) | Instruction::Branch(_) | Instruction::CondBranch { .. }
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Alloca { result, ty } => {
                write!(f, "%{result} = alloca {ty}, align 4")
            }
            Instruction::Load { result, ty, ptr } => {
                write!(f, "%{result} = load {ty}, {ty}* {ptr}")
            }
            Instruction::Store { ty, value, ptr } => {
                write!(f, "store {ty} {value}, {ty}* {ptr}")
            }
            Instruction::Binary {
                result,
                op,
                ty,
                lhs,
                rhs,
            } => {
                write!(f, "%{result} = {op} {ty} {lhs}, {rhs}")
            }
            Instruction::Unary {
                result,
                op,
                ty,
                operand,
            } => match op {
                IrUnaryOp::Neg => write!(f, "%{result} = sub {ty} 0, {operand}"),
                IrUnaryOp::FNeg => write!(f, "%{result} = fneg {ty} {operand}"),
                IrUnaryOp::Not => write!(f, "%{result} = xor {ty} {operand}, true"),
            },
            Instruction::Cast { result, op, value } => match op {
                IrCastOp::SiToFp => write!(f, "%{result} = sitofp i32 {value} to float"),
                IrCastOp::FpToSi => write!(f, "%{result} = fptosi float {value} to i32"),
            },
            Instruction::Call {
                result,
                callee,
                args,
                result_type,
            } => {
                if let Some(result) = result {
                    write!(f, "%{result} = call {result_type} @{callee}(")?;
                } else {
                    write!(f, "call {result_type} @{callee}(")?;
                }
                for (i, (ty, value)) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ty} {value}")?;
                }
                write!(f, ")")
            }
            Instruction::Return(Some((ty, value))) => write!(f, "ret {ty} {value}"),
            Instruction::Return(None) => write!(f, "ret void"),
            Instruction::Branch(label) => write!(f, "br label %{label}"),
            Instruction::CondBranch {
                condition,
                then_label,
                else_label,
            } => {
                write!(f, "br i1 {condition}, label %{then_label}, label %{else_label}")
            }
        }
    }
}
