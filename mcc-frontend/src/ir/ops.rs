//! IR opcodes
//!
//! Binary opcodes carry their comparison predicate (LLVM-style
//! `icmp slt` / `fcmp ult` spellings). Float comparisons use the
//! unordered predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrBinaryOp {
    // Integer arithmetic (signed)
    Add,
    Sub,
    Mul,
    SDiv,
    SRem,

    // Float arithmetic
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,

    // Boolean
    And,
    Or,

    // Integer comparisons (signed); result is i1
    IcmpEq,
    IcmpNe,
    IcmpSlt,
    IcmpSle,
    IcmpSgt,
    IcmpSge,

    // Float comparisons (unordered); result is i1
    FcmpUeq,
    FcmpUne,
    FcmpUlt,
    FcmpUle,
    FcmpUgt,
    FcmpUge,
}

impl IrBinaryOp {
    /// True for opcodes whose result is `i1` regardless of operand type
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            IrBinaryOp::IcmpEq
                | IrBinaryOp::IcmpNe
                | IrBinaryOp::IcmpSlt
                | IrBinaryOp::IcmpSle
                | IrBinaryOp::IcmpSgt
                | IrBinaryOp::IcmpSge
                | IrBinaryOp::FcmpUeq
                | IrBinaryOp::FcmpUne
                | IrBinaryOp::FcmpUlt
                | IrBinaryOp::FcmpUle
                | IrBinaryOp::FcmpUgt
                | IrBinaryOp::FcmpUge
        )
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::SDiv => "sdiv",
            IrBinaryOp::SRem => "srem",
            IrBinaryOp::FAdd => "fadd",
            IrBinaryOp::FSub => "fsub",
            IrBinaryOp::FMul => "fmul",
            IrBinaryOp::FDiv => "fdiv",
            IrBinaryOp::FRem => "frem",
            IrBinaryOp::And => "and",
            IrBinaryOp::Or => "or",
            IrBinaryOp::IcmpEq => "icmp eq",
            IrBinaryOp::IcmpNe => "icmp ne",
            IrBinaryOp::IcmpSlt => "icmp slt",
            IrBinaryOp::IcmpSle => "icmp sle",
            IrBinaryOp::IcmpSgt => "icmp sgt",
            IrBinaryOp::IcmpSge => "icmp sge",
            IrBinaryOp::FcmpUeq => "fcmp ueq",
            IrBinaryOp::FcmpUne => "fcmp une",
            IrBinaryOp::FcmpUlt => "fcmp ult",
            IrBinaryOp::FcmpUle => "fcmp ule",
            IrBinaryOp::FcmpUgt => "fcmp ugt",
            IrBinaryOp::FcmpUge => "fcmp uge",
        }
    }
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Unary opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrUnaryOp {
    /// Integer negation, rendered as `sub <ty> 0, x`
    Neg,
    /// Float negation
    FNeg,
    /// Boolean not, rendered as `xor i1 x, true`
    Not,
}

/// Numeric conversion opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrCastOp {
    /// Signed int to float widening
    SiToFp,
    /// Float to signed int narrowing
    FpToSi,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonics() {
        assert_eq!(IrBinaryOp::Add.mnemonic(), "add");
        assert_eq!(IrBinaryOp::IcmpSlt.mnemonic(), "icmp slt");
        assert_eq!(IrBinaryOp::FcmpUne.mnemonic(), "fcmp une");
    }

    #[test]
    fn test_is_comparison() {
        assert!(IrBinaryOp::IcmpEq.is_comparison());
        assert!(IrBinaryOp::FcmpUge.is_comparison());
        assert!(!IrBinaryOp::Add.is_comparison());
        assert!(!IrBinaryOp::And.is_comparison());
    }
}
