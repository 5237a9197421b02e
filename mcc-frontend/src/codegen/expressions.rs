//! Expression lowering and type checking
//!
//! Every expression lowers to a `(Value, IrType)` pair. Mixed `int`/`float`
//! arithmetic widens the `int` operand; assignments and call arguments
//! coerce between the numeric types with a warning; everything else must
//! match exactly.

use super::{CodeGenerator, Slot};
use crate::ast::{BinaryOp, Expression, ExpressionKind, UnaryOp};
use crate::ir::{IrBinaryOp, IrCastOp, IrType, IrUnaryOp, Value};
use mcc_common::{CompilerError, SourceLocation};

impl CodeGenerator {
    /// Lower one expression, returning its value and type
    pub(crate) fn lower_expression(
        &mut self,
        expr: &Expression,
    ) -> Result<(Value, IrType), CompilerError> {
        match &expr.kind {
            ExpressionKind::IntLiteral(v) => Ok((Value::ConstInt(*v), IrType::I32)),
            ExpressionKind::FloatLiteral(v) => Ok((Value::ConstFloat(*v), IrType::F32)),
            ExpressionKind::BoolLiteral(v) => Ok((Value::ConstBool(*v), IrType::I1)),

            ExpressionKind::Variable(name) => self.lower_variable(name, expr.location),

            ExpressionKind::Unary { op, operand } => {
                let (value, ty) = self.lower_expression(operand)?;
                self.lower_unary(*op, value, ty, expr.location)
            }

            ExpressionKind::Binary { op, left, right } => {
                let (lhs, lhs_ty) = self.lower_expression(left)?;
                let (rhs, rhs_ty) = self.lower_expression(right)?;
                self.lower_binary(*op, lhs, lhs_ty, rhs, rhs_ty, expr.location)
            }

            ExpressionKind::Call { callee, arguments } => {
                self.lower_call(callee, arguments, expr.location)
            }

            ExpressionKind::Assign { name, value } => {
                self.lower_assign(name, value, expr.location)
            }
        }
    }

    /// Load a variable: innermost local slot first, then the globals table
    fn lower_variable(
        &mut self,
        name: &str,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        if let Some(slot) = self.scopes.lookup(name).cloned() {
            let loaded = self
                .builder
                .build_load(slot.ty, slot.ptr)
                .map_err(CompilerError::codegen_error)?;
            return Ok((Value::Temp(loaded), slot.ty));
        }

        if let Some(global) = self.module.get_global(name) {
            let ty = global.var_type;
            let loaded = self
                .builder
                .build_load(ty, Value::Global(name.to_string()))
                .map_err(CompilerError::codegen_error)?;
            return Ok((Value::Temp(loaded), ty));
        }

        Err(self.semantic_error("Unknown variable name called", location))
    }

    fn lower_unary(
        &mut self,
        op: UnaryOp,
        value: Value,
        ty: IrType,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        let (ir_op, ty) = match (op, ty) {
            (UnaryOp::Minus, IrType::I32) => (IrUnaryOp::Neg, IrType::I32),
            (UnaryOp::Minus, IrType::F32) => (IrUnaryOp::FNeg, IrType::F32),
            (UnaryOp::LogicalNot, IrType::I1) => (IrUnaryOp::Not, IrType::I1),
            _ => return Err(self.semantic_error("Unknown type", location)),
        };

        let result = self
            .builder
            .build_unary(ir_op, ty, value)
            .map_err(CompilerError::codegen_error)?;
        Ok((Value::Temp(result), ty))
    }

    fn lower_binary(
        &mut self,
        op: BinaryOp,
        lhs: Value,
        lhs_ty: IrType,
        rhs: Value,
        rhs_ty: IrType,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        match (lhs_ty, rhs_ty) {
            (IrType::I32, IrType::I32) => self.lower_int_binary(op, lhs, rhs, location),
            (IrType::F32, IrType::F32) => self.lower_float_binary(op, lhs, rhs, location),

            // Mixed numeric operands: widen the int side to float
            (IrType::I32, IrType::F32) => {
                let widened = self
                    .builder
                    .build_cast(IrCastOp::SiToFp, lhs)
                    .map_err(CompilerError::codegen_error)?;
                self.lower_float_binary(op, Value::Temp(widened), rhs, location)
            }
            (IrType::F32, IrType::I32) => {
                let widened = self
                    .builder
                    .build_cast(IrCastOp::SiToFp, rhs)
                    .map_err(CompilerError::codegen_error)?;
                self.lower_float_binary(op, lhs, Value::Temp(widened), location)
            }

            (IrType::I1, IrType::I1) => self.lower_bool_binary(op, lhs, rhs, location),

            _ => Err(self.semantic_error(
                "Type of the left and right side of the binary expression does not match",
                location,
            )),
        }
    }

    fn lower_int_binary(
        &mut self,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        let ir_op = match op {
            BinaryOp::Add => IrBinaryOp::Add,
            BinaryOp::Sub => IrBinaryOp::Sub,
            BinaryOp::Mul => IrBinaryOp::Mul,
            BinaryOp::Div => IrBinaryOp::SDiv,
            BinaryOp::Mod => IrBinaryOp::SRem,
            BinaryOp::Less => IrBinaryOp::IcmpSlt,
            BinaryOp::Greater => IrBinaryOp::IcmpSgt,
            BinaryOp::LessEqual => IrBinaryOp::IcmpSle,
            BinaryOp::GreaterEqual => IrBinaryOp::IcmpSge,
            BinaryOp::Equal => IrBinaryOp::IcmpEq,
            BinaryOp::NotEqual => IrBinaryOp::IcmpNe,
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
                return Err(self.semantic_error("Invalid binary operator", location))
            }
        };

        let result = self
            .builder
            .build_binary(ir_op, IrType::I32, lhs, rhs)
            .map_err(CompilerError::codegen_error)?;
        let result_ty = if ir_op.is_comparison() {
            IrType::I1
        } else {
            IrType::I32
        };
        Ok((Value::Temp(result), result_ty))
    }

    fn lower_float_binary(
        &mut self,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        let ir_op = match op {
            BinaryOp::Add => IrBinaryOp::FAdd,
            BinaryOp::Sub => IrBinaryOp::FSub,
            BinaryOp::Mul => IrBinaryOp::FMul,
            BinaryOp::Div => IrBinaryOp::FDiv,
            BinaryOp::Mod => IrBinaryOp::FRem,
            BinaryOp::Less => IrBinaryOp::FcmpUlt,
            BinaryOp::Greater => IrBinaryOp::FcmpUgt,
            BinaryOp::LessEqual => IrBinaryOp::FcmpUle,
            BinaryOp::GreaterEqual => IrBinaryOp::FcmpUge,
            BinaryOp::Equal => IrBinaryOp::FcmpUeq,
            BinaryOp::NotEqual => IrBinaryOp::FcmpUne,
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
                return Err(self.semantic_error("Invalid binary operator", location))
            }
        };

        let result = self
            .builder
            .build_binary(ir_op, IrType::F32, lhs, rhs)
            .map_err(CompilerError::codegen_error)?;
        let result_ty = if ir_op.is_comparison() {
            IrType::I1
        } else {
            IrType::F32
        };
        Ok((Value::Temp(result), result_ty))
    }

    /// Boolean operands: only `==`, `!=`, `&&`, `||`. Logical operators
    /// combine the already-evaluated operands with `and`/`or` - both sides
    /// are always evaluated, there is no short-circuit control flow.
    fn lower_bool_binary(
        &mut self,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        let ir_op = match op {
            BinaryOp::Equal => IrBinaryOp::IcmpEq,
            BinaryOp::NotEqual => IrBinaryOp::IcmpNe,
            BinaryOp::LogicalAnd => IrBinaryOp::And,
            BinaryOp::LogicalOr => IrBinaryOp::Or,
            _ => return Err(self.semantic_error("Invalid binary operator", location)),
        };

        let result = self
            .builder
            .build_binary(ir_op, IrType::I1, lhs, rhs)
            .map_err(CompilerError::codegen_error)?;
        Ok((Value::Temp(result), IrType::I1))
    }

    fn lower_call(
        &mut self,
        callee: &str,
        arguments: &[Expression],
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        let (param_types, return_type) = match self.module.get_function(callee) {
            Some(function) => (
                function
                    .params
                    .iter()
                    .map(|(_, ty)| *ty)
                    .collect::<Vec<_>>(),
                function.return_type,
            ),
            None => return Err(self.semantic_error("Unknown function referenced", location)),
        };

        if param_types.len() != arguments.len() {
            return Err(self.semantic_error("Incorrect number of arguments passed", location));
        }

        let mut args = Vec::with_capacity(arguments.len());
        for (argument, param_ty) in arguments.iter().zip(param_types) {
            let (value, ty) = self.lower_expression(argument)?;

            let value = if ty == param_ty {
                value
            } else {
                match (ty, param_ty) {
                    (IrType::I32, IrType::F32) => {
                        self.warn("Implicit assignment of function argument from int to float");
                        let cast = self
                            .builder
                            .build_cast(IrCastOp::SiToFp, value)
                            .map_err(CompilerError::codegen_error)?;
                        Value::Temp(cast)
                    }
                    (IrType::F32, IrType::I32) => {
                        self.warn("Explicit assignment of function argument from float to int");
                        let cast = self
                            .builder
                            .build_cast(IrCastOp::FpToSi, value)
                            .map_err(CompilerError::codegen_error)?;
                        Value::Temp(cast)
                    }
                    _ => {
                        return Err(
                            self.semantic_error("Incorrect function argument type", location)
                        )
                    }
                }
            };

            args.push((param_ty, value));
        }

        let result = self
            .builder
            .build_call(callee, args, return_type)
            .map_err(CompilerError::codegen_error)?;

        // Void calls carry a placeholder value; using it anywhere fails
        // the surrounding type check.
        match result {
            Some(temp) => Ok((Value::Temp(temp), return_type)),
            None => Ok((Value::ConstInt(0), IrType::Void)),
        }
    }

    /// Assignment: the innermost local slot of that name wins; globals are
    /// the fallback. The (possibly converted) value is the expression's
    /// result.
    fn lower_assign(
        &mut self,
        name: &str,
        value: &Expression,
        location: SourceLocation,
    ) -> Result<(Value, IrType), CompilerError> {
        let (v, vty) = self.lower_expression(value)?;

        if let Some(Slot { ptr, ty }) = self.scopes.lookup(name).cloned() {
            let v = self.coerce_assignment(v, vty, ty, "local variable", location)?;
            self.builder
                .build_store(ty, v.clone(), ptr)
                .map_err(CompilerError::codegen_error)?;
            return Ok((v, ty));
        }

        if let Some(global) = self.module.get_global(name) {
            let ty = global.var_type;
            let v = self.coerce_assignment(v, vty, ty, "global variable", location)?;
            self.builder
                .build_store(ty, v.clone(), Value::Global(name.to_string()))
                .map_err(CompilerError::codegen_error)?;
            return Ok((v, ty));
        }

        Err(self.semantic_error("Unknown variable name called", location))
    }

    fn coerce_assignment(
        &mut self,
        value: Value,
        from: IrType,
        to: IrType,
        what: &str,
        location: SourceLocation,
    ) -> Result<Value, CompilerError> {
        if from == to {
            return Ok(value);
        }

        match (from, to) {
            (IrType::I32, IrType::F32) => {
                self.warn(&format!("Implicit assignment of {what} from int to float"));
                let cast = self
                    .builder
                    .build_cast(IrCastOp::SiToFp, value)
                    .map_err(CompilerError::codegen_error)?;
                Ok(Value::Temp(cast))
            }
            (IrType::F32, IrType::I32) => {
                self.warn(&format!("Explicit assignment of {what} from float to int"));
                let cast = self
                    .builder
                    .build_cast(IrCastOp::FpToSi, value)
                    .map_err(CompilerError::codegen_error)?;
                Ok(Value::Temp(cast))
            }
            _ => Err(self.semantic_error(
                format!("Type of {what} and expression do not match"),
                location,
            )),
        }
    }
}
