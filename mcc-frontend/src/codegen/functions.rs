//! Function and global emission
//!
//! Externs and definitions share the prototype translation; any function
//! name already present in the module is a redefinition. A definition
//! spills each incoming parameter into an entry-block slot so that
//! parameters behave exactly like locals from then on.

use super::{convert_type, CodeGenerator, Slot};
use crate::ast::{FunctionDefinition, Prototype, VarDecl};
use crate::ir::{Function, GlobalVariable, IrType, Value};
use mcc_common::CompilerError;

impl CodeGenerator {
    fn lower_prototype(&self, proto: &Prototype) -> (Vec<(String, IrType)>, IrType) {
        let params = proto
            .params
            .iter()
            .map(|p| (p.name.clone(), convert_type(p.param_type)))
            .collect();
        (params, convert_type(proto.return_type))
    }

    /// Declare an extern function (no body)
    pub(crate) fn lower_extern(&mut self, proto: &Prototype) -> Result<(), CompilerError> {
        if self.module.get_function(&proto.name).is_some() {
            return Err(self.semantic_error("Function has already been defined", proto.location));
        }

        log::debug!("declaring extern function {}", proto.name);
        let (params, return_type) = self.lower_prototype(proto);
        self.module
            .add_function(Function::new(proto.name.clone(), return_type, params, true));
        Ok(())
    }

    /// Emit a module-level global with a zero initializer
    pub(crate) fn lower_global(&mut self, var: &VarDecl) -> Result<(), CompilerError> {
        if self.module.get_global(&var.name).is_some() {
            return Err(self.semantic_error(
                "Variable already declared in the global scope",
                var.location,
            ));
        }

        let var_type = convert_type(var.var_type);
        let initializer = var_type
            .zero_value()
            .ok_or_else(|| self.semantic_error("Unknown type", var.location))?;

        log::debug!("defining global {} : {}", var.name, var_type);
        self.module.add_global(GlobalVariable {
            name: var.name.clone(),
            var_type,
            initializer,
        });
        Ok(())
    }

    /// Emit a function definition
    pub(crate) fn lower_function(&mut self, func: &FunctionDefinition) -> Result<(), CompilerError> {
        let proto = &func.proto;
        if self.module.get_function(&proto.name).is_some() {
            return Err(self.semantic_error("Function has already been defined", proto.location));
        }

        log::debug!("lowering function {}", proto.name);
        let (params, return_type) = self.lower_prototype(proto);
        self.builder
            .create_function(proto.name.clone(), return_type, params);
        let entry = self.builder.new_label("entry");
        self.builder
            .create_block(&entry)
            .map_err(CompilerError::codegen_error)?;

        self.current_return_type = Some(return_type);
        self.scopes.push();
        let result = self.lower_function_body(func, return_type);
        self.scopes.pop();
        self.current_return_type = None;
        result?;

        let function = self
            .builder
            .finish_function()
            .ok_or_else(|| CompilerError::codegen_error("No function under construction"))?;
        self.module.add_function(function);
        Ok(())
    }

    fn lower_function_body(
        &mut self,
        func: &FunctionDefinition,
        return_type: IrType,
    ) -> Result<(), CompilerError> {
        for param in &func.proto.params {
            if self.scopes.declared_anywhere(&param.name) {
                return Err(self.semantic_error(
                    "Variable already declared in the local scope",
                    param.location,
                ));
            }

            let ty = convert_type(param.param_type);
            let slot = self
                .builder
                .build_entry_alloca(ty)
                .map_err(CompilerError::codegen_error)?;
            self.builder
                .build_store(ty, Value::Param(param.name.clone()), Value::Temp(slot))
                .map_err(CompilerError::codegen_error)?;
            self.scopes.declare(
                param.name.as_str(),
                Slot {
                    ptr: Value::Temp(slot),
                    ty,
                },
            );
        }

        self.lower_block(&func.body)?;

        // A body whose final block falls off the end gets an implicit
        // default return: 0 / 0.0 / false, or ret void.
        if !self.builder.current_block_has_terminator() {
            let ret = return_type.zero_value().map(|zero| (return_type, zero));
            self.builder
                .build_return(ret)
                .map_err(CompilerError::codegen_error)?;
        }

        Ok(())
    }
}
