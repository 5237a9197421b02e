//! Code generation: type/scope analysis and AST-to-IR lowering
//!
//! Walks the AST once, checking types as it goes and issuing IR builder
//! calls. There is no separate type-checking pass: the first violation
//! aborts lowering with a semantic error carrying the offending token's
//! position.
//!
//! Numeric coercions between `int` and `float` are inserted implicitly
//! for assignments, call arguments, and returns, each accompanied by a
//! `WARNING:` line on stderr; mixed-type arithmetic widens the `int`
//! operand. All other mismatches are fatal.

mod expressions;
mod functions;
mod scope;
mod statements;

pub use scope::{ScopeStack, Slot};

use crate::ast::{Decl, Program};
use crate::ir::{IrBuilder, IrType, Module};
use crate::types::Type;
use mcc_common::{CompilerError, SourceLocation};

/// Map a source type annotation onto its IR type
pub fn convert_type(ty: Type) -> IrType {
    match ty {
        Type::Int => IrType::I32,
        Type::Float => IrType::F32,
        Type::Bool => IrType::I1,
        Type::Void => IrType::Void,
    }
}

/// AST-to-IR code generator
pub struct CodeGenerator {
    pub(crate) module: Module,
    pub(crate) builder: IrBuilder,
    pub(crate) scopes: ScopeStack,
    pub(crate) current_return_type: Option<IrType>,
}

impl CodeGenerator {
    pub fn new(module_name: &str) -> Self {
        Self {
            module: Module::new(module_name),
            builder: IrBuilder::new(),
            scopes: ScopeStack::new(),
            current_return_type: None,
        }
    }

    /// Lower a whole program: externs first, then declarations in source
    /// order. Consumes the generator and yields the finished module.
    pub fn generate(mut self, program: &Program) -> Result<Module, CompilerError> {
        log::debug!(
            "lowering program: {} externs, {} declarations",
            program.externs.len(),
            program.decls.len()
        );

        for proto in &program.externs {
            self.lower_extern(proto)?;
        }

        for decl in &program.decls {
            match decl {
                Decl::Global(var) => self.lower_global(var)?,
                Decl::Function(func) => self.lower_function(func)?,
            }
        }

        Ok(self.module)
    }

    /// A semantic error at the offending token
    pub(crate) fn semantic_error(
        &self,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> CompilerError {
        CompilerError::semantic_error(message, location)
    }

    /// Print a numeric-conversion warning; warnings never stop compilation
    pub(crate) fn warn(&self, message: &str) {
        eprintln!("WARNING: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TokenStream};
    use crate::parser::Parser;

    fn compile(source: &str) -> Result<Module, CompilerError> {
        let stream = TokenStream::new(Lexer::new(source))?;
        let program = Parser::new(stream).parse_program()?;
        CodeGenerator::new("test").generate(&program)
    }

    #[test]
    fn test_empty_program_yields_empty_module() {
        let module = compile("").unwrap();
        assert!(module.functions.is_empty());
        assert!(module.globals.is_empty());
    }

    #[test]
    fn test_return_constant() {
        let module = compile("int main(){ return 0; }").unwrap();
        assert_eq!(module.functions.len(), 1);

        let main = &module.functions[0];
        assert_eq!(main.name, "main");
        assert_eq!(main.return_type, IrType::I32);
        assert_eq!(main.blocks.len(), 1);
        assert_eq!(main.blocks[0].label, "entry");
        assert!(main.blocks[0].has_terminator());

        let printed = format!("{module}");
        assert!(printed.contains("define i32 @main()"));
        assert!(printed.contains("ret i32 0"));
    }

    #[test]
    fn test_add_function_stores_params_into_slots() {
        let module = compile("int add(int a, int b){ return a + b; }").unwrap();
        let add = &module.functions[0];
        assert_eq!(add.params.len(), 2);

        let printed = format!("{module}");
        assert!(printed.contains("define i32 @add(i32 %a, i32 %b)"));
        // Both params are spilled into entry-block slots, then loaded
        assert!(printed.contains("store i32 %a, i32* %0"));
        assert!(printed.contains("store i32 %b, i32* %1"));
        assert!(printed.contains("add i32"));
    }

    #[test]
    fn test_widening_return_emits_sitofp() {
        let module = compile("float f(int x){ return x + 1; }").unwrap();
        let printed = format!("{module}");
        assert!(printed.contains("sitofp i32"));
        assert!(printed.contains("ret float"));
    }

    #[test]
    fn test_extern_call() {
        let module =
            compile("extern int putchar(int c); int main(){ putchar(65); return 0; }").unwrap();
        let printed = format!("{module}");
        assert!(printed.contains("declare i32 @putchar(i32)"));
        assert!(printed.contains("call i32 @putchar(i32 65)"));
    }

    #[test]
    fn test_global_zero_init_store_and_load() {
        let module = compile("int g; int main(){ g = 5; return g; }").unwrap();
        assert_eq!(module.globals.len(), 1);
        assert_eq!(module.globals[0].var_type, IrType::I32);

        let printed = format!("{module}");
        assert!(printed.contains("@g = common global i32 0, align 4"));
        assert!(printed.contains("store i32 5, i32* @g"));
        assert!(printed.contains("load i32, i32* @g"));
    }

    #[test]
    fn test_if_else_block_structure() {
        let module =
            compile("int main(){ if (1 == 1) { return 1; } else { return 0; } }").unwrap();
        let main = &module.functions[0];

        let labels: Vec<&str> = main.blocks.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["entry", "ifthen", "elsethen", "cont"]);

        // Both arms return, and the trailing branch to the merge block is
        // still emitted (dead but permitted)
        let printed = format!("{module}");
        assert!(printed.contains("br i1"));
        let ifthen = main.get_block("ifthen").unwrap();
        assert!(matches!(
            ifthen.instructions[ifthen.instructions.len() - 2],
            crate::ir::Instruction::Return(_)
        ));
        assert_eq!(
            ifthen.instructions.last(),
            Some(&crate::ir::Instruction::Branch("cont".to_string()))
        );
    }
}
