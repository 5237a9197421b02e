//! mcc - mini-C compiler driver
//!
//! Reads one mini-C source file, runs the frontend pipeline, and writes
//! the IR module to `output.ll` (or the path given with `-o`). Any error
//! prints a single diagnostic to stderr and exits non-zero; the output
//! file is only opened after lowering succeeds.

use clap::Parser;
use mcc_frontend::ast::printer;
use mcc_frontend::Frontend;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mcc")]
#[command(about = "Mini-C compiler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input mini-C source file
    input: PathBuf,

    /// Output file for the IR module
    #[arg(short, long, default_value = "output.ll")]
    output: PathBuf,

    /// Print the AST as an indented tree before lowering
    #[arg(long)]
    print_ast: bool,

    /// Print the IR module to stdout after lowering
    #[arg(long)]
    print_ir: bool,

    /// Save the IR module as JSON (tooling hook)
    #[arg(long)]
    save_ir: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = compile_file(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn compile_file(cli: &Cli) -> anyhow::Result<()> {
    log::info!("compiling {}", cli.input.display());
    let source = fs::read_to_string(&cli.input)
        .map_err(mcc_common::CompilerError::from)?;

    let program = Frontend::parse_source(&source)?;
    log::info!(
        "parsed {} externs and {} declarations",
        program.externs.len(),
        program.decls.len()
    );

    if cli.print_ast {
        println!("{}", printer::format_program(&program));
    }

    let module = mcc_frontend::CodeGenerator::new("mini-c").generate(&program)?;
    log::info!("lowered {} functions", module.functions.len());

    if cli.print_ir {
        print!("{module}");
    }

    if let Some(path) = &cli.save_ir {
        fs::write(path, serde_json::to_string_pretty(&module)?)?;
        log::info!("IR saved as JSON to {}", path.display());
    }

    fs::write(&cli.output, format!("{module}"))?;
    log::info!("IR written to {}", cli.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_for(input: &std::path::Path, output: &std::path::Path) -> Cli {
        Cli {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            print_ast: false,
            print_ir: false,
            save_ir: None,
        }
    }

    #[test]
    fn test_compile_file_writes_module() {
        let dir = std::env::temp_dir();
        let input = dir.join("mcc_driver_test.c");
        let output = dir.join("mcc_driver_test.ll");
        fs::write(&input, "int main(){ return 0; }").unwrap();

        compile_file(&cli_for(&input, &output)).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("define i32 @main()"));
        assert!(written.contains("ret i32 0"));

        fs::remove_file(&input).ok();
        fs::remove_file(&output).ok();
    }

    #[test]
    fn test_compile_file_fails_without_writing_output() {
        let dir = std::env::temp_dir();
        let input = dir.join("mcc_driver_bad_test.c");
        let output = dir.join("mcc_driver_bad_test.ll");
        fs::write(&input, "int main(){ return y; }").unwrap();
        fs::remove_file(&output).ok();

        assert!(compile_file(&cli_for(&input, &output)).is_err());
        assert!(!output.exists());

        fs::remove_file(&input).ok();
    }

    #[test]
    fn test_missing_input_is_an_io_error() {
        let dir = std::env::temp_dir();
        let cli = cli_for(&dir.join("mcc_no_such_file.c"), &dir.join("out.ll"));
        let err = compile_file(&cli).unwrap_err();
        assert!(format!("{err}").contains("IO error"));
    }
}
