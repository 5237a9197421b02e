//! Indented tree printer for the AST
//!
//! Renders a program as a `|____`-prefixed tree for `--print-ast`. The
//! format is stable but diagnostic-only; nothing downstream parses it.

use super::{Block, Decl, Expression, ExpressionKind, Program, Prototype, Statement, StatementKind};

/// Format a whole program as an indented tree
pub fn format_program(program: &Program) -> String {
    let mut out = String::from("Program:");

    for proto in &program.externs {
        out.push_str("\n|____Extern: ");
        out.push_str(&format_prototype(proto));
    }

    for decl in &program.decls {
        match decl {
            Decl::Global(var) => {
                out.push_str(&format!(
                    "\n|____Variable Decl: {} {}",
                    var.var_type, var.name
                ));
            }
            Decl::Function(func) => {
                out.push_str("\n|____Function: ");
                out.push_str(&format_prototype(&func.proto));
                format_block(&func.body, 2, &mut out);
            }
        }
    }

    out.push_str("\n|EOF");
    out
}

fn format_prototype(proto: &Prototype) -> String {
    let params: Vec<String> = proto
        .params
        .iter()
        .map(|p| format!("{} {}", p.param_type, p.name))
        .collect();
    format!("{}({}) -> {}", proto.name, params.join(", "), proto.return_type)
}

fn indent(depth: usize, out: &mut String) {
    out.push('\n');
    for _ in 0..depth.saturating_sub(1) {
        out.push_str("|    ");
    }
    out.push_str("|____");
}

fn format_block(block: &Block, depth: usize, out: &mut String) {
    for local in &block.locals {
        indent(depth, out);
        out.push_str(&format!("Variable Decl: {} {}", local.var_type, local.name));
    }
    for stmt in &block.statements {
        format_statement(stmt, depth, out);
    }
}

fn format_statement(stmt: &Statement, depth: usize, out: &mut String) {
    match &stmt.kind {
        StatementKind::Expression(expr) => {
            indent(depth, out);
            out.push_str(&format_expression(expr));
        }
        StatementKind::Block(block) => {
            format_block(block, depth + 1, out);
        }
        StatementKind::If {
            condition,
            then_block,
            else_block,
        } => {
            indent(depth, out);
            out.push_str(&format!("If: {}", format_expression(condition)));
            format_block(then_block, depth + 1, out);
            if let Some(else_block) = else_block {
                indent(depth, out);
                out.push_str("Else:");
                format_block(else_block, depth + 1, out);
            }
        }
        StatementKind::While { condition, body } => {
            indent(depth, out);
            out.push_str(&format!("While: {}", format_expression(condition)));
            format_statement(body, depth + 1, out);
        }
        StatementKind::Return(Some(expr)) => {
            indent(depth, out);
            out.push_str(&format!("Return: {}", format_expression(expr)));
        }
        StatementKind::Return(None) => {
            indent(depth, out);
            out.push_str("Return:");
        }
        StatementKind::Empty => {}
    }
}

fn format_expression(expr: &Expression) -> String {
    match &expr.kind {
        ExpressionKind::IntLiteral(n) => n.to_string(),
        ExpressionKind::FloatLiteral(x) => format!("{x:?}"),
        ExpressionKind::BoolLiteral(b) => b.to_string(),
        ExpressionKind::Variable(name) => name.clone(),
        ExpressionKind::Unary { op, operand } => {
            format!("{}{}", op, format_expression(operand))
        }
        ExpressionKind::Binary { op, left, right } => {
            format!(
                "{} {} {}",
                format_expression(left),
                op,
                format_expression(right)
            )
        }
        ExpressionKind::Call { callee, arguments } => {
            let args: Vec<String> = arguments.iter().map(format_expression).collect();
            format!("{}({})", callee, args.join(", "))
        }
        ExpressionKind::Assign { name, value } => {
            format!("Assign: {} = {}", name, format_expression(value))
        }
    }
}
