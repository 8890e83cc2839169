//! Renderer from IR nodes to PHP source text.
//!
//! A single exhaustive match per node category, writing into a string
//! buffer. Rendering is pure and happens exactly once per output file.

use crate::expr::{ArrayKey, CallTarget, Expr, Literal, Member, StrValue};
use crate::stmt::{Block, Stmt};
use crate::RenderError;

const INDENT: &str = "    ";

/// Render one expression to source text.
pub fn expr_to_source(expr: &Expr) -> Result<String, RenderError> {
    let mut out = String::new();
    write_expr(&mut out, expr)?;
    Ok(out)
}

/// Render one statement to source text, terminator included.
pub fn stmt_to_source(stmt: &Stmt) -> Result<String, RenderError> {
    let mut out = String::new();
    write_stmt(&mut out, stmt, 0)?;
    Ok(out)
}

/// Render a block to source text. An empty block renders as empty text.
pub fn block_to_source(block: &Block) -> Result<String, RenderError> {
    let mut out = String::new();
    for stmt in block.stmts() {
        write_stmt(&mut out, stmt, 0)?;
    }
    Ok(out)
}

fn write_expr(out: &mut String, expr: &Expr) -> Result<(), RenderError> {
    match expr {
        Expr::Var(name) => {
            out.push('$');
            out.push_str(name);
        }
        Expr::Literal(literal) => write_literal(out, literal)?,
        Expr::Array(lit) => {
            out.push('[');
            let list_form = lit.is_list();
            for (i, (key, value)) in lit.entries().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if !list_form {
                    write_array_key(out, key)?;
                    out.push_str(" => ");
                }
                write_expr(out, value)?;
            }
            out.push(']');
        }
        Expr::Concat(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(" . ");
                }
                write_expr(out, item)?;
            }
        }
        Expr::Call { target, name, args } => {
            match target {
                CallTarget::Receiver(recv) => {
                    write_expr(out, recv)?;
                    out.push_str("->");
                }
                CallTarget::This => out.push_str("$this->"),
                CallTarget::Class(class) => {
                    out.push_str(class);
                    out.push_str("::");
                }
            }
            out.push_str(name);
            out.push('(');
            write_args(out, args)?;
            out.push(')');
        }
        Expr::New { class, args } => {
            out.push_str("new ");
            out.push_str(class);
            out.push('(');
            write_args(out, args)?;
            out.push(')');
        }
        Expr::ClassConst(class) => {
            out.push_str(class);
            out.push_str("::class");
        }
        Expr::Index { recv, key } => {
            write_expr(out, recv)?;
            out.push('[');
            write_expr(out, key)?;
            out.push(']');
        }
        Expr::IsSet(inner) => {
            out.push_str("isset(");
            write_expr(out, inner)?;
            out.push(')');
        }
        Expr::SelfAccess(member) => match member {
            Member::Const(name) => {
                out.push_str("self::");
                out.push_str(name);
            }
            Member::StaticProp(name) => {
                out.push_str("self::$");
                out.push_str(name);
            }
        },
    }
    Ok(())
}

fn write_args(out: &mut String, args: &[Expr]) -> Result<(), RenderError> {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, arg)?;
    }
    Ok(())
}

fn write_literal(out: &mut String, literal: &Literal) -> Result<(), RenderError> {
    match literal {
        Literal::Int(value) => out.push_str(&value.to_string()),
        Literal::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        Literal::Str(StrValue::Raw(text)) => out.push_str(text),
        Literal::Str(StrValue::Literal(text)) => {
            out.push('\'');
            out.push_str(&escape_single_quoted(text)?);
            out.push('\'');
        }
    }
    Ok(())
}

fn write_array_key(out: &mut String, key: &ArrayKey) -> Result<(), RenderError> {
    match key {
        ArrayKey::Int(value) => out.push_str(&value.to_string()),
        ArrayKey::Str(text) => {
            out.push('\'');
            out.push_str(&escape_single_quoted(text)?);
            out.push('\'');
        }
    }
    Ok(())
}

/// Escape text for a single-quoted PHP string. Control characters have no
/// escape in this quoting form and are rejected.
fn escape_single_quoted(text: &str) -> Result<String, RenderError> {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            c if c.is_control() => {
                return Err(RenderError::UnrenderableValue(format!(
                    "control character {c:?} in string literal"
                )));
            }
            c => escaped.push(c),
        }
    }
    Ok(escaped)
}

fn write_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn write_block(out: &mut String, block: &Block, level: usize) -> Result<(), RenderError> {
    for stmt in block.stmts() {
        write_stmt(out, stmt, level)?;
    }
    Ok(())
}

fn write_stmt(out: &mut String, stmt: &Stmt, level: usize) -> Result<(), RenderError> {
    match stmt {
        Stmt::Expr(expr) => {
            write_indent(out, level);
            write_expr(out, expr)?;
            out.push_str(";\n");
        }
        Stmt::Assign { target, value } => {
            write_indent(out, level);
            write_expr(out, target)?;
            out.push_str(" = ");
            write_expr(out, value)?;
            out.push_str(";\n");
        }
        Stmt::Return(value) => {
            write_indent(out, level);
            out.push_str("return ");
            write_expr(out, value)?;
            out.push_str(";\n");
        }
        Stmt::If { cond, then } => {
            write_indent(out, level);
            out.push_str("if (");
            write_expr(out, cond)?;
            out.push_str(") {\n");
            write_block(out, then, level + 1)?;
            write_indent(out, level);
            out.push_str("}\n");
        }
        Stmt::TryFinally { body, finally } => {
            write_indent(out, level);
            out.push_str("try {\n");
            write_block(out, body, level + 1)?;
            write_indent(out, level);
            out.push('}');
            if let Some(finally) = finally {
                out.push_str(" finally {\n");
                write_block(out, finally, level + 1)?;
                write_indent(out, level);
                out.push('}');
            }
            out.push('\n');
        }
    }
    Ok(())
}
