use crate::emitters::emit_trait::{Emit, EmitCtx, EmitError};
use crate::expressions::Expr;
use std::fmt::Write;

impl Emit for Expr {
    fn emit<W: Write>(&self, w: &mut W, cx: &mut EmitCtx) -> Result<(), EmitError> {
        emit_expr(self, w, cx, 0)
    }
}

/// Binding strength of a node; larger binds tighter.
fn prec(e: &Expr) -> u8 {
    match e {
        Expr::Identifier(_)
        | Expr::Number(_)
        | Expr::String(_)
        | Expr::Bool(_)
        | Expr::Null
        | Expr::Regex { .. }
        | Expr::This
        | Expr::TypeRef(_)
        | Expr::ArrayLiteral(_)
        | Expr::ObjectLiteral(_)
        | Expr::FunctionExpr { .. } => 18,
        Expr::Member { .. } | Expr::Index { .. } | Expr::Invocation { .. } | Expr::New { .. } => 17,
        Expr::Unary { .. } => 15,
        Expr::Binary { op, .. } => op.precedence(),
        Expr::Conditional { .. } => 4,
        Expr::Assignment { .. } => 3,
        Expr::Comma(_) => 1,
    }
}

fn emit_number<W: Write>(value: f64, w: &mut W) -> Result<(), EmitError> {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        write!(w, "{}", value as i64)?;
    } else {
        write!(w, "{}", value)?;
    }
    Ok(())
}

fn emit_string<W: Write>(value: &str, w: &mut W) -> Result<(), EmitError> {
    w.write_char('\'')?;
    for c in value.chars() {
        match c {
            '\\' => w.write_str("\\\\")?,
            '\'' => w.write_str("\\'")?,
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '\t' => w.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(w, "\\x{:02x}", c as u32)?,
            c => w.write_char(c)?,
        }
    }
    w.write_char('\'')?;
    Ok(())
}

fn emit_args<W: Write>(args: &[Expr], w: &mut W, cx: &mut EmitCtx) -> Result<(), EmitError> {
    w.write_char('(')?;
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        emit_expr(a, w, cx, 2)?;
    }
    w.write_char(')')?;
    Ok(())
}

pub(crate) fn emit_expr<W: Write>(
    e: &Expr,
    w: &mut W,
    cx: &mut EmitCtx,
    min_prec: u8,
) -> Result<(), EmitError> {
    let own = prec(e);
    let needs_parens = own < min_prec;
    if needs_parens {
        w.write_char('(')?;
    }
    match e {
        Expr::Identifier(name) => w.write_str(name)?,
        Expr::Number(n) => emit_number(*n, w)?,
        Expr::String(s) => emit_string(s, w)?,
        Expr::Bool(b) => w.write_str(if *b { "true" } else { "false" })?,
        Expr::Null => w.write_str("null")?,
        Expr::Regex { pattern, flags } => write!(w, "/{}/{}", pattern, flags)?,
        Expr::This => w.write_str("this")?,
        Expr::TypeRef(id) => {
            let resolver = cx.resolver.ok_or(EmitError::UnresolvedTypeRef(*id))?;
            let name = resolver
                .dotted_name(*id)
                .ok_or(EmitError::UnresolvedTypeRef(*id))?;
            w.write_str(&name)?;
        }
        Expr::Member { target, name } => {
            emit_expr(target, w, cx, 17)?;
            w.write_char('.')?;
            w.write_str(name)?;
        }
        Expr::Index { target, index } => {
            emit_expr(target, w, cx, 17)?;
            w.write_char('[')?;
            emit_expr(index, w, cx, 2)?;
            w.write_char(']')?;
        }
        Expr::Invocation { target, args } => {
            emit_expr(target, w, cx, 17)?;
            emit_args(args, w, cx)?;
        }
        Expr::New { target, args } => {
            w.write_str("new ")?;
            emit_expr(target, w, cx, 17)?;
            emit_args(args, w, cx)?;
        }
        Expr::Binary { op, left, right } => {
            let p = op.precedence();
            emit_expr(left, w, cx, p)?;
            write!(w, " {} ", op.symbol())?;
            emit_expr(right, w, cx, p + 1)?;
        }
        Expr::Unary { op, operand } => {
            w.write_str(op.symbol())?;
            if op.is_word() {
                w.write_char(' ')?;
            }
            emit_expr(operand, w, cx, 15)?;
        }
        Expr::Assignment { op, target, value } => {
            emit_expr(target, w, cx, 16)?;
            write!(w, " {} ", op.symbol())?;
            emit_expr(value, w, cx, 3)?;
        }
        Expr::ArrayLiteral(items) => {
            w.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.write_str(", ")?;
                }
                emit_expr(item, w, cx, 2)?;
            }
            w.write_char(']')?;
        }
        Expr::ObjectLiteral(entries) => {
            if entries.is_empty() {
                w.write_str("{}")?;
            } else {
                w.write_str("{ ")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        w.write_str(", ")?;
                    }
                    write!(w, "{}: ", key)?;
                    emit_expr(value, w, cx, 2)?;
                }
                w.write_str(" }")?;
            }
        }
        Expr::FunctionExpr { name, params, body } => {
            w.write_str("function")?;
            if let Some(n) = name {
                write!(w, " {}", n)?;
            }
            w.write_char('(')?;
            w.write_str(&params.join(", "))?;
            w.write_str(") ")?;
            body.emit(w, cx)?;
        }
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => {
            emit_expr(test, w, cx, 5)?;
            w.write_str(" ? ")?;
            emit_expr(consequent, w, cx, 4)?;
            w.write_str(" : ")?;
            emit_expr(alternate, w, cx, 4)?;
        }
        Expr::Comma(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.write_str(", ")?;
                }
                emit_expr(item, w, cx, 2)?;
            }
        }
    }
    if needs_parens {
        w.write_char(')')?;
    }
    Ok(())
}
