use crate::emitters::emit_trait::{Emit, EmitCtx, EmitError};
use crate::emitters::expressions::emit_expr;
use crate::statements::{ForInit, Stmt, VarDeclarator};
use std::fmt::Write;

impl Emit for Stmt {
    fn emit<W: Write>(&self, w: &mut W, cx: &mut EmitCtx) -> Result<(), EmitError> {
        match self {
            Stmt::Block(stmts) => {
                w.write_str("{\n")?;
                cx.indent += 1;
                for s in stmts {
                    cx.write_indent(w)?;
                    s.emit(w, cx)?;
                    w.write_char('\n')?;
                }
                cx.indent -= 1;
                cx.write_indent(w)?;
                w.write_char('}')?;
            }
            Stmt::Expr(e) => {
                e.emit(w, cx)?;
                w.write_char(';')?;
            }
            Stmt::VarDecl(decls) => {
                emit_var_decls(decls, w, cx)?;
                w.write_char(';')?;
            }
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                w.write_str("if (")?;
                test.emit(w, cx)?;
                w.write_str(") ")?;
                consequent.emit(w, cx)?;
                if let Some(alt) = alternate {
                    w.write_str("\n")?;
                    cx.write_indent(w)?;
                    w.write_str("else ")?;
                    alt.emit(w, cx)?;
                }
            }
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                w.write_str("for (")?;
                match init {
                    Some(ForInit::Decl(decls)) => emit_var_decls(decls, w, cx)?,
                    Some(ForInit::Expr(e)) => e.emit(w, cx)?,
                    None => {}
                }
                w.write_char(';')?;
                if let Some(t) = test {
                    w.write_char(' ')?;
                    t.emit(w, cx)?;
                }
                w.write_char(';')?;
                if let Some(u) = update {
                    w.write_char(' ')?;
                    u.emit(w, cx)?;
                }
                w.write_str(") ")?;
                body.emit(w, cx)?;
            }
            Stmt::ForIn {
                is_decl,
                name,
                object,
                body,
            } => {
                w.write_str("for (")?;
                if *is_decl {
                    w.write_str("var ")?;
                }
                w.write_str(name)?;
                w.write_str(" in ")?;
                object.emit(w, cx)?;
                w.write_str(") ")?;
                body.emit(w, cx)?;
            }
            Stmt::While { test, body } => {
                w.write_str("while (")?;
                test.emit(w, cx)?;
                w.write_str(") ")?;
                body.emit(w, cx)?;
            }
            Stmt::DoWhile { body, test } => {
                w.write_str("do ")?;
                body.emit(w, cx)?;
                w.write_str(" while (")?;
                test.emit(w, cx)?;
                w.write_str(");")?;
            }
            Stmt::Switch {
                discriminant,
                sections,
            } => {
                w.write_str("switch (")?;
                discriminant.emit(w, cx)?;
                w.write_str(") {\n")?;
                cx.indent += 1;
                for section in sections {
                    for value in &section.values {
                        cx.write_indent(w)?;
                        match value {
                            Some(v) => {
                                w.write_str("case ")?;
                                v.emit(w, cx)?;
                                w.write_str(":\n")?;
                            }
                            None => w.write_str("default:\n")?,
                        }
                    }
                    cx.indent += 1;
                    for s in &section.body {
                        cx.write_indent(w)?;
                        s.emit(w, cx)?;
                        w.write_char('\n')?;
                    }
                    cx.indent -= 1;
                }
                cx.indent -= 1;
                cx.write_indent(w)?;
                w.write_char('}')?;
            }
            Stmt::Try {
                body,
                catch,
                finally,
            } => {
                w.write_str("try ")?;
                body.emit(w, cx)?;
                if let Some(c) = catch {
                    w.write_str(" catch (")?;
                    w.write_str(c.param.as_deref().unwrap_or("$e"))?;
                    w.write_str(") ")?;
                    c.body.emit(w, cx)?;
                }
                if let Some(f) = finally {
                    w.write_str(" finally ")?;
                    f.emit(w, cx)?;
                }
            }
            Stmt::Throw(e) => {
                w.write_str("throw ")?;
                e.emit(w, cx)?;
                w.write_char(';')?;
            }
            Stmt::Return(value) => {
                w.write_str("return")?;
                if let Some(v) = value {
                    w.write_char(' ')?;
                    v.emit(w, cx)?;
                }
                w.write_char(';')?;
            }
            Stmt::Break(label) => {
                w.write_str("break")?;
                if let Some(l) = label {
                    write!(w, " {}", l)?;
                }
                w.write_char(';')?;
            }
            Stmt::Continue(label) => {
                w.write_str("continue")?;
                if let Some(l) = label {
                    write!(w, " {}", l)?;
                }
                w.write_char(';')?;
            }
            Stmt::Labeled { label, stmt } => {
                write!(w, "{}:\n", label)?;
                cx.write_indent(w)?;
                stmt.emit(w, cx)?;
            }
            Stmt::Goto(label) => return Err(EmitError::UnloweredGoto(label.clone())),
            Stmt::FunctionDecl { name, params, body } => {
                write!(w, "function {}(", name)?;
                w.write_str(&params.join(", "))?;
                w.write_str(") ")?;
                body.emit(w, cx)?;
            }
            Stmt::Empty => w.write_char(';')?,
        }
        Ok(())
    }
}

fn emit_var_decls<W: Write>(
    decls: &[VarDeclarator],
    w: &mut W,
    cx: &mut EmitCtx,
) -> Result<(), EmitError> {
    w.write_str("var ")?;
    for (i, d) in decls.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        w.write_str(&d.name)?;
        if let Some(init) = &d.init {
            w.write_str(" = ")?;
            emit_expr(init, w, cx, 2)?;
        }
    }
    Ok(())
}
