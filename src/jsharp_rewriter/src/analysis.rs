use indexmap::IndexSet;
use jsharp_script::{Expr, ForInit, Stmt};

/// True when the body contains a goto outside nested functions. Function
/// expressions live inside expressions and are never visited, so their
/// interiors cannot contribute.
pub fn contains_goto(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Goto(_) => true,
        Stmt::Block(stmts) => stmts.iter().any(contains_goto),
        Stmt::If {
            consequent,
            alternate,
            ..
        } => contains_goto(consequent) || alternate.as_deref().map(contains_goto).unwrap_or(false),
        Stmt::For { body, .. }
        | Stmt::ForIn { body, .. }
        | Stmt::While { body, .. }
        | Stmt::DoWhile { body, .. }
        | Stmt::Labeled { stmt: body, .. } => contains_goto(body),
        Stmt::Switch { sections, .. } => sections
            .iter()
            .any(|s| s.body.iter().any(contains_goto)),
        Stmt::Try {
            body,
            catch,
            finally,
        } => {
            contains_goto(body)
                || catch.as_ref().map(|c| contains_goto(&c.body)).unwrap_or(false)
                || finally.as_deref().map(contains_goto).unwrap_or(false)
        }
        Stmt::FunctionDecl { .. } => false,
        _ => false,
    }
}

/// Labels actually targeted by a goto, at any depth outside nested functions.
pub fn goto_targets(stmt: &Stmt, out: &mut IndexSet<String>) {
    match stmt {
        Stmt::Goto(label) => {
            out.insert(label.clone());
        }
        Stmt::Block(stmts) => {
            for s in stmts {
                goto_targets(s, out);
            }
        }
        Stmt::If {
            consequent,
            alternate,
            ..
        } => {
            goto_targets(consequent, out);
            if let Some(alt) = alternate {
                goto_targets(alt, out);
            }
        }
        Stmt::For { body, .. }
        | Stmt::ForIn { body, .. }
        | Stmt::While { body, .. }
        | Stmt::DoWhile { body, .. }
        | Stmt::Labeled { stmt: body, .. } => goto_targets(body, out),
        Stmt::Switch { sections, .. } => {
            for section in sections {
                for s in &section.body {
                    goto_targets(s, out);
                }
            }
        }
        Stmt::Try {
            body,
            catch,
            finally,
        } => {
            goto_targets(body, out);
            if let Some(c) = catch {
                goto_targets(&c.body, out);
            }
            if let Some(f) = finally {
                goto_targets(f, out);
            }
        }
        _ => {}
    }
}

/// Every identifier occurring anywhere in the body, declarations and uses
/// alike, including nested functions. Synthesized state variables and loop
/// labels must not collide with any of these.
pub fn collect_used_names(stmt: &Stmt, out: &mut IndexSet<String>) {
    match stmt {
        Stmt::Block(stmts) => {
            for s in stmts {
                collect_used_names(s, out);
            }
        }
        Stmt::Expr(e) | Stmt::Throw(e) => collect_expr_names(e, out),
        Stmt::VarDecl(decls) => {
            for d in decls {
                out.insert(d.name.clone());
                if let Some(init) = &d.init {
                    collect_expr_names(init, out);
                }
            }
        }
        Stmt::If {
            test,
            consequent,
            alternate,
        } => {
            collect_expr_names(test, out);
            collect_used_names(consequent, out);
            if let Some(alt) = alternate {
                collect_used_names(alt, out);
            }
        }
        Stmt::For {
            init,
            test,
            update,
            body,
        } => {
            match init {
                Some(ForInit::Decl(decls)) => {
                    for d in decls {
                        out.insert(d.name.clone());
                        if let Some(e) = &d.init {
                            collect_expr_names(e, out);
                        }
                    }
                }
                Some(ForInit::Expr(e)) => collect_expr_names(e, out),
                None => {}
            }
            if let Some(t) = test {
                collect_expr_names(t, out);
            }
            if let Some(u) = update {
                collect_expr_names(u, out);
            }
            collect_used_names(body, out);
        }
        Stmt::ForIn {
            name, object, body, ..
        } => {
            out.insert(name.clone());
            collect_expr_names(object, out);
            collect_used_names(body, out);
        }
        Stmt::While { test, body } => {
            collect_expr_names(test, out);
            collect_used_names(body, out);
        }
        Stmt::DoWhile { body, test } => {
            collect_used_names(body, out);
            collect_expr_names(test, out);
        }
        Stmt::Switch {
            discriminant,
            sections,
        } => {
            collect_expr_names(discriminant, out);
            for section in sections {
                for v in section.values.iter().flatten() {
                    collect_expr_names(v, out);
                }
                for s in &section.body {
                    collect_used_names(s, out);
                }
            }
        }
        Stmt::Try {
            body,
            catch,
            finally,
        } => {
            collect_used_names(body, out);
            if let Some(c) = catch {
                if let Some(p) = &c.param {
                    out.insert(p.clone());
                }
                collect_used_names(&c.body, out);
            }
            if let Some(f) = finally {
                collect_used_names(f, out);
            }
        }
        Stmt::Return(Some(e)) => collect_expr_names(e, out),
        Stmt::Break(Some(l)) | Stmt::Continue(Some(l)) => {
            out.insert(l.clone());
        }
        Stmt::Labeled { label, stmt } => {
            out.insert(label.clone());
            collect_used_names(stmt, out);
        }
        Stmt::Goto(label) => {
            out.insert(label.clone());
        }
        Stmt::FunctionDecl { name, params, body } => {
            out.insert(name.clone());
            for p in params {
                out.insert(p.clone());
            }
            collect_used_names(body, out);
        }
        _ => {}
    }
}

fn collect_expr_names(expr: &Expr, out: &mut IndexSet<String>) {
    match expr {
        Expr::Identifier(name) => {
            out.insert(name.clone());
        }
        Expr::Member { target, .. } => collect_expr_names(target, out),
        Expr::Index { target, index } => {
            collect_expr_names(target, out);
            collect_expr_names(index, out);
        }
        Expr::Invocation { target, args } | Expr::New { target, args } => {
            collect_expr_names(target, out);
            for a in args {
                collect_expr_names(a, out);
            }
        }
        Expr::Binary { left, right, .. } => {
            collect_expr_names(left, out);
            collect_expr_names(right, out);
        }
        Expr::Unary { operand, .. } => collect_expr_names(operand, out),
        Expr::Assignment { target, value, .. } => {
            collect_expr_names(target, out);
            collect_expr_names(value, out);
        }
        Expr::ArrayLiteral(items) | Expr::Comma(items) => {
            for i in items {
                collect_expr_names(i, out);
            }
        }
        Expr::ObjectLiteral(entries) => {
            for (_, v) in entries {
                collect_expr_names(v, out);
            }
        }
        Expr::FunctionExpr { name, params, body } => {
            if let Some(n) = name {
                out.insert(n.clone());
            }
            for p in params {
                out.insert(p.clone());
            }
            collect_used_names(body, out);
        }
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => {
            collect_expr_names(test, out);
            collect_expr_names(consequent, out);
            collect_expr_names(alternate, out);
        }
        _ => {}
    }
}

/// Fresh-name source for state variables and loop labels; skips anything the
/// body already uses.
pub struct NameAllocator {
    used: IndexSet<String>,
    next_state: usize,
    next_loop: usize,
}

impl NameAllocator {
    pub fn new(used: IndexSet<String>) -> Self {
        NameAllocator {
            used,
            next_state: 1,
            next_loop: 1,
        }
    }

    pub fn state_var(&mut self) -> String {
        loop {
            let candidate = format!("$state{}", self.next_state);
            self.next_state += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn loop_label(&mut self) -> String {
        loop {
            let candidate = format!("$loop{}", self.next_loop);
            self.next_loop += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
