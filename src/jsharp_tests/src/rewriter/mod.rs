mod hoist_tests;

use jsharp_script::{Expr, Stmt, SwitchSection};

/// An opaque single-identifier expression statement; stands in for real code.
pub fn estmt(name: &str) -> Stmt {
    Stmt::expr(Expr::ident(name))
}

pub fn assign_state(var: &str, state: f64) -> Stmt {
    Stmt::expr(Expr::assign(Expr::ident(var), Expr::num(state)))
}

pub fn cont(label: &str) -> Stmt {
    Stmt::Continue(Some(label.to_string()))
}

pub fn brk(label: &str) -> Stmt {
    Stmt::Break(Some(label.to_string()))
}

pub fn case(state: f64, body: Vec<Stmt>) -> SwitchSection {
    SwitchSection {
        values: vec![Some(Expr::num(state))],
        body,
    }
}

pub fn default_case(body: Vec<Stmt>) -> SwitchSection {
    SwitchSection {
        values: vec![None],
        body,
    }
}

/// The dispatch loop shape the rewriter emits.
pub fn machine(loop_label: &str, state_var: &str, sections: Vec<SwitchSection>) -> Stmt {
    Stmt::labeled(
        loop_label,
        Stmt::loop_forever(Stmt::Block(vec![Stmt::Switch {
            discriminant: Expr::ident(state_var),
            sections,
        }])),
    )
}
