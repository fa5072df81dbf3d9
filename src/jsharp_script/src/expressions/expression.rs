use crate::expressions::{AssignOp, BinaryOp, UnaryOp};
use crate::statements::Stmt;
use jsharp_model::TypeId;
use serde::{Deserialize, Serialize};

/// Script expression tree. `TypeRef` carries a handle into the symbol graph
/// rather than a spelled name; it resolves to a dotted name only during
/// serialization, which is what lets a type be renamed after expressions
/// referring to it have been built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Identifier(String),
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Regex { pattern: String, flags: String },
    This,
    TypeRef(TypeId),
    Member {
        target: Box<Expr>,
        name: String,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Invocation {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Assignment {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    ArrayLiteral(Vec<Expr>),
    ObjectLiteral(Vec<(String, Expr)>),
    FunctionExpr {
        name: Option<String>,
        params: Vec<String>,
        body: Box<Stmt>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Comma(Vec<Expr>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Identifier(name.into())
    }

    pub fn num(value: f64) -> Expr {
        Expr::Number(value)
    }

    pub fn str(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    pub fn type_ref(id: TypeId) -> Expr {
        Expr::TypeRef(id)
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Expr {
        Expr::Member {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn index(target: Expr, index: Expr) -> Expr {
        Expr::Index {
            target: Box::new(target),
            index: Box::new(index),
        }
    }

    pub fn invoke(target: Expr, args: Vec<Expr>) -> Expr {
        Expr::Invocation {
            target: Box::new(target),
            args,
        }
    }

    pub fn new_object(target: Expr, args: Vec<Expr>) -> Expr {
        Expr::New {
            target: Box::new(target),
            args,
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn not(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Not, operand)
    }

    pub fn assign(target: Expr, value: Expr) -> Expr {
        Expr::Assignment {
            op: AssignOp::Assign,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn function(params: Vec<&str>, body: Stmt) -> Expr {
        Expr::FunctionExpr {
            name: None,
            params: params.into_iter().map(|p| p.to_string()).collect(),
            body: Box::new(body),
        }
    }

    pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
        Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, Expr::Null)
    }
}
