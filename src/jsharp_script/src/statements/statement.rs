use crate::expressions::Expr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub name: String,
    pub init: Option<Expr>,
}

impl VarDeclarator {
    pub fn new(name: impl Into<String>, init: Option<Expr>) -> Self {
        VarDeclarator {
            name: name.into(),
            init,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
    Decl(Vec<VarDeclarator>),
    Expr(Expr),
}

/// One labeled case group; `None` among `values` is the default label.
/// Fall-through between groups is expressible but the compiler never emits it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwitchSection {
    pub values: Vec<Option<Expr>>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub param: Option<String>,
    pub body: Box<Stmt>,
}

/// Script statement tree. `Goto` exists only between the method compiler and
/// the state-machine rewriter; it has no serialized spelling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Expr(Expr),
    VarDecl(Vec<VarDeclarator>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    For {
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForIn {
        is_decl: bool,
        name: String,
        object: Expr,
        body: Box<Stmt>,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    Switch {
        discriminant: Expr,
        sections: Vec<SwitchSection>,
    },
    Try {
        body: Box<Stmt>,
        catch: Option<CatchClause>,
        finally: Option<Box<Stmt>>,
    },
    Throw(Expr),
    Return(Option<Expr>),
    Break(Option<String>),
    Continue(Option<String>),
    Labeled {
        label: String,
        stmt: Box<Stmt>,
    },
    Goto(String),
    FunctionDecl {
        name: String,
        params: Vec<String>,
        body: Box<Stmt>,
    },
    Empty,
}

impl Stmt {
    pub fn block(stmts: Vec<Stmt>) -> Stmt {
        Stmt::Block(stmts)
    }

    pub fn expr(e: Expr) -> Stmt {
        Stmt::Expr(e)
    }

    pub fn var(name: impl Into<String>, init: Option<Expr>) -> Stmt {
        Stmt::VarDecl(vec![VarDeclarator::new(name, init)])
    }

    pub fn if_then(test: Expr, consequent: Stmt) -> Stmt {
        Stmt::If {
            test,
            consequent: Box::new(consequent),
            alternate: None,
        }
    }

    pub fn if_else(test: Expr, consequent: Stmt, alternate: Stmt) -> Stmt {
        Stmt::If {
            test,
            consequent: Box::new(consequent),
            alternate: Some(Box::new(alternate)),
        }
    }

    pub fn labeled(label: impl Into<String>, stmt: Stmt) -> Stmt {
        Stmt::Labeled {
            label: label.into(),
            stmt: Box::new(stmt),
        }
    }

    pub fn goto(label: impl Into<String>) -> Stmt {
        Stmt::Goto(label.into())
    }

    pub fn ret(value: Option<Expr>) -> Stmt {
        Stmt::Return(value)
    }

    /// An endless `for (;;)` loop.
    pub fn loop_forever(body: Stmt) -> Stmt {
        Stmt::For {
            init: None,
            test: None,
            update: None,
            body: Box::new(body),
        }
    }
}
