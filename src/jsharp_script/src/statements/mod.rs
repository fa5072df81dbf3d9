pub mod statement;

pub use statement::{CatchClause, ForInit, Stmt, SwitchSection, VarDeclarator};
