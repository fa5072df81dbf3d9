pub mod emitters;
pub mod expressions;
pub mod statements;

pub use emitters::emit_trait::{Emit, EmitCtx, EmitError, Emitter, TypeNameResolver};
pub use expressions::{AssignOp, BinaryOp, Expr, UnaryOp};
pub use statements::{CatchClause, ForInit, Stmt, SwitchSection, VarDeclarator};
