pub mod emit_trait;
pub mod expressions;
pub mod statements;

pub use emit_trait::{Emit, EmitCtx, EmitError, Emitter, TypeNameResolver};
