//! jsharp compiler core: metadata import, runtime-call emission and
//! state-machine rewriting for translating a C#-family language to script.

pub mod compiler;

pub use compiler::Compilation;

pub use jsharp_import as import;
pub use jsharp_model as model;
pub use jsharp_rewriter as rewriter;
pub use jsharp_runtime as runtime;
pub use jsharp_script as script;
