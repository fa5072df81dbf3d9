mod helper_tests;

use crate::fixtures::prepare;
use jsharp_model::{CompilerOptions, SymbolStoreBuilder};

/// A compilation over nothing but the core runtime types.
pub fn core_compilation() -> jsharp::Compilation {
    prepare(SymbolStoreBuilder::new().finish(), CompilerOptions::default())
}
