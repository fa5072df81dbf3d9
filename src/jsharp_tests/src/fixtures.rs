use jsharp::Compilation;
use jsharp_model::{
    AssemblyId, Attributes, CompilerOptions, SymbolStore, SymbolStoreBuilder, TypeDef,
};

/// Runs the full import over a finished store.
pub fn prepare(store: SymbolStore, options: CompilerOptions) -> Compilation {
    let mut compilation = Compilation::new(store, options);
    compilation
        .prepare_all()
        .expect("inheritance graph is acyclic");
    compilation
}

/// A builder with one application assembly, which most tests place their
/// types in.
pub fn app_builder() -> (SymbolStoreBuilder, AssemblyId) {
    let mut builder = SymbolStoreBuilder::new();
    let assembly = builder.add_assembly("app", Attributes::default());
    (builder, assembly)
}

pub fn class(assembly: AssemblyId, namespace: &str, name: &str) -> TypeDef {
    TypeDef {
        assembly,
        namespace: namespace.to_string(),
        name: name.to_string(),
        ..TypeDef::default()
    }
}
