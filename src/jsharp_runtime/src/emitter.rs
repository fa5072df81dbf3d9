use jsharp_import::MetadataImporter;
use jsharp_model::{CompilerOptions, SymbolStore};
use jsharp_script::Expr;

/// Stateless builder for expressions the target runtime cannot express
/// directly. Keyed only by the two configuration flags; the store and the
/// importer are read-only context.
pub struct RuntimeCallEmitter<'a> {
    pub(crate) store: &'a SymbolStore,
    pub(crate) importer: &'a MetadataImporter,
    pub(crate) omit_downcasts: bool,
    pub(crate) omit_nullable_checks: bool,
}

impl<'a> RuntimeCallEmitter<'a> {
    pub fn new(
        store: &'a SymbolStore,
        importer: &'a MetadataImporter,
        options: CompilerOptions,
    ) -> Self {
        RuntimeCallEmitter {
            store,
            importer,
            omit_downcasts: options.omit_downcasts,
            omit_nullable_checks: options.omit_nullable_checks,
        }
    }

    /// A helper on the top-level runtime object.
    pub(crate) fn script_member(&self, name: &str) -> Expr {
        Expr::member(Expr::type_ref(self.store.core.script), name)
    }

    pub(crate) fn script_call(&self, name: &str, args: Vec<Expr>) -> Expr {
        Expr::invoke(self.script_member(name), args)
    }

    pub(crate) fn nullable_call(&self, name: &str, args: Vec<Expr>) -> Expr {
        Expr::invoke(
            Expr::member(Expr::type_ref(self.store.core.nullable), name),
            args,
        )
    }

    // ----- reflection-style invocations -----

    /// Invokes a constructor with a runtime-determined argument array.
    pub fn apply_constructor(&self, constructor: Expr, argument_array: Expr) -> Expr {
        self.script_call("applyConstructor", vec![constructor, argument_array])
    }

    pub fn shallow_copy(&self, source: Expr, target: Expr) -> Expr {
        self.script_call("shallowCopy", vec![source, target])
    }
}
