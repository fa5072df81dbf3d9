use crate::emitter::RuntimeCallEmitter;
use jsharp_script::Expr;

impl<'a> RuntimeCallEmitter<'a> {
    /// Single-dimensional allocation uses the native constructor.
    pub fn create_array(&self, size: Expr) -> Expr {
        Expr::new_object(Expr::type_ref(self.store.core.array), vec![size])
    }

    pub fn create_multidim_array(&self, default_value: Expr, sizes: Vec<Expr>) -> Expr {
        let mut args = vec![default_value];
        args.extend(sizes);
        self.script_call("multidimArray", args)
    }

    pub fn multidim_array_get(&self, array: Expr, indices: Vec<Expr>) -> Expr {
        let mut args = vec![array];
        args.extend(indices);
        self.script_call("arrayGet", args)
    }

    pub fn multidim_array_set(&self, array: Expr, indices: Vec<Expr>, value: Expr) -> Expr {
        let mut args = vec![array];
        args.extend(indices);
        args.push(value);
        self.script_call("arraySet", args)
    }
}
