use crate::emitter::RuntimeCallEmitter;
use jsharp_model::TypeRef;
use jsharp_script::Expr;

impl<'a> RuntimeCallEmitter<'a> {
    /// A non-virtual call to a base implementation:
    /// `Base.prototype.method.call(this, args...)`.
    ///
    /// With expanded params and a literal trailing array the elements splice
    /// into the direct call; otherwise the call goes through `apply` with
    /// the fixed arguments concatenated onto the rest array.
    pub fn bind_base_call(
        &self,
        base: &TypeRef,
        method_name: &str,
        this_object: Expr,
        args: Vec<Expr>,
        expand_params: bool,
    ) -> Expr {
        let method = Expr::member(
            Expr::member(self.instantiate_type(base), "prototype"),
            method_name,
        );
        if !expand_params {
            let mut call_args = vec![this_object];
            call_args.extend(args);
            return Expr::invoke(Expr::member(method, "call"), call_args);
        }
        match args.split_last() {
            Some((Expr::ArrayLiteral(elems), front)) => {
                let mut call_args = vec![this_object];
                call_args.extend(front.iter().cloned());
                call_args.extend(elems.iter().cloned());
                Expr::invoke(Expr::member(method, "call"), call_args)
            }
            Some((rest, front)) => {
                let concatenated = Expr::invoke(
                    Expr::member(Expr::ArrayLiteral(front.to_vec()), "concat"),
                    vec![rest.clone()],
                );
                Expr::invoke(
                    Expr::member(method, "apply"),
                    vec![this_object, concatenated],
                )
            }
            None => Expr::invoke(Expr::member(method, "call"), vec![this_object]),
        }
    }
}
