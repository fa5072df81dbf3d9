use crate::emitter::RuntimeCallEmitter;
use jsharp_model::TypeRef;
use jsharp_script::Expr;

impl<'a> RuntimeCallEmitter<'a> {
    /// Binds `this` for a delegate created from an instance method.
    pub fn bind(&self, target: Expr, function: Expr) -> Expr {
        self.script_call("mkdel", vec![target, function])
    }

    /// Wraps a delegate so its first argument becomes the `this` of the call.
    pub fn bind_first_parameter_to_this(&self, delegate: Expr) -> Expr {
        self.script_call("thisFix", vec![delegate])
    }

    /// A clone between identical script delegate types elides; its only
    /// observable purpose would be reference distinctness. Differing types
    /// clone for real.
    pub fn clone_delegate(&self, delegate: Expr, source: &TypeRef, target: &TypeRef) -> Expr {
        if self.same_script_type(source, target) {
            return delegate;
        }
        self.script_call("delegateClone", vec![delegate])
    }
}
