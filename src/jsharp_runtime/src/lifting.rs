use crate::emitter::RuntimeCallEmitter;
use jsharp_script::{BinaryOp, Expr, UnaryOp};

impl<'a> RuntimeCallEmitter<'a> {
    /// Rewrites a unary or binary expression into its three-valued helper.
    /// Lifting an already-lifted expression is a no-op.
    pub fn lift(&self, expr: Expr) -> Expr {
        if self.is_lifted(&expr) {
            return expr;
        }
        match expr {
            Expr::Binary { op, left, right } => {
                self.nullable_call(binary_helper(op), vec![*left, *right])
            }
            Expr::Unary { op, operand } => self.nullable_call(unary_helper(op), vec![*operand]),
            other => panic!("internal error: cannot lift {:?}", other),
        }
    }

    /// True for invocations of the nullable helpers and the special-cased
    /// integer division and truncation helpers.
    fn is_lifted(&self, expr: &Expr) -> bool {
        let Expr::Invocation { target, .. } = expr else {
            return false;
        };
        let Expr::Member { target, name } = target.as_ref() else {
            return false;
        };
        let Expr::TypeRef(id) = target.as_ref() else {
            return false;
        };
        *id == self.store.core.nullable
            || (*id == self.store.core.int32 && (name == "div" || name == "trunc"))
    }

    /// Truncating integer division: `Int32.div(a, b)`.
    pub fn integer_division(&self, left: Expr, right: Expr) -> Expr {
        Expr::invoke(
            Expr::member(Expr::type_ref(self.store.core.int32), "div"),
            vec![left, right],
        )
    }

    /// Float-to-integer truncation: `Int32.trunc(e)`.
    pub fn truncate(&self, expr: Expr) -> Expr {
        Expr::invoke(
            Expr::member(Expr::type_ref(self.store.core.int32), "trunc"),
            vec![expr],
        )
    }

    /// Unwraps a nullable value, checking that it is present. A boolean
    /// negation is already definite and needs no unwrapping.
    pub fn from_nullable(&self, expr: Expr) -> Expr {
        if self.omit_nullable_checks {
            return expr;
        }
        if matches!(
            expr,
            Expr::Unary {
                op: UnaryOp::Not,
                ..
            }
        ) {
            return expr;
        }
        self.nullable_call("unbox", vec![expr])
    }

    pub fn coalesce(&self, left: Expr, right: Expr) -> Expr {
        self.script_call("coalesce", vec![left, right])
    }
}

fn binary_helper(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq | BinaryOp::StrictEq => "eq",
        BinaryOp::Ne | BinaryOp::StrictNe => "ne",
        BinaryOp::Lt => "lt",
        BinaryOp::Le => "le",
        BinaryOp::Gt => "gt",
        BinaryOp::Ge => "ge",
        BinaryOp::Add => "add",
        BinaryOp::Sub => "sub",
        BinaryOp::Mul => "mul",
        BinaryOp::Div => "div",
        BinaryOp::Mod => "mod",
        BinaryOp::BitAnd => "band",
        BinaryOp::BitOr => "bor",
        BinaryOp::BitXor => "xor",
        BinaryOp::Shl => "shl",
        BinaryOp::Shr => "srs",
        BinaryOp::UShr => "sru",
        // Three-valued boolean logic has dedicated helpers.
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::In | BinaryOp::InstanceOf => {
            panic!("internal error: operator cannot be lifted")
        }
    }
}

fn unary_helper(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "neg",
        UnaryOp::Pos => "pos",
        UnaryOp::Not => "not",
        UnaryOp::BitNot => "cpl",
        UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete => {
            panic!("internal error: operator cannot be lifted")
        }
    }
}
