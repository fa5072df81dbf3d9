use crate::emitter::RuntimeCallEmitter;
use jsharp_model::{
    AssemblyId, DiagnosticCode, DiagnosticCollection, SourceLocation, TypeId, TypeKind, TypeRef,
};
use jsharp_script::{BinaryOp, Expr};

/// Identity of a type as the script sees it: name, defining assembly and
/// (when not erased) argument identities.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ScriptTypeKey {
    Named {
        name: String,
        assembly: AssemblyId,
        args: Vec<ScriptTypeKey>,
    },
    Opaque,
}

impl<'a> RuntimeCallEmitter<'a> {
    /// `typeof` of a type known at compile time.
    pub fn type_of(&self, ty: &TypeRef) -> Expr {
        self.instantiate_type(ty)
    }

    pub fn instantiate_type(&self, ty: &TypeRef) -> Expr {
        self.instantiate(ty, false)
    }

    /// Like `instantiate_type`, but interfaces whose type system is bypassed
    /// degrade to the root object reference.
    pub fn instantiate_type_for_use_as_generic_argument(&self, ty: &TypeRef) -> Expr {
        self.instantiate(ty, true)
    }

    fn instantiate(&self, ty: &TypeRef, for_generic_argument: bool) -> Expr {
        let core = &self.store.core;
        match ty {
            TypeRef::Def(id) => {
                if for_generic_argument && self.is_bypassed_interface(*id) {
                    return Expr::type_ref(core.object);
                }
                let t = self.store.type_def(*id);
                let sem = self.importer.get_type_semantics(*id);
                // An open generic type has no runtime identity of its own.
                if t.is_generic() && !sem.ignore_generic_arguments {
                    return Expr::type_ref(core.object);
                }
                Expr::type_ref(*id)
            }
            TypeRef::Inst { def, args } => {
                if for_generic_argument && self.is_bypassed_interface(*def) {
                    return Expr::type_ref(core.object);
                }
                if self.importer.get_type_semantics(*def).ignore_generic_arguments {
                    return Expr::type_ref(*def);
                }
                let args = args
                    .iter()
                    .map(|a| self.instantiate(a, true))
                    .collect::<Vec<_>>();
                self.script_call(
                    "makeGenericType",
                    vec![Expr::type_ref(*def), Expr::ArrayLiteral(args)],
                )
            }
            TypeRef::Param(p) => Expr::ident(self.importer.get_type_parameter_name(*p)),
            TypeRef::Array { .. } => Expr::type_ref(core.array),
            TypeRef::Nullable(inner) => self.instantiate(inner, for_generic_argument),
        }
    }

    fn is_bypassed_interface(&self, id: TypeId) -> bool {
        let t = self.store.type_def(id);
        t.kind == TypeKind::Interface && t.attributes.imported() == Some(false)
    }

    // ----- type tests and conversions -----

    pub fn type_is(&self, expr: Expr, source: &TypeRef, target: &TypeRef) -> Expr {
        if self.same_script_type(source, target) {
            return self.script_call("isValue", vec![expr]);
        }
        let target = self.instantiate_type(target);
        self.script_call("isInstanceOfType", vec![expr, target])
    }

    pub fn try_downcast(&self, expr: Expr, source: &TypeRef, target: &TypeRef) -> Expr {
        if self.omit_downcasts || self.same_script_type(source, target) {
            return expr;
        }
        let target = self.instantiate_type(target);
        self.script_call("safeCast", vec![expr, target])
    }

    pub fn downcast(&self, expr: Expr, source: &TypeRef, target: &TypeRef) -> Expr {
        if self.omit_downcasts || self.same_script_type(source, target) {
            return expr;
        }
        let target = self.instantiate_type(target);
        self.script_call("cast", vec![expr, target])
    }

    /// Upcasts never need a runtime call, but widening a character is a
    /// diagnostic: characters are numbers in script.
    pub fn upcast(
        &self,
        expr: Expr,
        source: &TypeRef,
        target: &TypeRef,
        diagnostics: &mut DiagnosticCollection,
        location: Option<SourceLocation>,
    ) -> Expr {
        if self.is_char(source) && !self.is_char(target) {
            diagnostics.report(
                DiagnosticCode::JSE7201,
                DiagnosticCode::JSE7201.message().to_string(),
                location,
            );
        }
        expr
    }

    fn is_char(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Def(id) => *id == self.store.core.char,
            TypeRef::Nullable(inner) => self.is_char(inner),
            _ => false,
        }
    }

    fn is_string(&self, ty: Option<&TypeRef>) -> bool {
        matches!(ty, Some(TypeRef::Def(id)) if *id == self.store.core.string)
    }

    /// Reference equality with the string/null fast paths.
    pub fn reference_equality(
        &self,
        left: Expr,
        left_ty: Option<&TypeRef>,
        right: Expr,
        right_ty: Option<&TypeRef>,
        negate: bool,
    ) -> Expr {
        if left.is_null_literal() {
            let helper = if negate { "isValue" } else { "isNullOrUndefined" };
            return self.script_call(helper, vec![right]);
        }
        if right.is_null_literal() {
            let helper = if negate { "isValue" } else { "isNullOrUndefined" };
            return self.script_call(helper, vec![left]);
        }
        if self.is_string(left_ty) || self.is_string(right_ty) {
            let op = if negate {
                BinaryOp::StrictNe
            } else {
                BinaryOp::StrictEq
            };
            return Expr::binary(op, left, right);
        }
        let call = self.script_call("referenceEquals", vec![left, right]);
        if negate { Expr::not(call) } else { call }
    }

    /// The script value a freshly created slot of `ty` holds.
    pub fn default_value(&self, ty: &TypeRef) -> Expr {
        let core = &self.store.core;
        match ty {
            TypeRef::Nullable(_) => Expr::Null,
            TypeRef::Param(_) => {
                self.script_call("getDefaultValue", vec![self.instantiate_type(ty)])
            }
            TypeRef::Def(id) if *id == core.boolean => Expr::Bool(false),
            TypeRef::Def(id) if *id == core.int32 || *id == core.double || *id == core.char => {
                Expr::Number(0.0)
            }
            TypeRef::Def(id) => {
                let t = self.store.type_def(*id);
                match t.kind {
                    TypeKind::Enum => Expr::Number(0.0),
                    TypeKind::Struct => {
                        self.script_call("getDefaultValue", vec![self.instantiate_type(ty)])
                    }
                    _ => Expr::Null,
                }
            }
            _ => Expr::Null,
        }
    }

    // ----- script type identity -----

    pub fn same_script_type(&self, a: &TypeRef, b: &TypeRef) -> bool {
        let (a, b) = (self.script_type_key(a), self.script_type_key(b));
        match (a, b) {
            (ScriptTypeKey::Opaque, _) | (_, ScriptTypeKey::Opaque) => false,
            (a, b) => a == b,
        }
    }

    fn script_type_key(&self, ty: &TypeRef) -> ScriptTypeKey {
        match ty {
            TypeRef::Def(id) => self.def_key(*id, Vec::new()),
            TypeRef::Inst { def, args } => {
                if self.importer.get_type_semantics(*def).ignore_generic_arguments {
                    self.def_key(*def, Vec::new())
                } else {
                    let args = args.iter().map(|a| self.script_type_key(a)).collect();
                    self.def_key(*def, args)
                }
            }
            // Nullability is erased in script.
            TypeRef::Nullable(inner) => self.script_type_key(inner),
            TypeRef::Array { .. } => ScriptTypeKey::Named {
                name: "Array".to_string(),
                assembly: self.store.type_def(self.store.core.array).assembly,
                args: Vec::new(),
            },
            TypeRef::Param(_) => ScriptTypeKey::Opaque,
        }
    }

    fn def_key(&self, id: TypeId, args: Vec<ScriptTypeKey>) -> ScriptTypeKey {
        let sem = self.importer.get_type_semantics(id);
        if !sem.is_usable() {
            return ScriptTypeKey::Opaque;
        }
        ScriptTypeKey::Named {
            name: sem.dotted_name.clone(),
            assembly: self.store.type_def(id).assembly,
            args,
        }
    }
}
