use crate::attributes::Attributes;
use crate::diagnostics::SourceLocation;
use crate::ids::{AssemblyId, EventId, FieldId, MethodId, PropertyId, TypeId, TypeParamRef};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TypeParamOwner {
    Type(TypeId),
    Method(MethodId),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeParamDef {
    pub name: String,
}

/// One type definition as handed over by the external resolver. Members are
/// listed by handle; accessor methods of properties and events are reachable
/// only through their owner and do not appear in `methods`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub id: TypeId,
    pub assembly: AssemblyId,
    pub kind: TypeKind,
    pub namespace: String,
    pub name: String,
    pub is_public: bool,
    pub is_static: bool,
    pub declaring_type: Option<TypeId>,
    pub base_type: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub type_params: Vec<TypeParamDef>,
    pub methods: Vec<MethodId>,
    pub properties: Vec<PropertyId>,
    pub fields: Vec<FieldId>,
    pub events: Vec<EventId>,
    pub attributes: Attributes,
    pub location: Option<SourceLocation>,
}

impl Default for TypeDef {
    fn default() -> Self {
        TypeDef {
            id: TypeId(usize::MAX),
            assembly: AssemblyId(0),
            kind: TypeKind::Class,
            namespace: String::new(),
            name: String::new(),
            is_public: true,
            is_static: false,
            declaring_type: None,
            base_type: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            events: Vec::new(),
            attributes: Attributes::default(),
            location: None,
        }
    }
}

impl TypeDef {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// A use of a type. `Def` is an exact (or open generic) reference,
/// `Inst` a constructed generic, `Param` a type parameter occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Def(TypeId),
    Inst { def: TypeId, args: Vec<TypeRef> },
    Param(TypeParamRef),
    Array { elem: Box<TypeRef>, rank: usize },
    Nullable(Box<TypeRef>),
}

impl TypeRef {
    pub fn def(id: TypeId) -> Self {
        TypeRef::Def(id)
    }

    pub fn inst(def: TypeId, args: Vec<TypeRef>) -> Self {
        TypeRef::Inst { def, args }
    }

    pub fn array(elem: TypeRef) -> Self {
        TypeRef::Array {
            elem: Box::new(elem),
            rank: 1,
        }
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    /// The definition this reference names, when it names one.
    pub fn definition(&self) -> Option<TypeId> {
        match self {
            TypeRef::Def(id) => Some(*id),
            TypeRef::Inst { def, .. } => Some(*def),
            _ => None,
        }
    }
}
