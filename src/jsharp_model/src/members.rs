use crate::attributes::Attributes;
use crate::diagnostics::SourceLocation;
use crate::ids::{EventId, FieldId, MethodId, PropertyId, TypeId};
use crate::types::{TypeParamDef, TypeRef};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub is_params: bool,
    pub is_out: bool,
    pub is_ref: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Param {
            name: name.into(),
            ty,
            is_params: false,
            is_out: false,
            is_ref: false,
        }
    }

    pub fn params_array(name: impl Into<String>, elem: TypeRef) -> Self {
        Param {
            name: name.into(),
            ty: TypeRef::array(elem),
            is_params: true,
            is_out: false,
            is_ref: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub id: MethodId,
    pub declaring_type: TypeId,
    pub name: String,
    pub params: Vec<Param>,
    /// `None` is void.
    pub return_type: Option<TypeRef>,
    pub type_params: Vec<TypeParamDef>,
    pub is_public: bool,
    pub is_static: bool,
    pub is_ctor: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_abstract: bool,
    pub is_operator: bool,
    pub is_conversion_operator: bool,
    pub is_explicit_interface_impl: bool,
    pub overridden: Option<MethodId>,
    pub implemented_interface_methods: Vec<MethodId>,
    pub attributes: Attributes,
    pub location: Option<SourceLocation>,
}

impl Default for MethodDef {
    fn default() -> Self {
        MethodDef {
            id: MethodId(usize::MAX),
            declaring_type: TypeId(usize::MAX),
            name: String::new(),
            params: Vec::new(),
            return_type: None,
            type_params: Vec::new(),
            is_public: true,
            is_static: false,
            is_ctor: false,
            is_virtual: false,
            is_override: false,
            is_abstract: false,
            is_operator: false,
            is_conversion_operator: false,
            is_explicit_interface_impl: false,
            overridden: None,
            implemented_interface_methods: Vec::new(),
            attributes: Attributes::default(),
            location: None,
        }
    }
}

impl MethodDef {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// True when the last parameter is a params array.
    pub fn has_param_array(&self) -> bool {
        self.params.last().map(|p| p.is_params).unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub id: PropertyId,
    pub declaring_type: TypeId,
    pub name: String,
    pub ty: TypeRef,
    pub getter: Option<MethodId>,
    pub setter: Option<MethodId>,
    pub is_indexer: bool,
    pub index_params: Vec<Param>,
    pub is_auto: bool,
    pub is_public: bool,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_abstract: bool,
    pub is_explicit_interface_impl: bool,
    pub overridden: Option<PropertyId>,
    pub implemented_interface_properties: Vec<PropertyId>,
    pub attributes: Attributes,
    pub location: Option<SourceLocation>,
}

impl Default for PropertyDef {
    fn default() -> Self {
        PropertyDef {
            id: PropertyId(usize::MAX),
            declaring_type: TypeId(usize::MAX),
            name: String::new(),
            ty: TypeRef::Def(TypeId(0)),
            getter: None,
            setter: None,
            is_indexer: false,
            index_params: Vec::new(),
            is_auto: false,
            is_public: true,
            is_static: false,
            is_virtual: false,
            is_override: false,
            is_abstract: false,
            is_explicit_interface_impl: false,
            overridden: None,
            implemented_interface_properties: Vec::new(),
            attributes: Attributes::default(),
            location: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    pub id: EventId,
    pub declaring_type: TypeId,
    pub name: String,
    pub adder: Option<MethodId>,
    pub remover: Option<MethodId>,
    pub is_auto: bool,
    pub is_public: bool,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub overridden: Option<EventId>,
    pub implemented_interface_events: Vec<EventId>,
    pub attributes: Attributes,
    pub location: Option<SourceLocation>,
}

impl Default for EventDef {
    fn default() -> Self {
        EventDef {
            id: EventId(usize::MAX),
            declaring_type: TypeId(usize::MAX),
            name: String::new(),
            adder: None,
            remover: None,
            is_auto: false,
            is_public: true,
            is_static: false,
            is_virtual: false,
            is_override: false,
            overridden: None,
            implemented_interface_events: Vec::new(),
            attributes: Attributes::default(),
            location: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    Bool(bool),
    Num(f64),
    Str(String),
    Null,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub id: FieldId,
    pub declaring_type: TypeId,
    pub name: String,
    pub ty: TypeRef,
    pub is_public: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub const_value: Option<ConstValue>,
    pub attributes: Attributes,
    pub location: Option<SourceLocation>,
}

impl Default for FieldDef {
    fn default() -> Self {
        FieldDef {
            id: FieldId(usize::MAX),
            declaring_type: TypeId(usize::MAX),
            name: String::new(),
            // Core type 0 is the root object type by construction.
            ty: TypeRef::Def(TypeId(0)),
            is_public: true,
            is_static: false,
            is_const: false,
            const_value: None,
            attributes: Attributes::default(),
            location: None,
        }
    }
}
