use jsharp_model::{FieldId, PropertyId};
use serde::{Deserialize, Serialize};

/// How a type is usable from script.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TypeImpl {
    Normal,
    NotUsable,
}

/// Per-type decision record. Created during import, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeSemantics {
    pub impl_kind: TypeImpl,
    /// Fully qualified script name; empty for globally exposed types.
    pub dotted_name: String,
    pub ignore_generic_arguments: bool,
    pub generate_code: bool,
    pub is_serializable: bool,
    pub is_named_values: bool,
    pub is_imported: bool,
}

impl TypeSemantics {
    pub fn not_usable() -> Self {
        TypeSemantics {
            impl_kind: TypeImpl::NotUsable,
            dotted_name: String::new(),
            ignore_generic_arguments: false,
            generate_code: false,
            is_serializable: false,
            is_named_values: false,
            is_imported: false,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.impl_kind == TypeImpl::Normal
    }

    /// The simple name part of `dotted_name`.
    pub fn short_name(&self) -> &str {
        match self.dotted_name.rsplit_once('.') {
            Some((_, name)) => name,
            None => &self.dotted_name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DelegateSemantics {
    pub expand_params: bool,
    pub bind_this_to_first_parameter: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MethodSemantics {
    NormalMethod {
        name: String,
        ignore_generic_arguments: bool,
        expand_params: bool,
        enumerate_as_array: bool,
        generate_code: bool,
    },
    StaticMethodWithThisAsFirstArgument {
        name: String,
        ignore_generic_arguments: bool,
        expand_params: bool,
        generate_code: bool,
    },
    InlineCode {
        template: String,
        non_virtual_template: Option<String>,
        generated_name: Option<String>,
    },
    NativeIndexer,
    NativeOperator,
    NotUsable,
}

impl MethodSemantics {
    pub fn normal(name: impl Into<String>) -> Self {
        MethodSemantics::NormalMethod {
            name: name.into(),
            ignore_generic_arguments: false,
            expand_params: false,
            enumerate_as_array: false,
            generate_code: true,
        }
    }

    pub fn inline(template: impl Into<String>) -> Self {
        MethodSemantics::InlineCode {
            template: template.into(),
            non_virtual_template: None,
            generated_name: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MethodSemantics::NormalMethod { name, .. }
            | MethodSemantics::StaticMethodWithThisAsFirstArgument { name, .. } => Some(name),
            MethodSemantics::InlineCode { generated_name, .. } => generated_name.as_deref(),
            _ => None,
        }
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self, MethodSemantics::NotUsable)
    }

    pub fn expand_params(&self) -> bool {
        matches!(
            self,
            MethodSemantics::NormalMethod {
                expand_params: true,
                ..
            } | MethodSemantics::StaticMethodWithThisAsFirstArgument {
                expand_params: true,
                ..
            }
        )
    }
}

/// One bound member of a Json constructor, aligned with the parameter list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum JsonMember {
    Field(FieldId),
    Property(PropertyId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConstructorSemantics {
    Unnamed {
        expand_params: bool,
        skip_in_initializer: bool,
        generate_code: bool,
    },
    Named {
        name: String,
        expand_params: bool,
        skip_in_initializer: bool,
        generate_code: bool,
    },
    StaticMethod {
        name: String,
        expand_params: bool,
        skip_in_initializer: bool,
        generate_code: bool,
    },
    InlineCode {
        template: String,
        skip_in_initializer: bool,
    },
    Json {
        parameter_to_member: Vec<JsonMember>,
    },
    NotUsable,
}

impl ConstructorSemantics {
    pub fn unnamed() -> Self {
        ConstructorSemantics::Unnamed {
            expand_params: false,
            skip_in_initializer: false,
            generate_code: true,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ConstructorSemantics::Named { name, .. }
            | ConstructorSemantics::StaticMethod { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertySemantics {
    GetAndSetMethods {
        get: Option<MethodSemantics>,
        set: Option<MethodSemantics>,
    },
    Field {
        name: String,
    },
    NotUsable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventSemantics {
    AddAndRemoveMethods {
        add: Option<MethodSemantics>,
        remove: Option<MethodSemantics>,
    },
    NotUsable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldSemantics {
    Field {
        name: String,
    },
    /// Constants without a name substitute inline at every use.
    BooleanConstant {
        name: Option<String>,
        value: bool,
    },
    NumericConstant {
        name: Option<String>,
        value: f64,
    },
    StringConstant {
        name: Option<String>,
        value: String,
    },
    NullConstant {
        name: Option<String>,
    },
    NotUsable,
}

impl FieldSemantics {
    pub fn name(&self) -> Option<&str> {
        match self {
            FieldSemantics::Field { name } => Some(name),
            FieldSemantics::BooleanConstant { name, .. }
            | FieldSemantics::NumericConstant { name, .. }
            | FieldSemantics::StringConstant { name, .. }
            | FieldSemantics::NullConstant { name } => name.as_deref(),
            FieldSemantics::NotUsable => None,
        }
    }
}
