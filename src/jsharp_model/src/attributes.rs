use serde::{Deserialize, Serialize};

/// Payload of an inline-code annotation. Only the fields the import rules
/// consult are modeled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InlineCodePayload {
    pub code: String,
    pub non_virtual_code: Option<String>,
    pub generated_method_name: Option<String>,
}

/// Typed attribute payloads. The side-channel metadata carried by referenced
/// libraries arrives as these; lookup is by attribute full name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Attr {
    ScriptName(String),
    PreserveName,
    PreserveCase,
    NonScriptable,
    Imported { obeys_type_system: bool },
    ScriptNamespace(String),
    IgnoreNamespace,
    GlobalMethods,
    Mixin,
    Serializable,
    NamedValues,
    NumericValues,
    IncludeGenericArguments(bool),
    IncludeGenericArgumentsDefault {
        type_default: Option<bool>,
        method_default: Option<bool>,
    },
    MinimizePublicNames,
    ScriptSkip,
    ScriptAlias(String),
    InlineCode(InlineCodePayload),
    InstanceMethodOnFirstArgument,
    IntrinsicProperty,
    IntrinsicOperator,
    EnumerateAsArray,
    ExpandParams,
    BindThisToFirstParameter,
    InlineConstant,
    ObjectLiteral,
    AlternateSignature,
}

impl Attr {
    pub fn full_name(&self) -> &'static str {
        macro_rules! n {
            ($short:literal) => {
                concat!("System.Runtime.CompilerServices.", $short, "Attribute")
            };
        }
        match self {
            Attr::ScriptName(_) => n!("ScriptName"),
            Attr::PreserveName => n!("PreserveName"),
            Attr::PreserveCase => n!("PreserveCase"),
            Attr::NonScriptable => n!("NonScriptable"),
            Attr::Imported { .. } => n!("Imported"),
            Attr::ScriptNamespace(_) => n!("ScriptNamespace"),
            Attr::IgnoreNamespace => n!("IgnoreNamespace"),
            Attr::GlobalMethods => n!("GlobalMethods"),
            Attr::Mixin => n!("Mixin"),
            Attr::Serializable => n!("Serializable"),
            Attr::NamedValues => n!("NamedValues"),
            Attr::NumericValues => n!("NumericValues"),
            Attr::IncludeGenericArguments(_) => n!("IncludeGenericArguments"),
            Attr::IncludeGenericArgumentsDefault { .. } => n!("IncludeGenericArgumentsDefault"),
            Attr::MinimizePublicNames => n!("MinimizePublicNames"),
            Attr::ScriptSkip => n!("ScriptSkip"),
            Attr::ScriptAlias(_) => n!("ScriptAlias"),
            Attr::InlineCode(_) => n!("InlineCode"),
            Attr::InstanceMethodOnFirstArgument => n!("InstanceMethodOnFirstArgument"),
            Attr::IntrinsicProperty => n!("IntrinsicProperty"),
            Attr::IntrinsicOperator => n!("IntrinsicOperator"),
            Attr::EnumerateAsArray => n!("EnumerateAsArray"),
            Attr::ExpandParams => n!("ExpandParams"),
            Attr::BindThisToFirstParameter => n!("BindThisToFirstParameter"),
            Attr::InlineConstant => n!("InlineConstant"),
            Attr::ObjectLiteral => n!("ObjectLiteral"),
            Attr::AlternateSignature => n!("AlternateSignature"),
        }
    }
}

/// Attribute list of one symbol, queried by full name or through the typed
/// accessors below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Attributes(pub Vec<Attr>);

impl Attributes {
    pub fn new(attrs: Vec<Attr>) -> Self {
        Attributes(attrs)
    }

    pub fn find_by_full_name(&self, full_name: &str) -> Option<&Attr> {
        self.0.iter().find(|a| a.full_name() == full_name)
    }

    fn find(&self, pred: impl Fn(&Attr) -> bool) -> Option<&Attr> {
        self.0.iter().find(|a| pred(a))
    }

    pub fn script_name(&self) -> Option<&str> {
        self.find(|a| matches!(a, Attr::ScriptName(_)))
            .map(|a| match a {
                Attr::ScriptName(s) => s.as_str(),
                _ => unreachable!(),
            })
    }

    pub fn has_preserve_name(&self) -> bool {
        self.find(|a| matches!(a, Attr::PreserveName)).is_some()
    }

    pub fn has_preserve_case(&self) -> bool {
        self.find(|a| matches!(a, Attr::PreserveCase)).is_some()
    }

    pub fn has_non_scriptable(&self) -> bool {
        self.find(|a| matches!(a, Attr::NonScriptable)).is_some()
    }

    /// `Some(obeys_type_system)` when the symbol is imported.
    pub fn imported(&self) -> Option<bool> {
        self.find(|a| matches!(a, Attr::Imported { .. }))
            .map(|a| match a {
                Attr::Imported { obeys_type_system } => *obeys_type_system,
                _ => unreachable!(),
            })
    }

    pub fn script_namespace(&self) -> Option<&str> {
        self.find(|a| matches!(a, Attr::ScriptNamespace(_)))
            .map(|a| match a {
                Attr::ScriptNamespace(s) => s.as_str(),
                _ => unreachable!(),
            })
    }

    pub fn has_ignore_namespace(&self) -> bool {
        self.find(|a| matches!(a, Attr::IgnoreNamespace)).is_some()
    }

    pub fn has_global_methods(&self) -> bool {
        self.find(|a| matches!(a, Attr::GlobalMethods)).is_some()
    }

    pub fn has_mixin(&self) -> bool {
        self.find(|a| matches!(a, Attr::Mixin)).is_some()
    }

    pub fn has_serializable(&self) -> bool {
        self.find(|a| matches!(a, Attr::Serializable)).is_some()
    }

    pub fn has_named_values(&self) -> bool {
        self.find(|a| matches!(a, Attr::NamedValues)).is_some()
    }

    pub fn has_numeric_values(&self) -> bool {
        self.find(|a| matches!(a, Attr::NumericValues)).is_some()
    }

    pub fn include_generic_arguments(&self) -> Option<bool> {
        self.find(|a| matches!(a, Attr::IncludeGenericArguments(_)))
            .map(|a| match a {
                Attr::IncludeGenericArguments(b) => *b,
                _ => unreachable!(),
            })
    }

    pub fn generic_arguments_type_default(&self) -> Option<bool> {
        self.find(|a| matches!(a, Attr::IncludeGenericArgumentsDefault { .. }))
            .and_then(|a| match a {
                Attr::IncludeGenericArgumentsDefault { type_default, .. } => *type_default,
                _ => unreachable!(),
            })
    }

    pub fn generic_arguments_method_default(&self) -> Option<bool> {
        self.find(|a| matches!(a, Attr::IncludeGenericArgumentsDefault { .. }))
            .and_then(|a| match a {
                Attr::IncludeGenericArgumentsDefault { method_default, .. } => *method_default,
                _ => unreachable!(),
            })
    }

    pub fn has_minimize_public_names(&self) -> bool {
        self.find(|a| matches!(a, Attr::MinimizePublicNames))
            .is_some()
    }

    pub fn has_script_skip(&self) -> bool {
        self.find(|a| matches!(a, Attr::ScriptSkip)).is_some()
    }

    pub fn script_alias(&self) -> Option<&str> {
        self.find(|a| matches!(a, Attr::ScriptAlias(_)))
            .map(|a| match a {
                Attr::ScriptAlias(s) => s.as_str(),
                _ => unreachable!(),
            })
    }

    pub fn inline_code(&self) -> Option<&InlineCodePayload> {
        self.find(|a| matches!(a, Attr::InlineCode(_))).map(|a| match a {
            Attr::InlineCode(p) => p,
            _ => unreachable!(),
        })
    }

    pub fn has_instance_method_on_first_argument(&self) -> bool {
        self.find(|a| matches!(a, Attr::InstanceMethodOnFirstArgument))
            .is_some()
    }

    pub fn has_intrinsic_property(&self) -> bool {
        self.find(|a| matches!(a, Attr::IntrinsicProperty)).is_some()
    }

    pub fn has_intrinsic_operator(&self) -> bool {
        self.find(|a| matches!(a, Attr::IntrinsicOperator)).is_some()
    }

    pub fn has_enumerate_as_array(&self) -> bool {
        self.find(|a| matches!(a, Attr::EnumerateAsArray)).is_some()
    }

    pub fn has_expand_params(&self) -> bool {
        self.find(|a| matches!(a, Attr::ExpandParams)).is_some()
    }

    pub fn has_bind_this_to_first_parameter(&self) -> bool {
        self.find(|a| matches!(a, Attr::BindThisToFirstParameter))
            .is_some()
    }

    pub fn has_inline_constant(&self) -> bool {
        self.find(|a| matches!(a, Attr::InlineConstant)).is_some()
    }

    pub fn has_object_literal(&self) -> bool {
        self.find(|a| matches!(a, Attr::ObjectLiteral)).is_some()
    }

    pub fn has_alternate_signature(&self) -> bool {
        self.find(|a| matches!(a, Attr::AlternateSignature)).is_some()
    }
}
