pub mod attributes;
pub mod config;
pub mod diagnostics;
pub mod ids;
pub mod members;
pub mod store;
pub mod types;

pub use attributes::{Attr, Attributes, InlineCodePayload};
pub use config::CompilerOptions;
pub use diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticCollection, DiagnosticSeverity, SourceLocation,
};
pub use ids::{AssemblyId, EventId, FieldId, MethodId, PropertyId, TypeId, TypeParamRef};
pub use members::{ConstValue, EventDef, FieldDef, MethodDef, Param, PropertyDef};
pub use store::{AssemblyDef, CoreTypes, SymbolStore, SymbolStoreBuilder};
pub use types::{TypeDef, TypeKind, TypeParamDef, TypeParamOwner, TypeRef};
