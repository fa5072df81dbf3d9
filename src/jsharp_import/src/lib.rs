pub mod constructors;
pub mod importer;
pub mod members;
pub mod naming;
pub mod semantics;
pub mod templates;

pub use importer::{MemberKey, MetadataImporter};
pub use semantics::{
    ConstructorSemantics, DelegateSemantics, EventSemantics, FieldSemantics, JsonMember,
    MethodSemantics, PropertySemantics, TypeImpl, TypeSemantics,
};
