use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handles into the symbol store. Identity is index identity; the
/// external resolver guarantees one definition per handle.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

define_id!(AssemblyId);
define_id!(TypeId);
define_id!(MethodId);
define_id!(PropertyId);
define_id!(EventId);
define_id!(FieldId);

/// A type parameter is identified by its owner and declaration ordinal, never
/// by a specialization.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TypeParamRef {
    pub owner: crate::types::TypeParamOwner,
    pub index: usize,
}
