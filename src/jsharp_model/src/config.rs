use serde::{Deserialize, Serialize};

/// Compilation-wide switches consulted by the core. Passed by value; no
/// ambient state exists.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Allocate short generated names for eligible types and members.
    pub minimize_names: bool,
    /// Elide runtime checks on downcasts.
    pub omit_downcasts: bool,
    /// Elide runtime unwrapping of nullable values.
    pub omit_nullable_checks: bool,
}
