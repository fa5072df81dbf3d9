use crate::diagnostics::DiagnosticSeverity;
use serde::{Deserialize, Serialize};

/// Import/emit diagnostic codes.
/// Format: JSE7[XXX] for errors, JSW7[XXX] for warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Type-level errors (JSE7001-JSE7099)
    JSE7001, // Invalid script name
    JSE7002, // Nested type carries its own namespace attribute
    JSE7003, // Conflicting attributes on the same symbol
    JSE7004, // Invalid script namespace
    JSE7005, // Global-exposure attribute on a non-static or nested type
    JSE7010, // Serializable base class not serializable
    JSE7011, // Serializable type implements non-serializable interface
    JSE7012, // Serializable type declares an instance event
    JSE7013, // Serializable type declares a virtual or override member
    JSE7014, // Serializable interface declares an instance method
    JSE7016, // Ambiguous member name inherited from unrelated base types

    // Member-level errors (JSE7100-JSE7199)
    JSE7101, // Invalid inline code template
    JSE7102, // Intrinsic operator on a non-operator or conversion method
    JSE7103, // Script-skip method has an unsupported signature
    JSE7104, // Script alias on an instance member
    JSE7105, // Enumerate-as-array on something other than an instance GetEnumerator()
    JSE7106, // Naming or semantics attribute on an overriding member
    JSE7107, // Implemented interface members disagree about the member's semantics
    JSE7108, // Chosen member name is not available
    JSE7109, // Intrinsic property on an interface, overridable or implementing property
    JSE7110, // Constructor parameter cannot be matched to a member
    JSE7111, // Bind-this-to-first-parameter on a non-delegate type
    JSE7112, // Expand-params without a trailing parameter array
    JSE7113, // Instance-method-on-first-argument on an unsuitable method
    JSE7114, // Inline constant on a non-const field
    JSE7115, // Reserved script identifier used as a member name

    // Emit-time errors (JSE7200-JSE7299)
    JSE7201, // Character value widened to a non-character type

    // Warnings (JSW7900-)
    JSW7901, // Generic-argument handling unspecified for a generic symbol
}

impl DiagnosticCode {
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticCode::JSW7901 => DiagnosticSeverity::Warning,
            _ => DiagnosticSeverity::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticCode::JSE7001 => "Not a valid script identifier",
            DiagnosticCode::JSE7002 => "Nested types cannot declare their own script namespace",
            DiagnosticCode::JSE7003 => "Attributes on this symbol are mutually exclusive",
            DiagnosticCode::JSE7004 => "Not a valid script namespace",
            DiagnosticCode::JSE7005 => {
                "Globally exposed types must be static and non-nested"
            }
            DiagnosticCode::JSE7010 => {
                "The base class of a serializable type must be serializable, the record base or the root object type"
            }
            DiagnosticCode::JSE7011 => {
                "Interfaces implemented by a serializable type must be serializable"
            }
            DiagnosticCode::JSE7012 => "Serializable types cannot declare instance events",
            DiagnosticCode::JSE7013 => {
                "Serializable types cannot declare virtual or overriding members"
            }
            DiagnosticCode::JSE7014 => {
                "A serializable interface cannot declare instance methods"
            }
            DiagnosticCode::JSE7016 => {
                "Unrelated base types contribute the same member name"
            }
            DiagnosticCode::JSE7101 => "The inline code template is invalid",
            DiagnosticCode::JSE7102 => {
                "Intrinsic operators can only be user-defined non-conversion operator methods"
            }
            DiagnosticCode::JSE7103 => {
                "A skipped method must be static with one parameter or an instance method with none"
            }
            DiagnosticCode::JSE7104 => "Script aliases require a static method",
            DiagnosticCode::JSE7105 => {
                "Only a parameterless instance GetEnumerator() can be enumerated as an array"
            }
            DiagnosticCode::JSE7106 => {
                "Overriding members inherit their script semantics and cannot respecify them"
            }
            DiagnosticCode::JSE7107 => {
                "All implemented interface members must agree on the member's script semantics"
            }
            DiagnosticCode::JSE7108 => "The member name is already used",
            DiagnosticCode::JSE7109 => {
                "Intrinsic properties cannot be declared on interfaces, be overridable, override, or implement interface members"
            }
            DiagnosticCode::JSE7110 => {
                "The constructor parameter does not match a property or field of the type"
            }
            DiagnosticCode::JSE7111 => {
                "Binding this to the first parameter is only meaningful on delegate types"
            }
            DiagnosticCode::JSE7112 => {
                "Parameters can only be expanded when the last parameter is a parameter array"
            }
            DiagnosticCode::JSE7113 => {
                "An instance method on the first argument must be static with at least one parameter"
            }
            DiagnosticCode::JSE7114 => "Only constant fields can be inlined",
            DiagnosticCode::JSE7115 => "The name is reserved in script and cannot be chosen",
            DiagnosticCode::JSE7201 => {
                "A character cannot be widened; characters are numbers in script"
            }
            DiagnosticCode::JSW7901 => {
                "Generic argument handling is unspecified for this generic symbol; arguments are included"
            }
        }
    }
}
