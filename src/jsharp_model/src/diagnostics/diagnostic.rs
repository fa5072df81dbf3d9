use crate::diagnostics::{DiagnosticCode, DiagnosticSeverity, SourceLocation};
use serde::{Deserialize, Serialize};

/// One reported problem. `message` carries the contextualized text, `code`
/// the stable identity used by tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: String, location: Option<SourceLocation>) -> Self {
        Diagnostic {
            code,
            severity: code.severity(),
            message,
            location,
        }
    }

    pub fn error(code: DiagnosticCode, message: String) -> Self {
        Diagnostic {
            code,
            severity: DiagnosticSeverity::Error,
            message,
            location: None,
        }
    }

    pub fn warning(code: DiagnosticCode, message: String) -> Self {
        Diagnostic {
            code,
            severity: DiagnosticSeverity::Warning,
            message,
            location: None,
        }
    }
}
