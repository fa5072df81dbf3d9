use crate::diagnostics::{Diagnostic, DiagnosticCollection, DiagnosticSeverity};

/// Compact one-line rendering used by driver output.
/// Example: `widgets.cs(3,15): error JSE7001: Not a valid script identifier`
pub fn render(d: &Diagnostic) -> String {
    let severity = match d.severity {
        DiagnosticSeverity::Error => "error",
        DiagnosticSeverity::Warning => "warning",
    };
    let position = d
        .location
        .as_ref()
        .map(|loc| format!("{}({},{}): ", loc.file, loc.line, loc.column))
        .unwrap_or_default();
    format!("{}{} {:?}: {}", position, severity, d.code, d.message)
}

pub fn render_all(collection: &DiagnosticCollection) -> String {
    collection
        .diagnostics
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Machine-readable dump for tooling.
pub fn to_json(collection: &DiagnosticCollection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&collection.diagnostics)
}
