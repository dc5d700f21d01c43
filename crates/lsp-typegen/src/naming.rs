//! Identifier transformations shared by every target.

/// Uppercase the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exported identifier for a schema name.
///
/// Names starting with `_` get an `X` prefix in place of the underscore
/// (`_InitializeParams` → `XInitializeParams`); anything else is capitalized.
pub fn export_name(name: &str) -> String {
    match name.strip_prefix('_') {
        Some(rest) => format!("X{rest}"),
        None => capitalize(name),
    }
}

/// Strip the schema's `$` meta prefix.
pub fn strip_meta(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// Identifier-safe form of a target type spelling.
///
/// `.` becomes `_`; any other character that cannot appear in an identifier
/// is dropped (`Map<String, Any?>` → `MapStringAny`).
pub fn ident_safe(spelling: &str) -> String {
    spelling
        .chars()
        .filter_map(|c| match c {
            '.' => Some('_'),
            c if c.is_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Handler identifier for a method name.
///
/// The `$/` prefix is dropped and every `/`-separated segment capitalized:
/// `textDocument/hover` → `TextDocumentHover`, `$/cancelRequest` →
/// `CancelRequest`.
pub fn method_ident(method: &str) -> String {
    method
        .strip_prefix("$/")
        .unwrap_or(method)
        .split('/')
        .map(capitalize)
        .collect()
}
