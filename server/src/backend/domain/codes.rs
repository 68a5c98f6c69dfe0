//! Short codes for regions and majlis.

/// First three characters of the name, uppercased
pub fn default_code(name: &str) -> String {
    name.trim().chars().take(3).collect::<String>().to_uppercase()
}

/// Explicit code when one was given, otherwise the default
pub fn resolve_code(explicit: Option<&str>, name: &str) -> String {
    match explicit.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => default_code(name),
    }
}
