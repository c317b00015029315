//! Identifier casing used when rendering generated symbol names.

/// Convert a token to CamelCase (e.g., "health_check_config" -> "HealthCheckConfig").
///
/// Underscores and whitespace both separate words. Each word has its first
/// character upper-cased and the rest left untouched, then all words are
/// joined without a separator. Empty and whitespace-only input yield an
/// empty string.
pub fn to_camel_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c.is_whitespace())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}
