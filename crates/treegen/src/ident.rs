//! Identifier sanitizing for generated TypeScript.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Variable name used when a display name has no usable prefix.
pub const FALLBACK_VARIABLE_NAME: &str = "X";

static VARIABLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("valid regex"));

static SAFE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

/// Words that can't be used as bare identifiers or property names.
static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "do", "if", "in", "for", "let", "new", "try", "var", "case", "else", "enum", "eval",
        "false", "null", "this", "true", "void", "with", "break", "catch", "class", "const",
        "super", "throw", "while", "yield", "delete", "export", "import", "public", "return",
        "static", "switch", "typeof", "default", "extends", "finally", "package", "private",
        "continue", "debugger", "function", "arguments", "interface", "protected", "implements",
        "instanceof",
    ]
    .into_iter()
    .collect()
});

/// Derives a variable name from a display name.
///
/// Takes the longest leading run that forms an identifier, so `"Play Button"`
/// becomes `"Play"` and `"3D"` becomes [`FALLBACK_VARIABLE_NAME`].
pub fn to_variable_name(name: &str) -> String {
    VARIABLE_PREFIX
        .find(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_VARIABLE_NAME.to_string())
}

/// Returns true if `name` can be written as a bare identifier.
pub fn is_safe_identifier(name: &str) -> bool {
    !RESERVED_WORDS.contains(name) && SAFE_IDENTIFIER.is_match(name)
}

/// Formats `name` as a key in a type literal.
pub fn to_property_key(name: &str) -> String {
    if is_safe_identifier(name) {
        name.to_string()
    } else {
        bracketed(name)
    }
}

/// Formats `name` as a member access suffix (`.name` or `["name"]`).
pub fn to_property_access(name: &str) -> String {
    if is_safe_identifier(name) {
        format!(".{}", name)
    } else {
        bracketed(name)
    }
}

fn bracketed(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[\"{}\"]", escaped)
}

/// Upper-cases the first letter: the type declared for a variable.
pub fn to_type_name(variable: &str) -> String {
    let mut chars = variable.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-cases the first letter: the value exported for a variable.
pub fn to_value_name(variable: &str) -> String {
    let mut chars = variable.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
