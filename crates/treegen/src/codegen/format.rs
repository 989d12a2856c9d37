//! Turning property values into TypeScript literals.

use crate::scene::{PropertyValue, TypedValue, UDim};

/// Formats a runtime value as source text.
///
/// The markup emitter treats any output of the form `"..."` as a plain
/// attribute string and wraps everything else in `{...}`.
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: &PropertyValue) -> String;
}

/// Formats values as roblox-ts expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsValueFormatter;

impl ValueFormatter for TsValueFormatter {
    fn format(&self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Nil => "undefined".to_string(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Number(n) => format_number(*n),
            PropertyValue::String(s) => quote(s),
            PropertyValue::Typed(typed) => format_typed(typed),
        }
    }
}

fn format_typed(value: &TypedValue) -> String {
    match value {
        TypedValue::Color3 { r, g, b } => constructor("Color3", &[*r, *g, *b]),
        TypedValue::Vector2 { x, y } => constructor("Vector2", &[*x, *y]),
        TypedValue::Vector3 { x, y, z } => constructor("Vector3", &[*x, *y, *z]),
        TypedValue::UDim(UDim { scale, offset }) => constructor("UDim", &[*scale, *offset]),
        TypedValue::UDim2 { x, y } => constructor("UDim2", &[x.scale, x.offset, y.scale, y.offset]),
        TypedValue::Enum { enum_type, item } => format!("Enum.{}.{}", enum_type, item),
        TypedValue::Ref(variable) => variable.clone(),
    }
}

fn constructor(type_name: &str, args: &[f64]) -> String {
    let args: Vec<String> = args.iter().map(|n| format_number(*n)).collect();
    format!("new {}({})", type_name, args.join(", "))
}

/// Shortest form: `1` rather than `1.0`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "0 / 0".to_string()
    } else if n == f64::INFINITY {
        "math.huge".to_string()
    } else if n == f64::NEG_INFINITY {
        "-math.huge".to_string()
    } else {
        n.to_string()
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
