//! Runtime property values.

use serde::{Deserialize, Serialize};

/// A property value read off a scene node.
///
/// Primitives are written bare in snapshots (`true`, `0.5`, `"Hello"`, `null`);
/// structured values use an externally tagged object such as
/// `{ "Color3": { "r": 1, "g": 0, "b": 0 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Typed(TypedValue),
}

/// Structured values with a dedicated constructor in generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    Color3 { r: f64, g: f64, b: f64 },
    Vector2 { x: f64, y: f64 },
    Vector3 { x: f64, y: f64, z: f64 },
    UDim(UDim),
    UDim2 { x: UDim, y: UDim },
    Enum {
        #[serde(rename = "enumType")]
        enum_type: String,
        item: String,
    },
    /// Reference to another node, by generated variable name.
    Ref(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UDim {
    pub scale: f64,
    pub offset: f64,
}

impl PropertyValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn reference(variable: impl Into<String>) -> Self {
        Self::Typed(TypedValue::Ref(variable.into()))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::Nil
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<TypedValue> for PropertyValue {
    fn from(value: TypedValue) -> Self {
        Self::Typed(value)
    }
}
