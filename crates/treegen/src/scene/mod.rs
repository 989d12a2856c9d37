//! The scene tree being described.
//!
//! Nodes are read-only for the whole engine: every emitter walks shared
//! borrows of a tree owned by the caller.

mod value;

pub use value::{PropertyValue, TypedValue, UDim};

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;
use crate::ident::to_variable_name;

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub class_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A node together with its parent, as seen during a traversal.
///
/// `Name` and `Parent` are not stored in `properties`; they are read from
/// the tree shape instead.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: &'a SceneNode,
    pub parent: Option<&'a SceneNode>,
}

impl<'a> NodeRef<'a> {
    pub fn root(node: &'a SceneNode) -> Self {
        Self { node, parent: None }
    }

    pub fn child(&self, node: &'a SceneNode) -> Self {
        Self {
            node,
            parent: Some(self.node),
        }
    }

    pub fn class_name(&self) -> &'a str {
        &self.node.class_name
    }

    /// Reads a property the node actually carries.
    ///
    /// `Name`, `ClassName` and `Parent` are always present; anything else is
    /// present only if set in `properties`.
    pub fn explicit(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "Name" => Some(PropertyValue::string(self.node.name.as_str())),
            "ClassName" => Some(PropertyValue::string(self.node.class_name.as_str())),
            "Parent" => Some(
                self.parent
                    .map(|parent| PropertyValue::reference(to_variable_name(&parent.name)))
                    .unwrap_or_default(),
            ),
            _ => self.node.properties.get(name).cloned(),
        }
    }

    /// Reads a property, returning `Nil` for anything the node doesn't carry.
    pub fn property(&self, name: &str) -> PropertyValue {
        self.explicit(name).unwrap_or_default()
    }
}

/// Loads a scene snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<SceneNode, GeneratorError> {
    let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e.to_string()))?;

    serde_json::from_str(&content).map_err(|e| GeneratorError::SnapshotParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_synthesized_properties() {
        let root = SceneNode::new("ScreenGui", "Main Menu");
        let child = SceneNode::new("Frame", "Body").with_property("Visible", false);
        let root_ref = NodeRef::root(&root);
        let child_ref = root_ref.child(&child);

        assert_eq!(child_ref.property("Name"), PropertyValue::string("Body"));
        assert_eq!(child_ref.property("Parent"), PropertyValue::reference("Main"));
        assert_eq!(child_ref.property("Visible"), PropertyValue::Bool(false));
        assert_eq!(child_ref.property("Size"), PropertyValue::Nil);
        assert_eq!(root_ref.property("Parent"), PropertyValue::Nil);
        assert_eq!(child_ref.explicit("Size"), None);
        assert_eq!(root_ref.explicit("Parent"), Some(PropertyValue::Nil));
    }

    #[test]
    fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "className": "ScreenGui",
                "name": "Hud",
                "children": [
                    {{ "className": "TextLabel", "name": "Score", "properties": {{ "Text": "0" }} }}
                ]
            }}"#
        )
        .unwrap();

        let root = load_snapshot(file.path()).unwrap();
        assert_eq!(root.class_name, "ScreenGui");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].properties["Text"], PropertyValue::string("0"));
    }

    #[test]
    fn test_load_snapshot_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"name\": ").unwrap();

        let err = load_snapshot(file.path()).unwrap_err();
        assert!(matches!(err, GeneratorError::SnapshotParse { .. }));
    }

    #[test]
    fn test_load_snapshot_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::IoError { path: ref p, .. } if *p == path));
    }
}
