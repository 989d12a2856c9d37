//! Nested type declaration mirroring the tree's shape.
//!
//! ```text
//! type Hud = ScreenGui & {
//! 	Body: Frame & {
//! 		Title: TextLabel;
//! 	};
//! }
//!
//! declare const hud: Hud;
//! export = hud;
//! ```

use tracing::warn;

use super::roots::{root_interface, LATE_REPLICATING_ROOTS};
use super::{ChildSelection, EmitContext, EmitStrategy, Visit};
use crate::diagnostic::GeneratorError;
use crate::ident::{to_property_key, to_type_name, to_value_name, to_variable_name};
use crate::scene::SceneNode;

#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceEmitter;

impl EmitStrategy for InterfaceEmitter {
    fn child_selection(&self) -> ChildSelection {
        ChildSelection::Resolved
    }

    fn omissions(&self) -> Option<&[&str]> {
        None
    }

    fn unknown_class(&self, node: &SceneNode) -> Result<(), GeneratorError> {
        Err(GeneratorError::unknown_class(&node.class_name))
    }

    fn emit_node(
        &self,
        _ctx: &EmitContext,
        visit: &Visit,
        _properties: &[&str],
        children: Vec<String>,
    ) -> Result<String, GeneratorError> {
        if visit.depth == 0 {
            Ok(emit_root(visit.node.node, children))
        } else {
            Ok(emit_member(visit, children))
        }
    }
}

fn emit_member(visit: &Visit, children: Vec<String>) -> String {
    let indent = "\t".repeat(visit.depth);
    let mut output = format!("{}{}: {}", indent, to_property_key(visit.key), visit.class.name);

    if !children.is_empty() {
        output.push_str(" & {\n");
        for child in children {
            output.push_str(&child);
        }
        output.push_str(&indent);
        output.push('}');
    }

    output.push_str(";\n");
    output
}

fn emit_root(root: &SceneNode, children: Vec<String>) -> String {
    let variable = to_variable_name(&root.name);
    let type_name = to_type_name(&variable);
    let value_name = to_value_name(&variable);

    if LATE_REPLICATING_ROOTS.contains(&root.class_name.as_str()) {
        warn!(
            "Instances in {} are not guaranteed to exist immediately! Beware!",
            root.class_name
        );
    }

    let mut output = match root_interface(&root.class_name) {
        Some(header) => header.to_string(),
        None => format!("type {} = {} &", type_name, root.class_name),
    };

    output.push_str(" {\n");
    for child in children {
        output.push_str(&child);
    }
    output.push_str("}\n\n");
    output.push_str(&format!("declare const {}: {};\n", value_name, type_name));
    output.push_str(&format!("export = {};\n", value_name));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_support::{defaults, registry};
    use crate::codegen::{emit, TsValueFormatter};
    use crate::filter::PropertyFilter;

    fn generate(root: &SceneNode) -> Result<String, GeneratorError> {
        let registry = registry();
        let defaults = defaults();
        let ctx = EmitContext {
            registry: &registry,
            defaults: &defaults,
            filter: PropertyFilter::default(),
            formatter: &TsValueFormatter,
        };
        emit(&ctx, &InterfaceEmitter, root)
    }

    #[test]
    fn test_nested_interface() {
        let root = SceneNode::new("ScreenGui", "hud")
            .with_child(
                SceneNode::new("Frame", "Body")
                    .with_child(SceneNode::new("TextLabel", "Title"))
                    .with_child(SceneNode::new("TextLabel", "Play Button")),
            )
            .with_child(SceneNode::new("Folder", "Icons"));

        let expected = "type Hud = ScreenGui & {\n\
                        \tBody: Frame & {\n\
                        \t\tTitle: TextLabel;\n\
                        \t\t[\"Play Button\"]: TextLabel;\n\
                        \t};\n\
                        \tIcons: Folder;\n\
                        }\n\
                        \n\
                        declare const hud: Hud;\n\
                        export = hud;\n";
        assert_eq!(generate(&root).unwrap(), expected);
    }

    #[test]
    fn test_well_known_root() {
        let root = SceneNode::new("Workspace", "Workspace").with_child(SceneNode::new("Part", "Baseplate"));

        let expected = "interface Workspace extends Model {\n\
                        \tBaseplate: Part;\n\
                        }\n\
                        \n\
                        declare const workspace: Workspace;\n\
                        export = workspace;\n";
        assert_eq!(generate(&root).unwrap(), expected);
    }

    #[test]
    fn test_ambiguous_and_member_names_are_left_out() {
        let root = SceneNode::new("Folder", "Assets")
            .with_child(SceneNode::new("Part", "Rock"))
            .with_child(SceneNode::new("Part", "Rock"))
            .with_child(SceneNode::new("Part", "Parent"))
            .with_child(SceneNode::new("Part", "Tree"));

        let output = generate(&root).unwrap();
        assert!(output.contains("\tTree: Part;\n"));
        assert!(!output.contains("Rock"));
        assert!(!output.contains("Parent"));
    }

    #[test]
    fn test_unknown_class_fails() {
        let root = SceneNode::new("Folder", "Assets").with_child(SceneNode::new("Sparkles", "Shiny"));
        let err = generate(&root).unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownClass { ref class_name } if class_name == "Sparkles"));
    }

    #[test]
    fn test_unusable_root_name_falls_back() {
        let root = SceneNode::new("Folder", "3D Assets");
        let output = generate(&root).unwrap();
        assert!(output.starts_with("type X = Folder & {\n}\n"));
        assert!(output.ends_with("declare const x: X;\nexport = x;\n"));
    }
}
