//! Script that rebuilds the tree with `new Instance` and property assignments.

use super::{ChildSelection, EmitContext, EmitStrategy, Visit};
use crate::diagnostic::GeneratorError;
use crate::ident::{to_property_access, to_variable_name};
use crate::scene::SceneNode;

/// Walks raw children: each node gets a fresh variable, so duplicate names
/// don't need resolving.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantiationEmitter;

impl EmitStrategy for InstantiationEmitter {
    fn child_selection(&self) -> ChildSelection {
        ChildSelection::Raw
    }

    fn omissions(&self) -> Option<&[&str]> {
        Some(&[])
    }

    fn unknown_class(&self, _node: &SceneNode) -> Result<(), GeneratorError> {
        Ok(())
    }

    fn emit_node(
        &self,
        ctx: &EmitContext,
        visit: &Visit,
        properties: &[&str],
        children: Vec<String>,
    ) -> Result<String, GeneratorError> {
        let variable = to_variable_name(&visit.node.node.name);
        let mut output = format!("const {} = new Instance(\"{}\");\n", variable, visit.class.name);

        for property in properties {
            output.push_str(&variable);
            output.push_str(&to_property_access(property));
            output.push_str(" = ");
            output.push_str(&ctx.formatter.format(&visit.node.property(property)));
            output.push_str(";\n");
        }

        output.push('\n');
        for child in children {
            output.push_str(&child);
        }
        Ok(output)
    }
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
        emit(&ctx, &InstantiationEmitter, root)
    }

    #[test]
    fn test_instantiation_script() {
        let root = SceneNode::new("Folder", "Folder").with_child(
            SceneNode::new("Part", "Rock")
                .with_property("Anchored", true)
                .with_property("Position", 5.0),
        );

        let expected = "const Folder = new Instance(\"Folder\");\n\
                        \n\
                        const Rock = new Instance(\"Part\");\n\
                        Rock.Anchored = true;\n\
                        Rock.Name = \"Rock\";\n\
                        Rock.Parent = Folder;\n\
                        \n";
        assert_eq!(generate(&root).unwrap(), expected);
    }

    #[test]
    fn test_duplicate_children_are_kept() {
        let root = SceneNode::new("Folder", "Folder")
            .with_child(SceneNode::new("Folder", "Folder"))
            .with_child(SceneNode::new("Folder", "Folder"));

        let output = generate(&root).unwrap();
        assert_eq!(output.matches("new Instance(\"Folder\")").count(), 3);
    }

    #[test]
    fn test_unknown_class_subtree_is_skipped() {
        let root = SceneNode::new("Folder", "Folder").with_child(
            SceneNode::new("Sparkles", "Shiny").with_child(SceneNode::new("Folder", "Inner")),
        );

        let output = generate(&root).unwrap();
        assert!(!output.contains("Shiny"));
        assert!(!output.contains("Inner"));
    }

    #[test]
    fn test_not_constructible_aborts() {
        let root = SceneNode::new("Folder", "Folder")
            .with_child(SceneNode::new("Workspace", "Workspace").with_property("Gravity", 10.0));

        let err = generate(&root).unwrap_err();
        assert!(matches!(err, GeneratorError::NotConstructible { .. }));
    }
}
