//! JSX markup for visual trees.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ChildSelection, EmitContext, EmitStrategy, Visit};
use crate::diagnostic::GeneratorError;
use crate::scene::SceneNode;

/// Attribute length above which attributes go one per line.
pub const DEFAULT_WRAP_WIDTH: usize = 120;

/// Only children of these classes appear in markup.
pub const MARKUP_CLASSES: &[&str] = &["GuiObject", "UIBase", "LayerCollector"];

static QUOTED_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^".+"$"#).expect("valid regex"));

#[derive(Debug, Clone, Copy)]
pub struct MarkupEmitter {
    pub wrap_width: usize,
}

impl Default for MarkupEmitter {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl EmitStrategy for MarkupEmitter {
    fn child_selection(&self) -> ChildSelection {
        ChildSelection::Resolved
    }

    fn omissions(&self) -> Option<&[&str]> {
        Some(&["Parent"])
    }

    fn should_descend_into(&self, ctx: &EmitContext, child: &SceneNode) -> bool {
        MARKUP_CLASSES
            .iter()
            .any(|class| ctx.registry.is_a(&child.class_name, class))
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
        let tag = visit.class.name.to_lowercase();
        let indent = "\t".repeat(visit.depth);

        let mut attributes = Vec::with_capacity(properties.len());
        let mut length = if children.is_empty() { 2 } else { 1 };

        for property in properties {
            let mut value = ctx.formatter.format(&visit.node.property(property));
            if !QUOTED_STRING.is_match(&value) {
                value = format!("{{{}}}", value);
            }
            length += (visit.depth + 1) * 4 + value.len();

            if *property == "Name" {
                attributes.insert(0, format!("Key={}", value));
                length += 3;
            } else {
                length += property.len();
                attributes.push(format!("{}={}", property, value));
            }
        }

        let multiline = length > self.wrap_width;
        let mut output = format!("{}<{}", indent, tag);

        if multiline {
            for attribute in &attributes {
                output.push('\n');
                output.push_str(&indent);
                output.push('\t');
                output.push_str(attribute);
            }
        } else if !attributes.is_empty() {
            output.push(' ');
            output.push_str(&attributes.join(" "));
        }

        if children.is_empty() {
            if multiline {
                output.push('\n');
                output.push_str(&indent);
                output.push_str("/>");
            } else {
                output.push_str(" />");
            }
        } else {
            if multiline {
                output.push('\n');
                output.push_str(&indent);
            }
            output.push('>');
            for child in children {
                output.push('\n');
                output.push_str(&child);
            }
            output.push('\n');
            output.push_str(&indent);
            output.push_str(&format!("</{}>", tag));
        }

        Ok(output)
    }
}
