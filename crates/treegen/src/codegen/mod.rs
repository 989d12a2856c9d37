//! TypeScript generation from a scene tree.
//!
//! All three outputs share one depth-first traversal. A strategy decides
//! which children to walk (name-resolved or raw), which properties to drop,
//! how to treat classes missing from the registry, and what text a node
//! produces once its children have been rendered:
//! - Interface (nested type declaration over resolved children)
//! - Instantiation (`new Instance` script over raw children)
//! - Markup (JSX over resolved, visual children)

mod format;
mod interface;
mod instantiate;
mod markup;
mod roots;

pub use format::{TsValueFormatter, ValueFormatter};
pub use interface::InterfaceEmitter;
pub use instantiate::InstantiationEmitter;
pub use markup::{MarkupEmitter, DEFAULT_WRAP_WIDTH, MARKUP_CLASSES};
pub use roots::root_interface;

use crate::defaults::DefaultValueCache;
use crate::diagnostic::GeneratorError;
use crate::filter::PropertyFilter;
use crate::metadata::{ClassMetadata, MetadataRegistry};
use crate::resolve::resolve_children;
use crate::scene::{NodeRef, SceneNode};

/// Everything a traversal reads.
pub struct EmitContext<'c> {
    pub registry: &'c MetadataRegistry,
    pub defaults: &'c DefaultValueCache,
    pub filter: PropertyFilter<'c>,
    pub formatter: &'c dyn ValueFormatter,
}

/// Which children a strategy walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSelection {
    /// Children addressable by a unique name.
    Resolved,
    /// Every child, duplicates included.
    Raw,
}

/// A node being emitted.
pub struct Visit<'a> {
    pub node: NodeRef<'a>,
    /// The name the node is addressed by in its parent.
    pub key: &'a str,
    /// 0 for the root.
    pub depth: usize,
    pub class: &'a ClassMetadata,
}

pub trait EmitStrategy {
    fn child_selection(&self) -> ChildSelection;

    /// Properties this strategy never emits, or `None` if it emits no properties.
    fn omissions(&self) -> Option<&[&str]>;

    fn should_descend_into(&self, _ctx: &EmitContext, _child: &SceneNode) -> bool {
        true
    }

    /// Called for a node whose class is missing from the registry. Returning
    /// `Ok` skips the node and its subtree.
    fn unknown_class(&self, node: &SceneNode) -> Result<(), GeneratorError>;

    /// Renders a node from its selected properties and its rendered children.
    fn emit_node(
        &self,
        ctx: &EmitContext,
        visit: &Visit,
        properties: &[&str],
        children: Vec<String>,
    ) -> Result<String, GeneratorError>;
}

/// Renders `root` with `strategy`. Any error aborts the whole emission.
pub fn emit(ctx: &EmitContext, strategy: &impl EmitStrategy, root: &SceneNode) -> Result<String, GeneratorError> {
    let output = traverse(ctx, strategy, NodeRef::root(root), &root.name, 0)?;
    Ok(output.unwrap_or_default())
}

fn traverse<'a>(
    ctx: &EmitContext,
    strategy: &impl EmitStrategy,
    node: NodeRef<'a>,
    key: &'a str,
    depth: usize,
) -> Result<Option<String>, GeneratorError> {
    let Some(class) = ctx.registry.get(node.class_name()) else {
        strategy.unknown_class(node.node)?;
        return Ok(None);
    };

    let properties = match strategy.omissions() {
        Some(omissions) => ctx
            .filter
            .properties_to_emit(ctx.registry, ctx.defaults, class, node, omissions)?,
        None => Vec::new(),
    };

    let children: Vec<(&str, &SceneNode)> = match strategy.child_selection() {
        ChildSelection::Resolved => resolve_children(ctx.registry, node.node)?.into_iter().collect(),
        ChildSelection::Raw => node
            .node
            .children
            .iter()
            .map(|child| (child.name.as_str(), child))
            .collect(),
    };

    let mut fragments = Vec::with_capacity(children.len());
    for (child_key, child) in children {
        if !strategy.should_descend_into(ctx, child) {
            continue;
        }
        if let Some(fragment) = traverse(ctx, strategy, node.child(child), child_key, depth + 1)? {
            fragments.push(fragment);
        }
    }

    let visit = Visit {
        node,
        key,
        depth,
        class,
    };
    strategy.emit_node(ctx, &visit, &properties, fragments).map(Some)
}
