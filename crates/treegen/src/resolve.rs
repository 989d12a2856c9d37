//! Child resolution: which children can be addressed by name.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::diagnostic::GeneratorError;
use crate::metadata::MetadataRegistry;
use crate::scene::SceneNode;

/// Returns a node's children keyed by name, in child order.
///
/// A name is unusable if it is a member of the node's class or if more than
/// one child carries it. Unusable names are dropped entirely rather than
/// renamed, since generated code could not address them unambiguously.
pub fn resolve_children<'a>(
    registry: &MetadataRegistry,
    node: &'a SceneNode,
) -> Result<IndexMap<&'a str, &'a SceneNode>, GeneratorError> {
    let mut taken: HashSet<&str> = registry
        .member_names(&node.class_name)
        .ok_or_else(|| GeneratorError::unknown_class(&node.class_name))?
        .collect();
    let mut resolved = IndexMap::new();

    for child in &node.children {
        let name = child.name.as_str();
        if taken.contains(name) {
            resolved.shift_remove(name);
        } else {
            taken.insert(name);
            resolved.insert(name, child);
        }
    }

    Ok(resolved)
}
