//! Flattened class registry.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::{ApiDump, ClassMetadata};

/// Class name to flattened metadata.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    classes: HashMap<String, ClassMetadata>,
}

impl MetadataRegistry {
    /// Builds the registry, folding each class's inherited members into it.
    ///
    /// Superclasses are resolved by name, so the dump doesn't have to list a
    /// superclass before its subclasses.
    pub fn from_dump(dump: ApiDump) -> Self {
        let mut order = Vec::with_capacity(dump.classes.len());
        let mut declared = HashMap::with_capacity(dump.classes.len());
        for class in dump.classes {
            if !declared.contains_key(&class.name) {
                order.push(class.name.clone());
            }
            declared.insert(class.name.clone(), class);
        }

        let mut classes = HashMap::with_capacity(declared.len());
        let mut visiting = HashSet::new();
        for name in &order {
            flatten(name, &declared, &mut classes, &mut visiting);
        }

        Self { classes }
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassMetadata> {
        self.classes.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Names of every member (of any kind) a class has, inherited ones included.
    pub fn member_names(&self, class_name: &str) -> Option<impl Iterator<Item = &str>> {
        self.get(class_name)
            .map(|class| class.members.iter().map(|m| m.name.as_str()))
    }

    /// True if `class_name` is `ancestor` or inherits from it.
    pub fn is_a(&self, class_name: &str, ancestor: &str) -> bool {
        let mut current = Some(class_name);
        // Bounded by the class count so a cyclic dump can't spin forever.
        for _ in 0..=self.classes.len() {
            let Some(name) = current else {
                return false;
            };
            if name == ancestor {
                return true;
            }
            current = self.get(name).and_then(|c| c.superclass.as_deref());
        }
        false
    }
}

fn flatten(
    name: &str,
    declared: &HashMap<String, ClassMetadata>,
    classes: &mut HashMap<String, ClassMetadata>,
    visiting: &mut HashSet<String>,
) {
    if classes.contains_key(name) {
        return;
    }
    let Some(class) = declared.get(name) else {
        return;
    };
    if !visiting.insert(name.to_string()) {
        warn!(class = name, "Superclass cycle detected; inherited members truncated");
        return;
    }

    let mut flattened = class.clone();
    if let Some(superclass) = class.superclass.as_deref() {
        flatten(superclass, declared, classes, visiting);
        if let Some(parent) = classes.get(superclass) {
            flattened.members.extend(parent.members.iter().cloned());
        }
    }

    visiting.remove(name);
    classes.insert(name.to_string(), flattened);
}
