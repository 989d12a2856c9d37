//! Default instances: the baseline a node's properties are diffed against.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::diagnostic::GeneratorError;
use crate::metadata::MetadataRegistry;
use crate::scene::{NodeRef, PropertyValue, SceneNode};

/// Class tags that mark a class as impossible to create from a script.
pub const UNCREATABLE_TAGS: &[&str] = &["NotCreatable", "Service"];

/// Builds a zero-configuration instance of a class.
pub trait InstanceFactory: Send + Sync {
    fn construct(&self, class_name: &str) -> Result<SceneNode, GeneratorError>;
}

/// Default property values per class, loaded from JSON.
///
/// ```json
/// { "Frame": { "BackgroundTransparency": 0, "Visible": true } }
/// ```
///
/// Only listed classes are constructible. A constructed instance is named
/// after its class, as the host runtime does.
#[derive(Debug, Clone, Default)]
pub struct DefaultsTable {
    classes: HashMap<String, IndexMap<String, PropertyValue>>,
}

impl DefaultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class<I, K>(mut self, class_name: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        self.classes.insert(
            class_name.to_string(),
            properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        );
        self
    }

    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e.to_string()))?;

        let classes = serde_json::from_str(&content).map_err(|e| GeneratorError::DefaultsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self { classes })
    }
}

impl InstanceFactory for DefaultsTable {
    fn construct(&self, class_name: &str) -> Result<SceneNode, GeneratorError> {
        let properties = self
            .classes
            .get(class_name)
            .ok_or_else(|| GeneratorError::NotConstructible {
                class_name: class_name.to_string(),
                reason: "class is not creatable".to_string(),
            })?;

        Ok(SceneNode {
            class_name: class_name.to_string(),
            name: class_name.to_string(),
            properties: properties.clone(),
            children: Vec::new(),
        })
    }
}

/// Constructs bare instances of any creatable class in the registry.
///
/// Used when no defaults table is supplied: every property the snapshot
/// sets then counts as customized.
pub struct RegistryInstanceFactory {
    registry: Arc<MetadataRegistry>,
}

impl RegistryInstanceFactory {
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self { registry }
    }
}

impl InstanceFactory for RegistryInstanceFactory {
    fn construct(&self, class_name: &str) -> Result<SceneNode, GeneratorError> {
        let not_constructible = |reason: &str| GeneratorError::NotConstructible {
            class_name: class_name.to_string(),
            reason: reason.to_string(),
        };

        let class = self
            .registry
            .get(class_name)
            .ok_or_else(|| not_constructible("class is not in the API dump"))?;
        if class.tags.iter().any(|tag| UNCREATABLE_TAGS.contains(&tag.as_str())) {
            return Err(not_constructible("class is not creatable"));
        }

        Ok(SceneNode::new(class_name, class_name))
    }
}

/// One lazily built default instance per class.
///
/// Construction runs under the cache lock, so each class is built at most
/// once even with concurrent callers. Failures are not cached.
pub struct DefaultValueCache {
    factory: Box<dyn InstanceFactory>,
    instances: Mutex<HashMap<String, Arc<SceneNode>>>,
}

impl DefaultValueCache {
    pub fn new(factory: impl InstanceFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// The default instance for a class, built on first use.
    pub fn baseline(&self, class_name: &str) -> Result<Arc<SceneNode>, GeneratorError> {
        let mut instances = self.instances.lock();
        if let Some(instance) = instances.get(class_name) {
            return Ok(Arc::clone(instance));
        }

        debug!(class = class_name, "Constructing default instance");
        let instance = Arc::new(self.factory.construct(class_name)?);
        instances.insert(class_name.to_string(), Arc::clone(&instance));
        Ok(instance)
    }

    /// The value `property` holds on a fresh instance of `class_name`.
    pub fn get_default(&self, class_name: &str, property: &str) -> Result<PropertyValue, GeneratorError> {
        let instance = self.baseline(class_name)?;
        Ok(NodeRef::root(&instance).property(property))
    }

    /// Number of classes constructed so far.
    pub fn len(&self) -> usize {
        self.instances.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
