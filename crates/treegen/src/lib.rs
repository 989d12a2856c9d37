//! # treegen
//!
//! Describes a scene tree as TypeScript: a nested type declaration, a script
//! that rebuilds the tree, or JSX markup.
//!
//! ## Architecture
//!
//! ```text
//!  API dump (URL/file)        Scene snapshot
//!        │                          │
//!        ▼                          │
//! ┌──────────────┐                  │
//! │   Metadata   │  Flattened       │
//! │   Registry   │  class members   │
//! └──────┬───────┘                  │
//!        │                          ▼
//!        │               ┌────────────────────┐
//!        ├──────────────▶│  Traversal core    │◀── Default instances
//!        │               │  resolve + filter  │    (property baseline)
//!        │               └─────────┬──────────┘
//!        │                         │
//!        ▼                         ▼
//!             Interface │ Instantiation │ Markup
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use treegen::{Generator, GeneratorConfig};
//!
//! let generator = Generator::from_config(&GeneratorConfig::default()).await?;
//! let root = treegen::scene::load_snapshot("hud.json".as_ref())?;
//! println!("{}", generator.generate_interface(&root)?);
//! ```

pub mod codegen;
pub mod config;
pub mod defaults;
pub mod diagnostic;
pub mod filter;
pub mod ident;
pub mod metadata;
pub mod resolve;
pub mod scene;

use std::sync::Arc;

use tracing::debug;

pub use codegen::{TsValueFormatter, ValueFormatter};
pub use config::GeneratorConfig;
pub use defaults::{DefaultValueCache, DefaultsTable, InstanceFactory, RegistryInstanceFactory};
pub use diagnostic::GeneratorError;
pub use metadata::{MetadataCache, MetadataRegistry, MetadataSource};
pub use scene::{PropertyValue, SceneNode};

use codegen::{EmitContext, EmitStrategy, InstantiationEmitter, InterfaceEmitter, MarkupEmitter};
use filter::{ExclusionRule, PropertyFilter};

/// Generates all three outputs from one registry and one default cache.
///
/// The caches live as long as the generator, so reuse one generator for
/// every tree described in a session.
pub struct Generator {
    registry: Arc<MetadataRegistry>,
    defaults: DefaultValueCache,
    formatter: Box<dyn ValueFormatter>,
    filter: PropertyFilter<'static>,
    markup: MarkupEmitter,
}

impl Generator {
    pub fn new(registry: Arc<MetadataRegistry>, defaults: DefaultValueCache) -> Self {
        Self {
            registry,
            defaults,
            formatter: Box::new(TsValueFormatter),
            filter: PropertyFilter::default(),
            markup: MarkupEmitter::default(),
        }
    }

    /// Loads metadata and defaults as configured.
    ///
    /// A metadata failure is logged and leaves the registry empty, so the
    /// generator still builds; every class is then unknown.
    pub async fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let cache = MetadataCache::new(MetadataSource::parse(&config.api_dump));
        let registry = cache.registry().await;

        let defaults = match &config.defaults {
            Some(path) => DefaultValueCache::new(DefaultsTable::load(path)?),
            None => DefaultValueCache::new(RegistryInstanceFactory::new(Arc::clone(&registry))),
        };

        Ok(Self::new(registry, defaults).with_markup_wrap_width(config.markup_wrap_width))
    }

    pub fn with_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_rules(mut self, rules: &'static [ExclusionRule]) -> Self {
        self.filter = PropertyFilter::new(rules);
        self
    }

    pub fn with_markup_wrap_width(mut self, wrap_width: usize) -> Self {
        self.markup = MarkupEmitter { wrap_width };
        self
    }

    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Nested type declaration for `root` and its uniquely named descendants.
    pub fn generate_interface(&self, root: &SceneNode) -> Result<String, GeneratorError> {
        self.run(&InterfaceEmitter, root)
    }

    /// Script recreating `root` and every descendant.
    pub fn generate_instantiation(&self, root: &SceneNode) -> Result<String, GeneratorError> {
        self.run(&InstantiationEmitter, root)
    }

    /// JSX markup for `root` and its visual descendants.
    pub fn generate_markup(&self, root: &SceneNode) -> Result<String, GeneratorError> {
        self.run(&self.markup, root)
    }

    fn run(&self, strategy: &impl EmitStrategy, root: &SceneNode) -> Result<String, GeneratorError> {
        debug!(class = %root.class_name, name = %root.name, "Generating");
        let ctx = EmitContext {
            registry: &self.registry,
            defaults: &self.defaults,
            filter: self.filter,
            formatter: self.formatter.as_ref(),
        };
        codegen::emit(&ctx, strategy, root)
    }
}
