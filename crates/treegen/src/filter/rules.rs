//! Exclusion rules: properties that are redundant given other state.

use std::sync::Arc;

use once_cell::unsync::OnceCell;

use crate::defaults::DefaultValueCache;
use crate::diagnostic::GeneratorError;
use crate::metadata::MetadataRegistry;
use crate::scene::{NodeRef, PropertyValue, SceneNode};

/// What a rule predicate can see.
///
/// The class default is built on the first read of a property the node
/// leaves unset, and shared with the caller afterwards.
pub struct RuleContext<'a> {
    pub registry: &'a MetadataRegistry,
    pub defaults: &'a DefaultValueCache,
    pub node: NodeRef<'a>,
    baseline: OnceCell<Arc<SceneNode>>,
}

impl<'a> RuleContext<'a> {
    pub fn new(registry: &'a MetadataRegistry, defaults: &'a DefaultValueCache, node: NodeRef<'a>) -> Self {
        Self {
            registry,
            defaults,
            node,
            baseline: OnceCell::new(),
        }
    }

    pub fn is_a(&self, ancestor: &str) -> bool {
        self.registry.is_a(self.node.class_name(), ancestor)
    }

    /// The default instance of the node's class. Failures are not cached.
    pub fn baseline(&self) -> Result<&Arc<SceneNode>, GeneratorError> {
        self.baseline
            .get_or_try_init(|| self.defaults.baseline(self.node.class_name()))
    }

    /// The value the node holds: its own if set, else the class default.
    ///
    /// `None` only when the default instance cannot be built.
    pub fn value(&self, property: &str) -> Option<PropertyValue> {
        match self.node.explicit(property) {
            Some(value) => Some(value),
            None => self
                .baseline()
                .ok()
                .map(|instance| NodeRef::root(instance).property(property)),
        }
    }

    pub fn number_is(&self, property: &str, value: f64) -> bool {
        self.value(property).and_then(|v| v.as_number()) == Some(value)
    }

    pub fn has_text(&self) -> bool {
        TEXT_CLASSES.iter().any(|class| self.is_a(class))
    }
}

/// When `condition` holds for a node, `omit` is added to its omitted properties.
pub struct ExclusionRule {
    pub condition: fn(&RuleContext) -> bool,
    pub omit: &'static [&'static str],
}

pub const TEXT_CLASSES: &[&str] = &["TextBox", "TextLabel", "TextButton"];

/// Rules applied to every node, in order.
pub static DEFAULT_RULES: &[ExclusionRule] = &[
    ExclusionRule {
        condition: is_gui_object,
        omit: &["Transparency"],
    },
    ExclusionRule {
        condition: background_hidden,
        omit: &["BackgroundColor3", "BorderColor3", "BorderSizePixel"],
    },
    ExclusionRule {
        condition: border_hidden,
        omit: &["BorderColor3"],
    },
    ExclusionRule {
        condition: text_stroke_hidden,
        omit: &["TextStrokeColor3"],
    },
    ExclusionRule {
        condition: text_hidden,
        omit: &[
            "TextStrokeTransparency",
            "TextStrokeColor3",
            "TextColor3",
            "TextScaled",
            "Font",
            "FontSize",
            "Text",
            "TextTransparency",
            "TextWrapped",
            "TextXAlignment",
            "TextYAlignment",
        ],
    },
    ExclusionRule {
        condition: is_base_part,
        omit: &["Position", "Rotation", "Orientation", "BrickColor"],
    },
    ExclusionRule {
        condition: is_attachment_or_part,
        omit: &["Rotation", "CFrame"],
    },
    ExclusionRule {
        condition: is_mesh_part,
        omit: &["MeshId"],
    },
    ExclusionRule {
        condition: is_script,
        omit: &["Source"],
    },
];

fn is_gui_object(ctx: &RuleContext) -> bool {
    ctx.is_a("GuiObject")
}

fn background_hidden(ctx: &RuleContext) -> bool {
    ctx.is_a("GuiObject") && ctx.number_is("BackgroundTransparency", 1.0)
}

fn border_hidden(ctx: &RuleContext) -> bool {
    ctx.is_a("GuiObject") && ctx.number_is("BorderSizePixel", 0.0)
}

fn text_stroke_hidden(ctx: &RuleContext) -> bool {
    ctx.has_text() && ctx.number_is("TextStrokeTransparency", 1.0)
}

fn text_hidden(ctx: &RuleContext) -> bool {
    ctx.has_text() && ctx.number_is("TextTransparency", 1.0)
}

fn is_base_part(ctx: &RuleContext) -> bool {
    ctx.is_a("BasePart")
}

fn is_attachment_or_part(ctx: &RuleContext) -> bool {
    ctx.is_a("Attachment") || ctx.is_a("BasePart")
}

fn is_mesh_part(ctx: &RuleContext) -> bool {
    ctx.is_a("MeshPart")
}

fn is_script(ctx: &RuleContext) -> bool {
    ctx.is_a("LuaSourceContainer")
}
