//! Property selection: which properties of a node are worth emitting.
//!
//! A property is emitted only if it is a scriptable, accessible `Property`
//! member of the node's class, no exclusion rule has ruled it out, and the
//! node's value differs from the class default.

mod rules;

pub use rules::{ExclusionRule, RuleContext, DEFAULT_RULES, TEXT_CLASSES};

use std::collections::HashSet;

use crate::defaults::DefaultValueCache;
use crate::diagnostic::GeneratorError;
use crate::metadata::{ClassMetadata, MetadataRegistry};
use crate::scene::NodeRef;

/// Members carrying any of these tags are never emitted.
pub const IGNORED_TAGS: &[&str] = &["Deprecated", "NotScriptable", "ReadOnly"];

/// Security levels a plugin can read and write.
pub const ALLOWED_SECURITY: &[&str] = &["None", "PluginSecurity"];

/// Selects properties using an ordered list of exclusion rules.
#[derive(Clone, Copy)]
pub struct PropertyFilter<'r> {
    rules: &'r [ExclusionRule],
}

impl Default for PropertyFilter<'static> {
    fn default() -> Self {
        Self { rules: DEFAULT_RULES }
    }
}

impl<'r> PropertyFilter<'r> {
    pub fn new(rules: &'r [ExclusionRule]) -> Self {
        Self { rules }
    }

    /// Collects `extra` plus the omissions of every rule that holds for the node.
    pub fn omitted<'e>(&self, ctx: &RuleContext, extra: &[&'e str]) -> HashSet<&'e str> {
        let mut omitted: HashSet<&'e str> = extra.iter().copied().collect();

        for rule in self.rules {
            if (rule.condition)(ctx) {
                omitted.extend(rule.omit.iter().copied());
            }
        }

        omitted
    }

    /// The properties of `node` to emit, in metadata order with `Parent` last.
    ///
    /// The class default is only constructed once a rule reads an unset
    /// property or some member survives the cheaper checks; a construction
    /// failure aborts the whole call.
    pub fn properties_to_emit<'m>(
        &self,
        registry: &MetadataRegistry,
        defaults: &DefaultValueCache,
        class: &'m ClassMetadata,
        node: NodeRef,
        extra_omissions: &[&str],
    ) -> Result<Vec<&'m str>, GeneratorError> {
        let ctx = RuleContext::new(registry, defaults, node);
        let omitted = self.omitted(&ctx, extra_omissions);
        let mut retained = Vec::new();

        for member in &class.members {
            if !member.is_property()
                || omitted.contains(member.name.as_str())
                || !member.tags_disjoint_from(IGNORED_TAGS)
                || !member.security.is_within(ALLOWED_SECURITY)
            {
                continue;
            }

            // Unset properties hold their default.
            let Some(value) = node.explicit(&member.name) else {
                continue;
            };

            if value != NodeRef::root(ctx.baseline()?).property(&member.name) {
                retained.push(member.name.as_str());
            }
        }

        // Stable, so everything but Parent keeps metadata order.
        retained.sort_by_key(|name| *name == "Parent");
        Ok(retained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DefaultsTable;
    use crate::metadata::{ApiDump, ClassMember, Security};
    use crate::scene::{PropertyValue, SceneNode};

    fn registry() -> MetadataRegistry {
        MetadataRegistry::from_dump(ApiDump {
            classes: vec![
                ClassMetadata::new("Instance", None)
                    .with_member(ClassMember::property("Parent"))
                    .with_member(ClassMember::property("Name"))
                    .with_member(ClassMember::property("ClassName").with_tags(&["ReadOnly", "NotReplicated"]))
                    .with_member(ClassMember {
                        member_type: crate::metadata::MemberType::Function,
                        name: "Destroy".to_string(),
                        tags: None,
                        security: Security::default(),
                    }),
                ClassMetadata::new("GuiObject", Some("Instance"))
                    .with_member(ClassMember::property("BackgroundTransparency"))
                    .with_member(ClassMember::property("BackgroundColor3"))
                    .with_member(ClassMember::property("BorderColor3"))
                    .with_member(ClassMember::property("BorderSizePixel"))
                    .with_member(ClassMember::property("Transparency").with_tags(&["Hidden"]))
                    .with_member(ClassMember::property("Visible"))
                    .with_member(ClassMember::property("Style").with_tags(&["Deprecated"]))
                    .with_member(ClassMember::property("RootLocalizationTable").with_security(Security::Split {
                        read: "None".to_string(),
                        write: "RobloxScriptSecurity".to_string(),
                    })),
                ClassMetadata::new("Frame", Some("GuiObject")),
                ClassMetadata::new("TextButton", Some("GuiObject"))
                    .with_member(ClassMember::property("Text"))
                    .with_member(ClassMember::property("TextTransparency"))
                    .with_member(ClassMember::property("TextStrokeColor3"))
                    .with_member(ClassMember::property("TextStrokeTransparency")),
                ClassMetadata::new("Folder", Some("Instance")),
            ],
        })
    }

    fn defaults() -> DefaultValueCache {
        let gui = || {
            vec![
                ("BackgroundTransparency", PropertyValue::Number(0.0)),
                ("BorderSizePixel", PropertyValue::Number(1.0)),
                ("Visible", PropertyValue::Bool(true)),
            ]
        };
        let mut text = gui();
        text.push(("Text", PropertyValue::string("Button")));
        text.push(("TextTransparency", PropertyValue::Number(0.0)));
        text.push(("TextStrokeTransparency", PropertyValue::Number(1.0)));

        DefaultValueCache::new(
            DefaultsTable::new()
                .with_class("Frame", gui())
                .with_class("TextButton", text)
                .with_class("Folder", Vec::<(&str, PropertyValue)>::new()),
        )
    }

    fn emit(node: NodeRef, extra: &[&str]) -> Vec<String> {
        let registry = registry();
        let class = registry.get(node.class_name()).unwrap();
        PropertyFilter::default()
            .properties_to_emit(&registry, &defaults(), class, node, extra)
            .unwrap()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_default_values_are_skipped() {
        let frame = SceneNode::new("Frame", "Frame")
            .with_property("Visible", true)
            .with_property("BackgroundTransparency", 0.5);
        assert_eq!(emit(NodeRef::root(&frame), &[]), vec!["BackgroundTransparency"]);
    }

    #[test]
    fn test_tags_security_and_member_type() {
        let frame = SceneNode::new("Frame", "Frame")
            .with_property("Style", "Custom")
            .with_property("RootLocalizationTable", "x")
            .with_property("Destroy", "x");
        assert!(emit(NodeRef::root(&frame), &[]).is_empty());
    }

    #[test]
    fn test_parent_sorts_last() {
        let root = SceneNode::new("Folder", "Assets");
        let frame = SceneNode::new("Frame", "Panel").with_property("Visible", false);
        let node = NodeRef::root(&root).child(&frame);

        // Parent is declared first on Instance but must come last.
        assert_eq!(emit(node, &[]), vec!["Visible", "Name", "Parent"]);
        assert_eq!(emit(node, &["Parent"]), vec!["Visible", "Name"]);
    }

    #[test]
    fn test_rules_accumulate() {
        let frame = SceneNode::new("Frame", "Frame")
            .with_property("BackgroundTransparency", 1.0)
            .with_property("BackgroundColor3", "red")
            .with_property("BorderSizePixel", 0.0)
            .with_property("BorderColor3", "blue")
            .with_property("Transparency", 1.0);
        assert_eq!(emit(NodeRef::root(&frame), &[]), vec!["BackgroundTransparency"]);
    }

    #[test]
    fn test_border_rule_alone() {
        let frame = SceneNode::new("Frame", "Frame")
            .with_property("BorderSizePixel", 0.0)
            .with_property("BorderColor3", "blue");
        assert_eq!(emit(NodeRef::root(&frame), &[]), vec!["BorderSizePixel"]);
    }

    // TextButton is covered by the text rules along with TextBox and TextLabel.
    #[test]
    fn test_text_rules_cover_text_button() {
        let button = SceneNode::new("TextButton", "TextButton")
            .with_property("Text", "Go")
            .with_property("TextTransparency", 1.0);
        assert!(emit(NodeRef::root(&button), &[]).is_empty());

        let button = SceneNode::new("TextButton", "TextButton")
            .with_property("TextStrokeTransparency", 1.0)
            .with_property("TextStrokeColor3", "red")
            .with_property("Text", "Go");
        assert_eq!(emit(NodeRef::root(&button), &[]), vec!["Text"]);
    }

    #[test]
    fn test_custom_rules_only_add() {
        fn always(_: &RuleContext) -> bool {
            true
        }
        fn never(_: &RuleContext) -> bool {
            false
        }
        let rules = [
            ExclusionRule { condition: always, omit: &["Visible"] },
            ExclusionRule { condition: never, omit: &["Name"] },
            ExclusionRule { condition: always, omit: &["BorderSizePixel"] },
        ];
        let registry = registry();
        let defaults = defaults();
        let frame = SceneNode::new("Frame", "Frame");
        let ctx = RuleContext::new(&registry, &defaults, NodeRef::root(&frame));
        let omitted = PropertyFilter::new(&rules).omitted(&ctx, &["Text"]);

        let mut omitted: Vec<_> = omitted.into_iter().collect();
        omitted.sort();
        assert_eq!(omitted, vec!["BorderSizePixel", "Text", "Visible"]);
    }

    #[test]
    fn test_not_constructible_aborts() {
        let registry = registry();
        let class = registry.get("Frame").unwrap();
        let frame = SceneNode::new("Frame", "Frame").with_property("Visible", false);
        let empty = DefaultValueCache::new(DefaultsTable::new());

        let err = PropertyFilter::default()
            .properties_to_emit(&registry, &empty, class, NodeRef::root(&frame), &[])
            .unwrap_err();
        assert!(matches!(err, GeneratorError::NotConstructible { .. }));
    }

    #[test]
    fn test_rules_read_unset_properties_from_defaults() {
        // TextStrokeTransparency defaults to 1, so the stroke color is invisible.
        let button = SceneNode::new("TextButton", "TextButton").with_property("TextStrokeColor3", "red");
        assert!(emit(NodeRef::root(&button), &[]).is_empty());

        let button = SceneNode::new("TextButton", "TextButton")
            .with_property("TextStrokeTransparency", 0.5)
            .with_property("TextStrokeColor3", "red");
        assert_eq!(
            emit(NodeRef::root(&button), &[]),
            vec!["TextStrokeColor3", "TextStrokeTransparency"]
        );
    }

    #[test]
    fn test_background_rule_with_transparent_default() {
        let registry = registry();
        let class = registry.get("Frame").unwrap();
        let transparent = DefaultValueCache::new(DefaultsTable::new().with_class(
            "Frame",
            [
                ("BackgroundTransparency", PropertyValue::Number(1.0)),
                ("BorderSizePixel", PropertyValue::Number(1.0)),
            ],
        ));
        let frame = SceneNode::new("Frame", "Frame")
            .with_property("BackgroundColor3", "red")
            .with_property("BorderSizePixel", 3.0);

        let emitted = PropertyFilter::default()
            .properties_to_emit(&registry, &transparent, class, NodeRef::root(&frame), &[])
            .unwrap();
        assert!(emitted.is_empty());
    }

    #[test]
    fn test_rule_context_builds_baseline_once() {
        let registry = registry();
        let defaults = defaults();
        let label = SceneNode::new("TextButton", "TextButton");
        let ctx = RuleContext::new(&registry, &defaults, NodeRef::root(&label));

        assert!(defaults.is_empty());
        assert!(ctx.number_is("TextStrokeTransparency", 1.0));
        assert!(!ctx.number_is("TextTransparency", 1.0));
        assert_eq!(defaults.len(), 1);
        assert_eq!(ctx.value("Text"), Some(PropertyValue::string("Button")));
    }
}
