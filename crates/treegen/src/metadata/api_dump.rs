//! Serde types for the API dump document.

use serde::{Deserialize, Serialize};

/// The API dump: every class known to the host runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiDump {
    #[serde(default)]
    pub classes: Vec<ClassMetadata>,
}

/// A class and its members.
///
/// As decoded, `members` holds only the members the class declares itself.
/// Once placed in a [`super::MetadataRegistry`] it also holds every inherited
/// member, own members first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassMetadata {
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub members: Vec<ClassMember>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassMember {
    pub member_type: MemberType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub security: Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberType {
    Property,
    Function,
    Event,
    Callback,
}

/// Access level of a member: one level for everything, or separate read and write levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Security {
    Uniform(String),
    Split {
        #[serde(rename = "Read")]
        read: String,
        #[serde(rename = "Write")]
        write: String,
    },
}

impl Default for Security {
    fn default() -> Self {
        Security::Uniform("None".to_string())
    }
}

impl Security {
    /// True if every level this member requires is in `allowed`.
    pub fn is_within(&self, allowed: &[&str]) -> bool {
        match self {
            Security::Uniform(level) => allowed.contains(&level.as_str()),
            Security::Split { read, write } => {
                allowed.contains(&read.as_str()) && allowed.contains(&write.as_str())
            }
        }
    }
}

impl ClassMember {
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            member_type: MemberType::Property,
            name: name.into(),
            tags: None,
            security: Security::default(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    pub fn is_property(&self) -> bool {
        self.member_type == MemberType::Property
    }

    /// True if the member carries none of `ignored` as a tag.
    pub fn tags_disjoint_from(&self, ignored: &[&str]) -> bool {
        self.tags
            .as_ref()
            .map_or(true, |tags| tags.iter().all(|t| !ignored.contains(&t.as_str())))
    }
}

impl ClassMetadata {
    pub fn new(name: impl Into<String>, superclass: Option<&str>) -> Self {
        Self {
            name: name.into(),
            superclass: superclass.map(str::to_string),
            members: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }
}
