//! Sections and reusable components, plus their wire records.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{ComponentId, Content, ContentError, SectionId, SectionKind, StyleOverride};

/// Binding of a section to a reusable component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReusableRef {
    pub component_id: ComponentId,
    pub component_name: String,
    pub is_linked: bool,
}

/// One ordered, typed unit of page content
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub struct Section {
    pub id: SectionId,
    pub content: Content,
    /// Rank within the page (unique and dense)
    pub order: u32,
    pub is_visible: bool,
    pub is_locked: bool,
    pub style_override: Option<StyleOverride>,
    pub reusable_ref: Option<ReusableRef>,
}

impl Section {
    pub fn new(id: SectionId, content: Content, order: u32) -> Self {
        Self {
            id,
            content,
            order,
            is_visible: true,
            is_locked: false,
            style_override: None,
            reusable_ref: None,
        }
    }

    /// Section kind, always derived from the content variant
    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }

    /// Component this section is linked to, if any
    pub fn linked_component(&self) -> Option<&ComponentId> {
        self.reusable_ref
            .as_ref()
            .filter(|r| r.is_linked)
            .map(|r| &r.component_id)
    }

    pub fn is_linked(&self) -> bool {
        self.linked_component().is_some()
    }
}

/// Section as stored: kind and content travel side by side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub id: SectionId,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default)]
    pub content: Value,
    pub order: u32,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_override: Option<StyleOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reusable_ref: Option<ReusableRef>,
}

fn default_visible() -> bool {
    true
}

impl TryFrom<SectionRecord> for Section {
    type Error = ContentError;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        Ok(Section {
            id: record.id,
            content: Content::from_wire(record.kind, record.content)?,
            order: record.order,
            is_visible: record.is_visible,
            is_locked: record.is_locked,
            style_override: record.style_override,
            reusable_ref: record.reusable_ref,
        })
    }
}

impl TryFrom<&Section> for SectionRecord {
    type Error = ContentError;

    fn try_from(section: &Section) -> Result<Self, Self::Error> {
        Ok(SectionRecord {
            id: section.id.clone(),
            kind: section.kind(),
            content: section.content.to_wire()?,
            order: section.order,
            is_visible: section.is_visible,
            is_locked: section.is_locked,
            style_override: section.style_override.clone(),
            reusable_ref: section.reusable_ref.clone(),
        })
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SectionRecord::try_from(self)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Named content template shared across pages
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ComponentRecord")]
pub struct ReusableComponent {
    pub id: ComponentId,
    pub name: String,
    pub description: String,
    pub content: Content,
}

impl ReusableComponent {
    pub fn section_type(&self) -> SectionKind {
        self.content.kind()
    }

    /// Reference a freshly inserted section carries
    pub fn link(&self) -> ReusableRef {
        ReusableRef {
            component_id: self.id.clone(),
            component_name: self.name.clone(),
            is_linked: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub section_type: SectionKind,
    #[serde(default)]
    pub content: Value,
}

impl TryFrom<ComponentRecord> for ReusableComponent {
    type Error = ContentError;

    fn try_from(record: ComponentRecord) -> Result<Self, Self::Error> {
        Ok(ReusableComponent {
            id: record.id,
            name: record.name,
            description: record.description,
            content: Content::from_wire(record.section_type, record.content)?,
        })
    }
}

impl Serialize for ReusableComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ComponentRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            section_type: self.section_type(),
            content: self.content.to_wire().map_err(S::Error::custom)?,
        }
        .serialize(serializer)
    }
}
