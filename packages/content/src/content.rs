//! # Section Content
//!
//! `Content` is a sum type with one payload record per [`SectionKind`]. A
//! section's kind and its content can never disagree: every match over
//! `Content` is exhaustive, and decoding always goes through the kind stored
//! next to the payload.
//!
//! ## Wire format
//!
//! On the wire (and in storage) content is a bare JSON object whose keys are
//! exactly the fields declared by the kind's schema. The kind travels
//! separately, in the section's `type` column.
//!
//! ```text
//! { "type": "hero", "content": { "headline": "", "subheadline": "", "overlay": true } }
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::payloads::*;
use crate::{ContentError, SectionKind};

/// Type-specific content of a section
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Hero(HeroContent),
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Columns(ColumnsContent),
    CardGrid(CardGridContent),
    Accordion(AccordionContent),
    Features(FeaturesContent),
    Testimonials(TestimonialsContent),
    Faq(FaqContent),
    Pricing(PricingContent),
}

impl Content {
    /// Fresh content for a newly created section
    pub fn default_for(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Hero => Content::Hero(HeroContent::default()),
            SectionKind::Text => Content::Text(TextContent::default()),
            SectionKind::Image => Content::Image(ImageContent::default()),
            SectionKind::Button => Content::Button(ButtonContent::default()),
            SectionKind::Columns => Content::Columns(ColumnsContent::default()),
            SectionKind::CardGrid => Content::CardGrid(CardGridContent::default()),
            SectionKind::Accordion => Content::Accordion(AccordionContent::default()),
            SectionKind::Features => Content::Features(FeaturesContent::default()),
            SectionKind::Testimonials => Content::Testimonials(TestimonialsContent::default()),
            SectionKind::Faq => Content::Faq(FaqContent::default()),
            SectionKind::Pricing => Content::Pricing(PricingContent::default()),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Content::Hero(_) => SectionKind::Hero,
            Content::Text(_) => SectionKind::Text,
            Content::Image(_) => SectionKind::Image,
            Content::Button(_) => SectionKind::Button,
            Content::Columns(_) => SectionKind::Columns,
            Content::CardGrid(_) => SectionKind::CardGrid,
            Content::Accordion(_) => SectionKind::Accordion,
            Content::Features(_) => SectionKind::Features,
            Content::Testimonials(_) => SectionKind::Testimonials,
            Content::Faq(_) => SectionKind::Faq,
            Content::Pricing(_) => SectionKind::Pricing,
        }
    }

    /// Serialize to the wire object (declared keys only)
    pub fn to_wire(&self) -> Result<Value, ContentError> {
        let value = match self {
            Content::Hero(c) => serde_json::to_value(c)?,
            Content::Text(c) => serde_json::to_value(c)?,
            Content::Image(c) => serde_json::to_value(c)?,
            Content::Button(c) => serde_json::to_value(c)?,
            Content::Columns(c) => serde_json::to_value(c)?,
            Content::CardGrid(c) => serde_json::to_value(c)?,
            Content::Accordion(c) => serde_json::to_value(c)?,
            Content::Features(c) => serde_json::to_value(c)?,
            Content::Testimonials(c) => serde_json::to_value(c)?,
            Content::Faq(c) => serde_json::to_value(c)?,
            Content::Pricing(c) => serde_json::to_value(c)?,
        };
        Ok(value)
    }

    /// Parse a wire object as content of `kind`
    ///
    /// `null` is treated as an empty object so sections saved before any
    /// field was touched load with their defaults.
    pub fn from_wire(kind: SectionKind, value: Value) -> Result<Self, ContentError> {
        let value = match value {
            Value::Null => Value::Object(Default::default()),
            Value::Object(_) => value,
            other => return Err(ContentError::NotAnObject(json_type_name(&other))),
        };

        let content = match kind {
            SectionKind::Hero => Content::Hero(decode(kind, value)?),
            SectionKind::Text => Content::Text(decode(kind, value)?),
            SectionKind::Image => Content::Image(decode(kind, value)?),
            SectionKind::Button => Content::Button(decode(kind, value)?),
            SectionKind::Columns => Content::Columns(decode(kind, value)?),
            SectionKind::CardGrid => Content::CardGrid(decode(kind, value)?),
            SectionKind::Accordion => Content::Accordion(decode(kind, value)?),
            SectionKind::Features => Content::Features(decode(kind, value)?),
            SectionKind::Testimonials => Content::Testimonials(decode(kind, value)?),
            SectionKind::Faq => Content::Faq(decode(kind, value)?),
            SectionKind::Pricing => Content::Pricing(decode(kind, value)?),
        };
        Ok(content)
    }

    /// Parse a wire JSON string as content of `kind`
    pub fn from_wire_str(kind: SectionKind, json: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_wire(kind, value)
    }

    /// Serialize to a wire JSON string
    pub fn to_wire_string(&self) -> Result<String, ContentError> {
        Ok(serde_json::to_string(&self.to_wire()?)?)
    }
}

fn decode<T: DeserializeOwned>(kind: SectionKind, value: Value) -> Result<T, ContentError> {
    serde_json::from_value(value).map_err(|source| ContentError::InvalidContent { kind, source })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
