//! # Field Schema
//!
//! Declarative description of the editable fields of each section kind. The
//! field renderer and the validator are driven entirely by these definitions;
//! adding a section kind means declaring its schema and a content record.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{FieldPath, PathSegment, SectionKind};

/// One editable content field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Wire key of the field
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Declared default, overriding the kind's blank value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Control kind of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Textarea,
    RichText,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// `YYYY-MM-DD`
    Date,
    Image,
    Link,
    Select { options: Vec<SelectOption> },
    Checkbox,
    /// Ordered list of sub-records
    #[serde(rename_all = "camelCase")]
    Repeater {
        fields: Vec<FieldDefinition>,
        item_label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
            help: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn rich_text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::RichText)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number { min: None, max: None })
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn image(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Image)
    }

    pub fn link(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Link)
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect();
        Self::new(name, label, FieldKind::Select { options })
    }

    pub fn repeater(name: &str, label: &str, item_label: &str, fields: Vec<FieldDefinition>) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Repeater {
                fields,
                item_label: item_label.to_string(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Constrain a number field
    pub fn bounds(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        if let FieldKind::Number { min, max } = &mut self.kind {
            *min = lower;
            *max = upper;
        }
        self
    }

    /// Declared default, or the blank value for the field's kind
    pub fn default_value(&self) -> Value {
        if let Some(value) = &self.default {
            return value.clone();
        }

        match &self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::RichText | FieldKind::Date => {
                json!("")
            }
            FieldKind::Number { min, .. } => match min {
                Some(min) if *min > 0.0 && min.fract() == 0.0 => json!(*min as i64),
                Some(min) if *min > 0.0 => json!(min),
                _ => json!(0),
            },
            FieldKind::Image => json!({ "mediaId": "", "url": "", "alt": "" }),
            FieldKind::Link => json!({ "url": "", "text": "" }),
            FieldKind::Select { options } => options
                .first()
                .map(|option| json!(option.value))
                .unwrap_or_else(|| json!("")),
            FieldKind::Checkbox => json!(false),
            FieldKind::Repeater { .. } => json!([]),
        }
    }

    /// Sub-fields of a repeater
    pub fn item_fields(&self) -> Option<&[FieldDefinition]> {
        match &self.kind {
            FieldKind::Repeater { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn is_repeater(&self) -> bool {
        matches!(self.kind, FieldKind::Repeater { .. })
    }
}

/// Object with every field seeded with its default
pub fn default_object(fields: &[FieldDefinition]) -> Value {
    let object: Map<String, Value> = fields
        .iter()
        .map(|field| (field.name.clone(), field.default_value()))
        .collect();
    Value::Object(object)
}

/// Look up the definition addressed by `path`
///
/// Index segments step into repeater items.
pub fn field_at<'a>(fields: &'a [FieldDefinition], path: &FieldPath) -> Option<&'a FieldDefinition> {
    let mut scope = fields;
    let mut found: Option<&FieldDefinition> = None;

    for segment in path.segments() {
        match segment {
            PathSegment::Key(name) => {
                let field = scope.iter().find(|f| &f.name == name)?;
                found = Some(field);
                scope = field.item_fields().unwrap_or(&[]);
            }
            PathSegment::Index(_) => {
                if !found.map(FieldDefinition::is_repeater).unwrap_or(false) {
                    return None;
                }
            }
        }
    }

    found
}

impl SectionKind {
    /// Declared fields of this kind, in display order
    pub fn schema(self) -> Vec<FieldDefinition> {
        match self {
            SectionKind::Hero => vec![
                FieldDefinition::text("headline", "Headline").required(),
                FieldDefinition::textarea("subheadline", "Subheadline"),
                FieldDefinition::checkbox("overlay", "Darken background").with_default(json!(true)),
            ],
            SectionKind::Text => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::rich_text("body", "Body").required(),
                FieldDefinition::select(
                    "alignment",
                    "Alignment",
                    &[("left", "Left"), ("center", "Center"), ("right", "Right")],
                ),
            ],
            SectionKind::Image => vec![
                FieldDefinition::image("image", "Image").required(),
                FieldDefinition::text("caption", "Caption"),
                FieldDefinition::checkbox("fullWidth", "Full width"),
            ],
            SectionKind::Button => vec![
                FieldDefinition::link("link", "Link").required(),
                FieldDefinition::select(
                    "variant",
                    "Style",
                    &[("primary", "Primary"), ("secondary", "Secondary"), ("outline", "Outline")],
                ),
                FieldDefinition::checkbox("newTab", "Open in new tab"),
            ],
            SectionKind::Columns => vec![FieldDefinition::repeater(
                "columns",
                "Columns",
                "Column",
                vec![
                    FieldDefinition::text("heading", "Heading"),
                    FieldDefinition::rich_text("body", "Body"),
                    FieldDefinition::image("image", "Image"),
                ],
            )],
            SectionKind::CardGrid => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::number("columnsPerRow", "Cards per row")
                    .bounds(Some(1.0), Some(4.0))
                    .with_default(json!(3)),
                FieldDefinition::repeater(
                    "cards",
                    "Cards",
                    "Card",
                    vec![
                        FieldDefinition::text("title", "Title").required(),
                        FieldDefinition::textarea("description", "Description"),
                        FieldDefinition::image("image", "Image"),
                        FieldDefinition::link("link", "Link"),
                    ],
                ),
            ],
            SectionKind::Accordion => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::checkbox("allowMultiple", "Allow several open panels"),
                FieldDefinition::repeater(
                    "items",
                    "Panels",
                    "Panel",
                    vec![
                        FieldDefinition::text("title", "Title").required(),
                        FieldDefinition::rich_text("body", "Body"),
                        FieldDefinition::checkbox("open", "Open by default"),
                    ],
                ),
            ],
            SectionKind::Features => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::textarea("subheading", "Subheading"),
                FieldDefinition::repeater(
                    "features",
                    "Features",
                    "Feature",
                    vec![
                        FieldDefinition::text("icon", "Icon").with_help("Icon name from the site icon set"),
                        FieldDefinition::text("title", "Title").required(),
                        FieldDefinition::textarea("description", "Description"),
                    ],
                ),
            ],
            SectionKind::Testimonials => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::repeater(
                    "testimonials",
                    "Testimonials",
                    "Testimonial",
                    vec![
                        FieldDefinition::textarea("quote", "Quote").required(),
                        FieldDefinition::text("author", "Author").required(),
                        FieldDefinition::text("role", "Role"),
                        FieldDefinition::image("avatar", "Avatar"),
                    ],
                ),
            ],
            SectionKind::Faq => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::repeater(
                    "items",
                    "Questions",
                    "Question",
                    vec![
                        FieldDefinition::text("question", "Question").required(),
                        FieldDefinition::rich_text("answer", "Answer").required(),
                    ],
                ),
            ],
            SectionKind::Pricing => vec![
                FieldDefinition::text("heading", "Heading"),
                FieldDefinition::date("validUntil", "Offer valid until"),
                FieldDefinition::repeater(
                    "plans",
                    "Plans",
                    "Plan",
                    vec![
                        FieldDefinition::text("name", "Name").required(),
                        FieldDefinition::number("price", "Price").bounds(Some(0.0), None),
                        FieldDefinition::select(
                            "period",
                            "Billing period",
                            &[("month", "Monthly"), ("year", "Yearly"), ("once", "One-off")],
                        ),
                        FieldDefinition::textarea("features", "Features")
                            .with_help("One feature per line"),
                        FieldDefinition::checkbox("highlighted", "Highlight this plan"),
                        FieldDefinition::link("cta", "Button"),
                    ],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Content;

    #[test]
    fn test_schema_defaults_match_default_content() {
        for kind in SectionKind::ALL {
            let seeded = default_object(&kind.schema());
            let parsed = Content::from_wire(kind, seeded.clone()).unwrap();
            assert_eq!(parsed, Content::default_for(kind), "defaults differ for {kind}");
        }
    }

    #[test]
    fn test_schema_keys_are_exactly_the_wire_keys() {
        for kind in SectionKind::ALL {
            let wire = Content::default_for(kind).to_wire().unwrap();
            let mut wire_keys: Vec<_> = wire.as_object().unwrap().keys().cloned().collect();
            let mut schema_keys: Vec<_> = kind.schema().into_iter().map(|f| f.name).collect();
            wire_keys.sort();
            schema_keys.sort();
            assert_eq!(wire_keys, schema_keys, "keys differ for {kind}");
        }
    }

    #[test]
    fn test_blank_repeater_item_seeds_every_subfield() {
        let schema = SectionKind::CardGrid.schema();
        let cards = schema.iter().find(|f| f.name == "cards").unwrap();
        let item = default_object(cards.item_fields().unwrap());
        assert_eq!(
            item,
            json!({
                "title": "",
                "description": "",
                "image": { "mediaId": "", "url": "", "alt": "" },
                "link": { "url": "", "text": "" }
            })
        );
    }

    #[test]
    fn test_select_defaults_to_first_option() {
        let field = FieldDefinition::select("size", "Size", &[("s", "Small"), ("l", "Large")]);
        assert_eq!(field.default_value(), json!("s"));
    }

    #[test]
    fn test_field_at_descends_into_repeaters() {
        let schema = SectionKind::Faq.schema();
        let path: FieldPath = "items[3].answer".parse().unwrap();
        let field = field_at(&schema, &path).unwrap();
        assert_eq!(field.label, "Answer");
        assert!(field_at(&schema, &"heading[0]".parse().unwrap()).is_none());
        assert!(field_at(&schema, &"items[0].missing".parse().unwrap()).is_none());
    }

    #[test]
    fn test_schema_serializes_with_kind_tag() {
        let field = FieldDefinition::number("price", "Price").bounds(Some(0.0), None);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({ "name": "price", "label": "Price", "kind": "number", "min": 0.0, "required": false })
        );
        let back: FieldDefinition = serde_json::from_value(value).unwrap();
        assert_eq!(back, field);
    }
}
