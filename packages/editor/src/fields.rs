//! # Field Renderer
//!
//! Maps field definitions plus the current content value to editable
//! controls, and applies the resulting edits back onto the value.
//!
//! The renderer keeps no state of its own: [`render_fields`] is a pure view
//! of the value and [`apply_edit`] returns a new value. Each rendered field
//! offers a single-argument setter ([`RenderedField::set_value`]) that
//! produces a [`FieldEdit`] addressed by path; the caller decides when to
//! apply and persist it.

use pagecraft_common::MediaItem;
use pagecraft_content::{
    default_object, field_at, FieldDefinition, FieldIssue, FieldKind, FieldPath, ImageRef, Link,
    Problem, SelectOption,
};
use serde_json::{json, Value};

use crate::EditorError;

/// Editable control for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    Text { value: String },
    Textarea { value: String },
    RichText { value: String },
    Number {
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Date { value: String },
    /// Picked through the media library
    Image { image: ImageRef },
    Link { link: Link },
    Select {
        options: Vec<SelectOption>,
        selected: String,
    },
    Checkbox { checked: bool },
    Repeater {
        item_label: String,
        items: Vec<RepeaterItem>,
    },
}

/// One sub-record of a repeater
#[derive(Debug, Clone, PartialEq)]
pub struct RepeaterItem {
    pub index: usize,
    pub path: FieldPath,
    /// Summary line for a collapsed item
    pub title: String,
    pub fields: Vec<RenderedField>,
}

/// A field ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub path: FieldPath,
    pub label: String,
    pub required: bool,
    pub help: Option<String>,
    pub error: Option<Problem>,
    pub control: FieldControl,
}

/// Change requested through a rendered control
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Set { path: FieldPath, value: Value },
    /// Append a blank item to a repeater
    AddItem { path: FieldPath },
    RemoveItem { path: FieldPath, index: usize },
    MoveItem { path: FieldPath, from: usize, to: usize },
}

impl FieldEdit {
    pub fn path(&self) -> &FieldPath {
        match self {
            FieldEdit::Set { path, .. }
            | FieldEdit::AddItem { path }
            | FieldEdit::RemoveItem { path, .. }
            | FieldEdit::MoveItem { path, .. } => path,
        }
    }
}

impl RenderedField {
    /// Set this field's value
    pub fn set_value(&self, value: impl Into<Value>) -> FieldEdit {
        FieldEdit::Set {
            path: self.path.clone(),
            value: value.into(),
        }
    }

    pub fn add_item(&self) -> Option<FieldEdit> {
        matches!(self.control, FieldControl::Repeater { .. }).then(|| FieldEdit::AddItem {
            path: self.path.clone(),
        })
    }

    pub fn remove_item(&self, index: usize) -> Option<FieldEdit> {
        match &self.control {
            FieldControl::Repeater { items, .. } if index < items.len() => Some(FieldEdit::RemoveItem {
                path: self.path.clone(),
                index,
            }),
            _ => None,
        }
    }

    pub fn move_item(&self, from: usize, to: usize) -> Option<FieldEdit> {
        match &self.control {
            FieldControl::Repeater { items, .. } if from < items.len() && to < items.len() => {
                Some(FieldEdit::MoveItem {
                    path: self.path.clone(),
                    from,
                    to,
                })
            }
            _ => None,
        }
    }

    /// Store a media library pick; only `{mediaId, url, alt}` is kept
    pub fn choose_media(&self, item: &MediaItem) -> Option<FieldEdit> {
        let FieldControl::Image { image } = &self.control else {
            return None;
        };
        // Keep alt text the operator already wrote when the item has none
        let alt = if item.alt.is_empty() { image.alt.clone() } else { item.alt.clone() };
        Some(self.set_value(json!({
            "mediaId": item.id.as_str(),
            "url": item.url,
            "alt": alt,
        })))
    }

    /// Nested field by path, searching repeater items
    pub fn find(&self, path: &FieldPath) -> Option<&RenderedField> {
        if &self.path == path {
            return Some(self);
        }
        match &self.control {
            FieldControl::Repeater { items, .. } => items
                .iter()
                .flat_map(|item| item.fields.iter())
                .find_map(|field| field.find(path)),
            _ => None,
        }
    }
}

/// Render every field of `fields` for `value`, attaching validation issues
pub fn render_fields(fields: &[FieldDefinition], value: &Value, issues: &[FieldIssue]) -> Vec<RenderedField> {
    render_at(fields, &FieldPath::root(), value, issues)
}

/// Find a rendered field by path
pub fn find_field<'a>(rendered: &'a [RenderedField], path: &FieldPath) -> Option<&'a RenderedField> {
    rendered.iter().find_map(|field| field.find(path))
}

fn render_at(fields: &[FieldDefinition], base: &FieldPath, value: &Value, issues: &[FieldIssue]) -> Vec<RenderedField> {
    fields
        .iter()
        .map(|field| {
            let path = base.key(&field.name);
            let current = value.get(field.name.as_str()).cloned().unwrap_or_else(|| field.default_value());
            render_field(field, path, &current, issues)
        })
        .collect()
}

fn render_field(field: &FieldDefinition, path: FieldPath, value: &Value, issues: &[FieldIssue]) -> RenderedField {
    let text = || value.as_str().unwrap_or_default().to_string();

    let control = match &field.kind {
        FieldKind::Text => FieldControl::Text { value: text() },
        FieldKind::Textarea => FieldControl::Textarea { value: text() },
        FieldKind::RichText => FieldControl::RichText { value: text() },
        FieldKind::Number { min, max } => FieldControl::Number {
            value: value.as_f64(),
            min: *min,
            max: *max,
        },
        FieldKind::Date => FieldControl::Date { value: text() },
        FieldKind::Image => FieldControl::Image {
            image: serde_json::from_value(value.clone()).unwrap_or_default(),
        },
        FieldKind::Link => FieldControl::Link {
            link: serde_json::from_value(value.clone()).unwrap_or_default(),
        },
        FieldKind::Select { options } => FieldControl::Select {
            options: options.clone(),
            selected: text(),
        },
        FieldKind::Checkbox => FieldControl::Checkbox {
            checked: value.as_bool().unwrap_or(false),
        },
        FieldKind::Repeater { fields, item_label } => {
            let items = value
                .as_array()
                .map(|items| items.as_slice())
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let item_path = path.index(index);
                    RepeaterItem {
                        index,
                        title: item_title(fields, item).unwrap_or_else(|| format!("{} {}", item_label, index + 1)),
                        fields: render_at(fields, &item_path, item, issues),
                        path: item_path,
                    }
                })
                .collect();
            FieldControl::Repeater {
                item_label: item_label.clone(),
                items,
            }
        }
    };

    RenderedField {
        error: issues
            .iter()
            .find(|issue| issue.path == path)
            .map(|issue| issue.problem.clone()),
        label: field.label.clone(),
        required: field.required,
        help: field.help.clone(),
        path,
        control,
    }
}

/// First non-empty plain text sub-field of an item
fn item_title(fields: &[FieldDefinition], item: &Value) -> Option<String> {
    fields
        .iter()
        .filter(|field| matches!(field.kind, FieldKind::Text))
        .filter_map(|field| item.get(field.name.as_str()).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Apply an edit, returning the new value
pub fn apply_edit(fields: &[FieldDefinition], value: &Value, edit: &FieldEdit) -> Result<Value, EditorError> {
    let path = edit.path();
    let field = field_at(fields, path).ok_or_else(|| EditorError::InvalidEdit(path.to_string()))?;
    let mut next = value.clone();

    match edit {
        FieldEdit::Set { value, .. } => {
            path.set(&mut next, value.clone())?;
        }

        FieldEdit::AddItem { .. } => {
            let item_fields = field
                .item_fields()
                .ok_or_else(|| EditorError::InvalidEdit(format!("{} is not a list", path)))?;
            let blank = default_object(item_fields);
            items_mut(&mut next, path)?.push(blank);
        }

        FieldEdit::RemoveItem { index, .. } => {
            let items = items_mut(&mut next, path)?;
            if *index >= items.len() {
                return Err(EditorError::InvalidEdit(format!("{}[{}] does not exist", path, index)));
            }
            items.remove(*index);
        }

        FieldEdit::MoveItem { from, to, .. } => {
            let items = items_mut(&mut next, path)?;
            if *from >= items.len() || *to >= items.len() {
                return Err(EditorError::InvalidEdit(format!("{} has no item {} or {}", path, from, to)));
            }
            let item = items.remove(*from);
            items.insert(*to, item);
        }
    }

    Ok(next)
}

/// Repeater array at `path`, created when absent
fn items_mut<'a>(value: &'a mut Value, path: &FieldPath) -> Result<&'a mut Vec<Value>, EditorError> {
    if path.get(value).map(Value::is_null).unwrap_or(true) {
        path.set(value, Value::Array(Vec::new()))?;
    }
    path.get_mut(value)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| EditorError::InvalidEdit(format!("{} is not a list", path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_content::{validate, MediaId, SectionKind};

    #[test]
    fn test_renders_controls_in_schema_order() {
        let schema = SectionKind::Hero.schema();
        let rendered = render_fields(&schema, &json!({ "headline": "Hi" }), &[]);

        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0].control, FieldControl::Text { value: "Hi".to_string() });
        assert!(rendered[0].required);
        // Absent field shows its declared default
        assert_eq!(rendered[2].control, FieldControl::Checkbox { checked: true });
    }

    #[test]
    fn test_required_error_is_attached() {
        let schema = SectionKind::Hero.schema();
        let value = json!({ "headline": "" });
        let issues = validate(&schema, &value);
        let rendered = render_fields(&schema, &value, &issues);

        assert_eq!(rendered[0].error, Some(Problem::Missing));
        assert_eq!(rendered[1].error, None);
    }

    #[test]
    fn test_set_value_round_trip() {
        let schema = SectionKind::Hero.schema();
        let value = json!({ "headline": "", "subheadline": "", "overlay": true });
        let rendered = render_fields(&schema, &value, &[]);

        let edit = rendered[0].set_value("Sale");
        let next = apply_edit(&schema, &value, &edit).unwrap();
        assert_eq!(next, json!({ "headline": "Sale", "subheadline": "", "overlay": true }));
        // The input value is untouched
        assert_eq!(value["headline"], json!(""));
    }

    #[test]
    fn test_repeater_add_seeds_defaults_and_remove() {
        let schema = SectionKind::Pricing.schema();
        let value = json!({ "heading": "", "validUntil": "", "plans": [] });
        let rendered = render_fields(&schema, &value, &[]);
        let plans = &rendered[2];

        let value = apply_edit(&schema, &value, &plans.add_item().unwrap()).unwrap();
        assert_eq!(
            value["plans"][0],
            json!({
                "name": "",
                "price": 0,
                "period": "month",
                "features": "",
                "highlighted": false,
                "cta": { "url": "", "text": "" }
            })
        );

        let rendered = render_fields(&schema, &value, &[]);
        let plans = &rendered[2];
        let FieldControl::Repeater { items, .. } = &plans.control else {
            panic!("expected repeater");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Plan 1");
        assert_eq!(items[0].fields[0].path.to_string(), "plans[0].name");

        let value = apply_edit(&schema, &value, &plans.remove_item(0).unwrap()).unwrap();
        assert_eq!(value["plans"], json!([]));
        assert!(plans.remove_item(3).is_none());
    }

    #[test]
    fn test_nested_item_edit_and_move() {
        let schema = SectionKind::Faq.schema();
        let value = json!({
            "heading": "",
            "items": [
                { "question": "First", "answer": "" },
                { "question": "Second", "answer": "" }
            ]
        });
        let rendered = render_fields(&schema, &value, &[]);
        let answer = find_field(&rendered, &"items[1].answer".parse().unwrap()).unwrap();
        let value = apply_edit(&schema, &value, &answer.set_value("Yes")).unwrap();
        assert_eq!(value["items"][1]["answer"], json!("Yes"));

        let items = find_field(&rendered, &FieldPath::field("items")).unwrap();
        let value = apply_edit(&schema, &value, &items.move_item(1, 0).unwrap()).unwrap();
        assert_eq!(value["items"][0]["question"], json!("Second"));
    }

    #[test]
    fn test_add_item_to_missing_list() {
        let schema = SectionKind::Faq.schema();
        let edit = FieldEdit::AddItem { path: FieldPath::field("items") };
        let value = apply_edit(&schema, &json!({}), &edit).unwrap();
        assert_eq!(value["items"], json!([{ "question": "", "answer": "" }]));
    }

    #[test]
    fn test_choose_media_keeps_only_reference() {
        let schema = SectionKind::Image.schema();
        let value = json!({ "image": { "mediaId": "", "url": "", "alt": "Shop front" } });
        let rendered = render_fields(&schema, &value, &[]);

        let item = MediaItem {
            id: MediaId::new("m7"),
            file_name: "shop.jpg".to_string(),
            url: "https://cdn.example.com/shop.jpg".to_string(),
            alt: String::new(),
            content_type: "image/jpeg".to_string(),
            size: 2048,
        };
        let edit = rendered[0].choose_media(&item).unwrap();
        let value = apply_edit(&schema, &value, &edit).unwrap();
        assert_eq!(
            value["image"],
            json!({ "mediaId": "m7", "url": "https://cdn.example.com/shop.jpg", "alt": "Shop front" })
        );
        assert!(rendered[1].choose_media(&item).is_none());
    }

    #[test]
    fn test_edit_outside_schema_is_rejected() {
        let schema = SectionKind::Hero.schema();
        let edit = FieldEdit::Set { path: FieldPath::field("color"), value: json!("red") };
        assert!(matches!(apply_edit(&schema, &json!({}), &edit), Err(EditorError::InvalidEdit(_))));
    }
}
