use serde_json::Value;

use crate::{FieldDefinition, FieldKind, FieldPath, ImageRef};

/// Visitor over a content value, driven by its schema
///
/// Default implementations walk every declared field, descending into each
/// repeater item. Override the `visit_*` methods to act on specific nodes.
pub trait FieldVisitor: Sized {
    fn visit_fields(&mut self, fields: &[FieldDefinition], path: &FieldPath, value: &Value) {
        walk_fields(self, fields, path, value);
    }

    fn visit_field(&mut self, field: &FieldDefinition, path: &FieldPath, value: Option<&Value>) {
        walk_field(self, field, path, value);
    }

    fn visit_item(&mut self, fields: &[FieldDefinition], path: &FieldPath, item: &Value) {
        walk_fields(self, fields, path, item);
    }
}

pub fn walk_fields<V: FieldVisitor>(visitor: &mut V, fields: &[FieldDefinition], path: &FieldPath, value: &Value) {
    for field in fields {
        visitor.visit_field(field, &path.key(&field.name), value.get(field.name.as_str()));
    }
}

pub fn walk_field<V: FieldVisitor>(visitor: &mut V, field: &FieldDefinition, path: &FieldPath, value: Option<&Value>) {
    if let (FieldKind::Repeater { fields, .. }, Some(Value::Array(items))) = (&field.kind, value) {
        for (index, item) in items.iter().enumerate() {
            visitor.visit_item(fields, &path.index(index), item);
        }
    }
}

/// Collects every non-empty image reference in a content value
#[derive(Debug, Default)]
pub struct MediaCollector {
    pub images: Vec<(FieldPath, ImageRef)>,
}

impl FieldVisitor for MediaCollector {
    fn visit_field(&mut self, field: &FieldDefinition, path: &FieldPath, value: Option<&Value>) {
        if let (FieldKind::Image, Some(value)) = (&field.kind, value) {
            if let Ok(image) = serde_json::from_value::<ImageRef>(value.clone()) {
                if !image.is_empty() {
                    self.images.push((path.clone(), image));
                }
            }
        }
        walk_field(self, field, path, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionKind;
    use serde_json::json;

    #[test]
    fn test_media_collector_finds_nested_images() {
        let value = json!({
            "heading": "Team",
            "testimonials": [
                { "quote": "Great", "author": "A", "avatar": { "mediaId": "m1", "url": "/a.png", "alt": "A" } },
                { "quote": "Fine", "author": "B" }
            ]
        });

        let mut collector = MediaCollector::default();
        collector.visit_fields(&SectionKind::Testimonials.schema(), &FieldPath::root(), &value);

        assert_eq!(collector.images.len(), 1);
        assert_eq!(collector.images[0].0.to_string(), "testimonials[0].avatar");
        assert_eq!(collector.images[0].1.media_id, "m1");
    }
}
