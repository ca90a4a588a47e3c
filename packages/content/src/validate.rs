//! Required-field and format checks run before content is committed.

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::visit::{walk_field, FieldVisitor};
use crate::{FieldDefinition, FieldKind, FieldPath};

/// What is wrong with a field value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Problem {
    #[error("is required")]
    Missing,

    #[error("is not a valid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("must be between {min} and {max}")]
    OutOfRange { min: String, max: String },

    #[error("has no option {0:?}")]
    UnknownOption(String),

    #[error("should be {0}")]
    WrongType(&'static str),
}

/// A problem attached to the field it was found on
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub label: String,
    pub problem: Problem,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.label, self.path, self.problem)
    }
}

/// Validate a content object against its schema
pub fn validate(fields: &[FieldDefinition], value: &Value) -> Vec<FieldIssue> {
    let mut validator = Validator::default();
    validator.visit_fields(fields, &FieldPath::root(), value);
    validator.issues
}

#[derive(Default)]
struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    fn report(&mut self, field: &FieldDefinition, path: &FieldPath, problem: Problem) {
        self.issues.push(FieldIssue {
            path: path.clone(),
            label: field.label.clone(),
            problem,
        });
    }
}

impl FieldVisitor for Validator {
    fn visit_field(&mut self, field: &FieldDefinition, path: &FieldPath, value: Option<&Value>) {
        if field.required && is_blank(field, value) {
            self.report(field, path, Problem::Missing);
        }

        if let Some(problem) = value.and_then(|value| check_format(field, value)) {
            self.report(field, path, problem);
        }

        walk_field(self, field, path, value);
    }
}

fn is_blank(field: &FieldDefinition, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return !matches!(field.kind, FieldKind::Checkbox);
    };

    match &field.kind {
        FieldKind::Text
        | FieldKind::Textarea
        | FieldKind::RichText
        | FieldKind::Date
        | FieldKind::Select { .. } => value.as_str().map(|s| s.trim().is_empty()).unwrap_or(true),
        FieldKind::Number { .. } => value.is_null(),
        FieldKind::Image | FieldKind::Link => value
            .get("url")
            .and_then(Value::as_str)
            .map(|url| url.trim().is_empty())
            .unwrap_or(true),
        FieldKind::Checkbox => false,
        FieldKind::Repeater { .. } => value.as_array().map(Vec::is_empty).unwrap_or(true),
    }
}

fn check_format(field: &FieldDefinition, value: &Value) -> Option<Problem> {
    match &field.kind {
        FieldKind::Date => {
            let text = value.as_str()?;
            if text.is_empty() {
                return None;
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .err()
                .map(|_| Problem::InvalidDate(text.to_string()))
        }
        FieldKind::Number { min, max } => {
            if value.is_null() {
                return None;
            }
            let Some(number) = value.as_f64() else {
                return Some(Problem::WrongType("a number"));
            };
            let below = min.map(|min| number < min).unwrap_or(false);
            let above = max.map(|max| number > max).unwrap_or(false);
            (below || above).then(|| Problem::OutOfRange {
                min: min.map(|m| m.to_string()).unwrap_or_else(|| "-inf".to_string()),
                max: max.map(|m| m.to_string()).unwrap_or_else(|| "inf".to_string()),
            })
        }
        FieldKind::Select { options } => {
            let selected = value.as_str()?;
            if selected.is_empty() || options.iter().any(|option| option.value == selected) {
                None
            } else {
                Some(Problem::UnknownOption(selected.to_string()))
            }
        }
        FieldKind::Checkbox => (!value.is_boolean()).then_some(Problem::WrongType("true or false")),
        FieldKind::Repeater { .. } => (!value.is_array()).then_some(Problem::WrongType("a list")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionKind;
    use serde_json::json;

    #[test]
    fn test_default_hero_is_missing_headline() {
        let issues = validate(&SectionKind::Hero.schema(), &json!({ "headline": "  ", "overlay": true }));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.to_string(), "headline");
        assert_eq!(issues[0].problem, Problem::Missing);
    }

    #[test]
    fn test_required_fields_inside_repeater_items() {
        let value = json!({
            "heading": "FAQ",
            "items": [
                { "question": "Why?", "answer": "Because" },
                { "question": "", "answer": "Orphan answer" }
            ]
        });
        let issues = validate(&SectionKind::Faq.schema(), &value);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.to_string(), "items[1].question");
        assert_eq!(issues[0].to_string(), "Question (items[1].question) is required");
    }

    #[test]
    fn test_date_and_bounds_checks() {
        let value = json!({
            "heading": "Plans",
            "validUntil": "2026-13-01",
            "plans": [{ "name": "Pro", "price": -5, "period": "week" }]
        });
        let problems: Vec<_> = validate(&SectionKind::Pricing.schema(), &value)
            .into_iter()
            .map(|issue| (issue.path.to_string(), issue.problem))
            .collect();

        assert_eq!(
            problems,
            vec![
                ("validUntil".to_string(), Problem::InvalidDate("2026-13-01".to_string())),
                (
                    "plans[0].price".to_string(),
                    Problem::OutOfRange { min: "0".to_string(), max: "inf".to_string() }
                ),
                ("plans[0].period".to_string(), Problem::UnknownOption("week".to_string())),
            ]
        );
    }

    #[test]
    fn test_image_requires_url() {
        let value = json!({ "image": { "mediaId": "m1", "url": "", "alt": "" } });
        let issues = validate(&SectionKind::Image.schema(), &value);
        assert_eq!(issues[0].problem, Problem::Missing);

        let value = json!({ "image": { "mediaId": "m1", "url": "/cat.png", "alt": "" } });
        assert!(validate(&SectionKind::Image.schema(), &value).is_empty());
    }
}
