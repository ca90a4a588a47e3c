//! Addressing of values inside a content object.
//!
//! A path is written `cards[2].title`: keys separated by dots, repeater item
//! indexes in brackets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::ContentError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field value inside a content object
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a top-level field
    pub fn field(name: &str) -> Self {
        Self(vec![PathSegment::Key(name.to_string())])
    }

    pub fn key(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(name.to_string()));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path without its last segment
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(root, |value, segment| match segment {
            PathSegment::Key(key) => value.get(key.as_str()),
            PathSegment::Index(index) => value.get(*index),
        })
    }

    pub fn get_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        self.0.iter().try_fold(root, |value, segment| match segment {
            PathSegment::Key(key) => value.get_mut(key.as_str()),
            PathSegment::Index(index) => value.get_mut(*index),
        })
    }

    /// Replace the value at this path
    ///
    /// A missing final key is inserted into its parent object; every other
    /// segment must already exist.
    pub fn set(&self, root: &mut Value, new_value: Value) -> Result<(), ContentError> {
        let Some((last, parents)) = self.0.split_last() else {
            *root = new_value;
            return Ok(());
        };

        let parent = Self(parents.to_vec())
            .get_mut(root)
            .ok_or_else(|| ContentError::InvalidPath(self.to_string()))?;

        match (last, parent) {
            (PathSegment::Key(key), Value::Object(map)) => {
                map.insert(key.clone(), new_value);
                Ok(())
            }
            (PathSegment::Index(index), Value::Array(items)) if *index < items.len() => {
                items[*index] = new_value;
                Ok(())
            }
            _ => Err(ContentError::InvalidPath(self.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ContentError::InvalidPath(s.to_string());
        let mut segments = Vec::new();

        for part in s.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if key.is_empty() {
                return Err(invalid());
            }
            segments.push(PathSegment::Key(key.to_string()));

            while let Some(stripped) = rest.strip_prefix('[') {
                let end = stripped.find(']').ok_or_else(invalid)?;
                let index = stripped[..end].parse().map_err(|_| invalid())?;
                segments.push(PathSegment::Index(index));
                rest = &stripped[end + 1..];
            }
            if !rest.is_empty() {
                return Err(invalid());
            }
        }

        Ok(Self(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_display() {
        let path: FieldPath = "plans[1].cta.url".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("plans".into()),
                PathSegment::Index(1),
                PathSegment::Key("cta".into()),
                PathSegment::Key("url".into()),
            ]
        );
        assert_eq!(path.to_string(), "plans[1].cta.url");
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        for bad in ["", "a..b", "[0]", "items[x]", "items[1", "items[1]x"] {
            assert!(bad.parse::<FieldPath>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_get_and_set() {
        let mut value = json!({ "items": [{ "question": "a" }, { "question": "b" }] });
        let path = FieldPath::field("items").index(1).key("question");

        assert_eq!(path.get(&value), Some(&json!("b")));
        path.set(&mut value, json!("c")).unwrap();
        assert_eq!(value["items"][1]["question"], json!("c"));
    }

    #[test]
    fn test_set_inserts_missing_leaf_key() {
        let mut value = json!({});
        FieldPath::field("headline").set(&mut value, json!("Sale")).unwrap();
        assert_eq!(value, json!({ "headline": "Sale" }));
    }

    #[test]
    fn test_set_out_of_range_index_fails() {
        let mut value = json!({ "items": [] });
        let result = FieldPath::field("items").index(0).set(&mut value, json!({}));
        assert!(matches!(result, Err(ContentError::InvalidPath(_))));
    }
}
