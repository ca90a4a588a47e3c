//! Opaque identifiers handed out by the content store.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a section on a page
    SectionId
);
opaque_id!(
    /// Identifier of a page
    PageId
);
opaque_id!(
    /// Identifier of a reusable component
    ComponentId
);
opaque_id!(
    /// Identifier of a media library item
    MediaId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = SectionId::new("sec-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sec-7\"");

        let back: SectionId = serde_json::from_str("\"sec-7\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "sec-7");
    }
}
