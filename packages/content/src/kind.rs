//! The closed set of section kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContentError;

/// Section kind (the `type` column of a section)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Hero,
    Text,
    Image,
    Button,
    Columns,
    CardGrid,
    Accordion,
    Features,
    Testimonials,
    Faq,
    Pricing,
}

impl SectionKind {
    /// Every kind, in picker order
    pub const ALL: [SectionKind; 11] = [
        SectionKind::Hero,
        SectionKind::Text,
        SectionKind::Image,
        SectionKind::Button,
        SectionKind::Columns,
        SectionKind::CardGrid,
        SectionKind::Accordion,
        SectionKind::Features,
        SectionKind::Testimonials,
        SectionKind::Faq,
        SectionKind::Pricing,
    ];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Text => "text",
            SectionKind::Image => "image",
            SectionKind::Button => "button",
            SectionKind::Columns => "columns",
            SectionKind::CardGrid => "card-grid",
            SectionKind::Accordion => "accordion",
            SectionKind::Features => "features",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Faq => "faq",
            SectionKind::Pricing => "pricing",
        }
    }

    /// Human label shown in the section picker
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::Text => "Text",
            SectionKind::Image => "Image",
            SectionKind::Button => "Button",
            SectionKind::Columns => "Columns",
            SectionKind::CardGrid => "Card Grid",
            SectionKind::Accordion => "Accordion",
            SectionKind::Features => "Features",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::Faq => "FAQ",
            SectionKind::Pricing => "Pricing",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ContentError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for kind in SectionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<SectionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(matches!(
            "carousel".parse::<SectionKind>(),
            Err(ContentError::UnknownKind(name)) if name == "carousel"
        ));
    }
}
