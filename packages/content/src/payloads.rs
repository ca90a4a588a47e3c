//! Per-kind content records.
//!
//! Every record is `#[serde(default)]`: keys missing from stored JSON come back
//! as the field's blank value and unknown keys are dropped on load.

use serde::{Deserialize, Serialize};

use crate::MediaId;

/// Reference to a media library item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRef {
    pub media_id: String,
    pub url: String,
    pub alt: String,
}

impl ImageRef {
    pub fn new(media_id: &MediaId, url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            media_id: media_id.to_string(),
            url: url.into(),
            alt: alt.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.media_id.is_empty() && self.url.is_empty()
    }
}

/// Link target plus its visible text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: String,
    pub overlay: bool,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            headline: String::new(),
            subheadline: String::new(),
            overlay: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContent {
    pub heading: String,
    /// Rich text (HTML fragment)
    pub body: String,
    pub alignment: String,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            body: String::new(),
            alignment: "left".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageContent {
    pub image: ImageRef,
    pub caption: String,
    pub full_width: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonContent {
    pub link: Link,
    pub variant: String,
    pub new_tab: bool,
}

impl Default for ButtonContent {
    fn default() -> Self {
        Self {
            link: Link::default(),
            variant: "primary".to_string(),
            new_tab: false,
        }
    }
}

/// One column of the legacy column layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Column {
    pub heading: String,
    pub body: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnsContent {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    pub description: String,
    pub image: ImageRef,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardGridContent {
    pub heading: String,
    pub columns_per_row: u32,
    pub cards: Vec<Card>,
}

impl Default for CardGridContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            columns_per_row: 3,
            cards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionItem {
    pub title: String,
    pub body: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionContent {
    pub heading: String,
    pub allow_multiple: bool,
    pub items: Vec<AccordionItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesContent {
    pub heading: String,
    pub subheading: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsContent {
    pub heading: String,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqContent {
    pub heading: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingPlan {
    pub name: String,
    pub price: f64,
    pub period: String,
    /// One feature per line
    pub features: String,
    pub highlighted: bool,
    pub cta: Link,
}

impl Default for PricingPlan {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: 0.0,
            period: "month".to_string(),
            features: String::new(),
            highlighted: false,
            cta: Link::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingContent {
    pub heading: String,
    /// `YYYY-MM-DD`, empty when the offer does not expire
    pub valid_until: String,
    pub plans: Vec<PricingPlan>,
}
