//! # Style Override Resolution
//!
//! Every section renders with an [`EffectiveStyle`] computed from the site's
//! [`GlobalBranding`] and the section's optional [`StyleOverride`].
//!
//! ```text
//! override absent or useCustomStyles = false  →  global, field for field
//! useCustomStyles = true                      →  override field if set, else global field
//! ```
//!
//! Fallback is per field: a custom-styled section that only sets a primary
//! color still inherits fonts and the rest of the palette.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::ContentError;

/// Per-section visual customization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOverride {
    pub use_custom_styles: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<u16>,
}

impl StyleOverride {
    /// "Reset to global": every field pinned to the current global value and
    /// custom styles switched off
    ///
    /// Turning custom styles back on later starts from the branding that was
    /// current at reset time, not from whatever was set before it.
    pub fn reset_to_global(global: &GlobalBranding) -> Self {
        Self {
            use_custom_styles: false,
            primary_color: Some(global.primary_color.clone()),
            secondary_color: Some(global.secondary_color.clone()),
            accent_color: Some(global.accent_color.clone()),
            background_color: Some(global.background_color.clone()),
            text_color: Some(global.text_color.clone()),
            heading_font: Some(global.heading_font.clone()),
            body_font: Some(global.body_font.clone()),
            heading_weight: Some(global.heading_weight),
            body_weight: Some(global.body_weight),
        }
    }

    /// Check the fields that are set
    pub fn validate(&self) -> Result<(), ContentError> {
        let colors = [
            ("primaryColor", &self.primary_color),
            ("secondaryColor", &self.secondary_color),
            ("accentColor", &self.accent_color),
            ("backgroundColor", &self.background_color),
            ("textColor", &self.text_color),
        ];
        for (field, color) in colors {
            if let Some(color) = color {
                check_color(field, color)?;
            }
        }
        if let Some(weight) = self.heading_weight {
            check_weight("headingWeight", weight)?;
        }
        if let Some(weight) = self.body_weight {
            check_weight("bodyWeight", weight)?;
        }
        Ok(())
    }
}

/// Site-wide palette and typography baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalBranding {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub heading_font: String,
    pub body_font: String,
    pub heading_weight: u16,
    pub body_weight: u16,
}

impl Default for GlobalBranding {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#1e293b".to_string(),
            accent_color: "#f59e0b".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#111827".to_string(),
            heading_font: "Inter".to_string(),
            body_font: "Inter".to_string(),
            heading_weight: 700,
            body_weight: 400,
        }
    }
}

impl GlobalBranding {
    pub fn validate(&self) -> Result<(), ContentError> {
        check_color("primaryColor", &self.primary_color)?;
        check_color("secondaryColor", &self.secondary_color)?;
        check_color("accentColor", &self.accent_color)?;
        check_color("backgroundColor", &self.background_color)?;
        check_color("textColor", &self.text_color)?;
        check_font("headingFont", &self.heading_font)?;
        check_font("bodyFont", &self.body_font)?;
        check_weight("headingWeight", self.heading_weight)?;
        check_weight("bodyWeight", self.body_weight)
    }
}

/// Fully resolved style of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveStyle {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub heading_font: String,
    pub body_font: String,
    pub heading_weight: u16,
    pub body_weight: u16,
}

impl From<&GlobalBranding> for EffectiveStyle {
    fn from(global: &GlobalBranding) -> Self {
        Self {
            primary_color: global.primary_color.clone(),
            secondary_color: global.secondary_color.clone(),
            accent_color: global.accent_color.clone(),
            background_color: global.background_color.clone(),
            text_color: global.text_color.clone(),
            heading_font: global.heading_font.clone(),
            body_font: global.body_font.clone(),
            heading_weight: global.heading_weight,
            body_weight: global.body_weight,
        }
    }
}

impl EffectiveStyle {
    /// CSS custom properties for a section wrapper
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--color-primary", self.primary_color.clone()),
            ("--color-secondary", self.secondary_color.clone()),
            ("--color-accent", self.accent_color.clone()),
            ("--color-background", self.background_color.clone()),
            ("--color-text", self.text_color.clone()),
            ("--font-heading", self.heading_font.clone()),
            ("--font-body", self.body_font.clone()),
            ("--font-weight-heading", self.heading_weight.to_string()),
            ("--font-weight-body", self.body_weight.to_string()),
        ]
    }

    /// Inline `style` attribute value
    pub fn to_inline_css(&self) -> String {
        self.css_variables()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Effective style of a section
pub fn resolve(style_override: Option<&StyleOverride>, global: &GlobalBranding) -> EffectiveStyle {
    let mut style = EffectiveStyle::from(global);

    let Some(o) = style_override.filter(|o| o.use_custom_styles) else {
        return style;
    };

    fn pick(slot: &mut String, value: &Option<String>) {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }

    pick(&mut style.primary_color, &o.primary_color);
    pick(&mut style.secondary_color, &o.secondary_color);
    pick(&mut style.accent_color, &o.accent_color);
    pick(&mut style.background_color, &o.background_color);
    pick(&mut style.text_color, &o.text_color);
    pick(&mut style.heading_font, &o.heading_font);
    pick(&mut style.body_font, &o.body_font);
    if let Some(weight) = o.heading_weight {
        style.heading_weight = weight;
    }
    if let Some(weight) = o.body_weight {
        style.body_weight = weight;
    }

    style
}

fn hex_color() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"))
}

fn check_color(field: &'static str, value: &str) -> Result<(), ContentError> {
    if hex_color().is_match(value) {
        Ok(())
    } else {
        Err(ContentError::InvalidStyle { field, value: value.to_string() })
    }
}

fn check_font(field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        Err(ContentError::InvalidStyle { field, value: value.to_string() })
    } else {
        Ok(())
    }
}

fn check_weight(field: &'static str, value: u16) -> Result<(), ContentError> {
    if (100..=900).contains(&value) && value % 100 == 0 {
        Ok(())
    } else {
        Err(ContentError::InvalidStyle { field, value: value.to_string() })
    }
}
