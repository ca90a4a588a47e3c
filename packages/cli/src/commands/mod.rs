pub mod init;
pub mod schema;
pub mod styles;
pub mod validate;

pub use init::{init, InitArgs};
pub use schema::{schema, SchemaArgs};
pub use styles::{styles, StylesArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use pagecraft_content::Section;
use std::fs;
use std::path::Path;

/// Read a page export (a JSON array of sections)
pub fn read_page(path: &Path) -> Result<Vec<Section>> {
    let content = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let sections = serde_json::from_str(&content).with_context(|| format!("Invalid page export {}", path.display()))?;
    Ok(sections)
}
