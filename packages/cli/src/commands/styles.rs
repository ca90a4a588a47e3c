use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_content::{resolve, GlobalBranding};
use std::fs;
use std::path::PathBuf;

use super::read_page;

#[derive(Args, Debug)]
pub struct StylesArgs {
    /// Page export (.json)
    pub input: PathBuf,

    /// Branding file (.json); built-in defaults when omitted
    #[arg(short, long)]
    pub branding: Option<PathBuf>,

    /// Print CSS custom properties instead of inline declarations
    #[arg(long)]
    pub variables: bool,
}

pub fn styles(args: StylesArgs) -> Result<()> {
    let branding = match &args.branding {
        Some(path) => {
            let content = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
            let branding: GlobalBranding = serde_json::from_str(&content)?;
            branding.validate()?;
            branding
        }
        None => GlobalBranding::default(),
    };

    let mut sections = read_page(&args.input)?;
    sections.sort_by_key(|s| s.order);

    for section in &sections {
        let effective = resolve(section.style_override.as_ref(), &branding);
        let custom = section
            .style_override
            .as_ref()
            .map(|s| s.use_custom_styles)
            .unwrap_or(false);
        println!(
            "{} {} {}",
            section.id.to_string().bright_white(),
            section.kind().to_string().cyan(),
            if custom { "custom".yellow() } else { "global".dimmed() }
        );

        if args.variables {
            for (name, value) in effective.css_variables() {
                println!("    {}: {};", name, value);
            }
        } else {
            println!("    {}", effective.to_inline_css());
        }
    }
    Ok(())
}
