use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_content::visit::{FieldVisitor, MediaCollector};
use pagecraft_content::{validate as validate_content, FieldPath, Section};
use pagecraft_editor::CONFIG_FILE;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::read_page;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Page export (.json) or directory of exports
    pub input: PathBuf,

    /// Also list referenced media
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub message: String,
}

impl Finding {
    fn error(section: Option<&Section>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            section: section.map(|s| s.id.to_string()),
            message: message.into(),
        }
    }

    fn warning(section: Option<&Section>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            section: section.map(|s| s.id.to_string()),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    sections: usize,
    findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media: Vec<String>,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let files = if args.input.is_dir() {
        find_exports(&args.input)
    } else if args.input.is_file() {
        vec![args.input.clone()]
    } else {
        return Err(anyhow::anyhow!("Input path does not exist: {}", args.input.display()));
    };

    let mut reports = Vec::new();
    for file in &files {
        tracing::debug!(file = %file.display(), "validating page export");
        let sections = read_page(file)?;
        reports.push(FileReport {
            file: file.display().to_string(),
            sections: sections.len(),
            findings: check_page(&sections),
            media: if args.verbose { media_of(&sections) } else { Vec::new() },
        });
    }

    let errors: usize = reports
        .iter()
        .flat_map(|r| &r.findings)
        .filter(|f| f.severity == Severity::Error)
        .count();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&reports)?),
        _ => print_reports(&reports),
    }

    if errors > 0 {
        return Err(anyhow::anyhow!("{} error(s) found", errors));
    }
    Ok(())
}

/// Page-level checks: identity, ranks, links, styles and content fields
pub fn check_page(sections: &[Section]) -> Vec<Finding> {
    let mut findings = Vec::new();

    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(&section.id) {
            findings.push(Finding::error(Some(section), "duplicate section id"));
        }
    }

    let mut ranks: Vec<u32> = sections.iter().map(|s| s.order).collect();
    ranks.sort_unstable();
    if ranks.iter().enumerate().any(|(i, rank)| *rank != i as u32) {
        findings.push(Finding::error(
            None,
            format!("section order is not dense and unique: {:?}", ranks),
        ));
    }

    for section in sections {
        if let Some(link) = &section.reusable_ref {
            if link.is_linked && link.component_id.as_str().is_empty() {
                findings.push(Finding::error(Some(section), "linked without a component id"));
            }
        }

        if let Some(style) = &section.style_override {
            if let Err(e) = style.validate() {
                findings.push(Finding::error(Some(section), e.to_string()));
            }
        }

        match section.content.to_wire() {
            Ok(wire) => {
                for issue in validate_content(&section.kind().schema(), &wire) {
                    findings.push(Finding::warning(Some(section), issue.to_string()));
                }
            }
            Err(e) => findings.push(Finding::error(Some(section), e.to_string())),
        }
    }

    findings
}

fn media_of(sections: &[Section]) -> Vec<String> {
    let mut media = Vec::new();
    for section in sections {
        let Ok(wire) = section.content.to_wire() else {
            continue;
        };
        let mut collector = MediaCollector::default();
        collector.visit_fields(&section.kind().schema(), &FieldPath::root(), &wire);
        media.extend(
            collector
                .images
                .into_iter()
                .map(|(path, image)| format!("{} {} {}", section.id, path, image.url)),
        );
    }
    media
}

fn find_exports(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
        .filter(|p| p.file_name().map(|n| n != CONFIG_FILE).unwrap_or(true))
        .collect()
}

fn print_reports(reports: &[FileReport]) {
    for report in reports {
        let status = if report.findings.iter().any(|f| f.severity == Severity::Error) {
            "✗".red()
        } else {
            "✓".green()
        };
        println!("{} {} ({} sections)", status, report.file.bright_white(), report.sections);

        for finding in &report.findings {
            let label = match finding.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            match &finding.section {
                Some(section) => println!("    {} [{}] {}", label, section.cyan(), finding.message),
                None => println!("    {} {}", label, finding.message),
            }
        }
        for media in &report.media {
            println!("    {} {}", "media".dimmed(), media);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_content::{ComponentId, Content, ReusableRef, SectionId, SectionKind, StyleOverride};

    fn section(id: &str, order: u32) -> Section {
        let content = Content::from_wire(
            SectionKind::Text,
            serde_json::json!({ "heading": "Hi", "body": "<p>Hello</p>" }),
        )
        .unwrap();
        Section::new(SectionId::new(id), content, order)
    }

    #[test]
    fn test_clean_page_has_no_findings() {
        assert!(check_page(&[section("a", 0), section("b", 1)]).is_empty());
    }

    #[test]
    fn test_sparse_ranks_and_duplicates() {
        let findings = check_page(&[section("a", 0), section("a", 2)]);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.severity == Severity::Error));
    }

    #[test]
    fn test_bad_link_and_style() {
        let mut s = section("a", 0);
        s.reusable_ref = Some(ReusableRef {
            component_id: ComponentId::new(""),
            component_name: "Footer".to_string(),
            is_linked: true,
        });
        s.style_override = Some(StyleOverride {
            primary_color: Some("blue".to_string()),
            ..StyleOverride::default()
        });

        let findings = check_page(&[s]);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_missing_required_is_a_warning() {
        let s = Section::new(SectionId::new("a"), Content::default_for(SectionKind::Text), 0);
        let findings = check_page(&[s]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("body"));
    }
}
