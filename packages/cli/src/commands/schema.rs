use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_content::{FieldDefinition, FieldKind, SectionKind};

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Section kind (hero, text, image, button, columns, card-grid, ...)
    pub kind: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn schema(args: SchemaArgs) -> Result<()> {
    let Some(kind) = args.kind else {
        println!("{}", "Section kinds:".bold());
        for kind in SectionKind::ALL {
            println!("  {:<14} {}", kind.as_str().bright_white(), kind.label().dimmed());
        }
        return Ok(());
    };

    let kind: SectionKind = kind.parse()?;
    let fields = kind.schema();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&fields)?),
        "text" => {
            println!("{} {}", kind.label().bold(), format!("({})", kind).dimmed());
            print_fields(&fields, 1);
        }
        other => bail!("Unknown format: {}. Use: text or json", other),
    }
    Ok(())
}

fn print_fields(fields: &[FieldDefinition], depth: usize) {
    let indent = "  ".repeat(depth);
    for field in fields {
        let marker = if field.required { "*".red().to_string() } else { " ".to_string() };
        println!(
            "{}{}{:<16} {:<10} {}",
            indent,
            marker,
            field.name.bright_white(),
            kind_name(&field.kind).cyan(),
            field.label
        );

        match &field.kind {
            FieldKind::Select { options } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                println!("{}    options: {}", indent, values.join(", ").dimmed());
            }
            FieldKind::Number { min, max } if min.is_some() || max.is_some() => {
                let bound = |b: &Option<f64>| b.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
                println!("{}    range: {}..{}", indent, bound(min), bound(max));
            }
            FieldKind::Repeater { fields, .. } => print_fields(fields, depth + 2),
            _ => {}
        }
        if let Some(help) = &field.help {
            println!("{}    {}", indent, help.dimmed());
        }
    }
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Textarea => "textarea",
        FieldKind::RichText => "rich-text",
        FieldKind::Number { .. } => "number",
        FieldKind::Date => "date",
        FieldKind::Image => "image",
        FieldKind::Link => "link",
        FieldKind::Select { .. } => "select",
        FieldKind::Checkbox => "checkbox",
        FieldKind::Repeater { .. } => "list",
    }
}
