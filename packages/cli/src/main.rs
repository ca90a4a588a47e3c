mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, schema, styles, validate, InitArgs, SchemaArgs, StylesArgs, ValidateArgs};
use pagecraft_editor::EditorConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - page builder tooling
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pagecraft.config.json
    Init(InitArgs),

    /// Print the editable fields of a section kind
    Schema(SchemaArgs),

    /// Check page exports against the content schemas
    Validate(ValidateArgs),

    /// Print the effective style of every section in a page export
    Styles(StylesArgs),
}

fn init_tracing(cwd: &Path) {
    let config = EditorConfig::load(cwd).unwrap_or_default();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };
    init_tracing(&cwd);

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Schema(args) => schema(args),
        Command::Validate(args) => validate(args),
        Command::Styles(args) => styles(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
