use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{EditorConfig, CONFIG_FILE};
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Delete sections without asking first
    #[arg(long)]
    pub no_confirm_delete: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), CONFIG_FILE.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = EditorConfig {
        confirm_delete: !args.no_confirm_delete,
        ..EditorConfig::default()
    };
    config.save(cwd)?;

    println!("  {} Created {}", "✓".green(), CONFIG_FILE);
    println!();
    println!("{}", "✅ Editor configured!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Export a page as JSON");
    println!("  2. Run: pagecraft validate page.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        init(
            InitArgs {
                no_confirm_delete: true,
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert!(!config.confirm_delete);
        assert_eq!(config.max_notifications, EditorConfig::default().max_notifications);
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = TempDir::new().unwrap();
        let existing = EditorConfig {
            max_notifications: 3,
            ..EditorConfig::default()
        };
        existing.save(dir.path()).unwrap();

        init(
            InitArgs {
                no_confirm_delete: false,
                force: false,
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), existing);
    }
}
