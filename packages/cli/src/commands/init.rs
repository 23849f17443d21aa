use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Keep a backup when rewriting documents in place
    #[arg(short, long)]
    pub backup: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        backup: args.backup,
        ..Config::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(InitArgs { backup: true, force: false }, cwd).unwrap();

        let config = Config::load(cwd).unwrap();
        assert!(config.backup);
        assert_eq!(config.options.lookup_parameter, "Comments");
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "lookupParameter": "Mark" }"#).unwrap();

        init(InitArgs { backup: false, force: false }, cwd).unwrap();
        assert_eq!(Config::load(cwd).unwrap().options.lookup_parameter, "Mark");

        init(InitArgs { backup: false, force: true }, cwd).unwrap();
        assert_eq!(Config::load(cwd).unwrap().options.lookup_parameter, "Comments");
    }
}
