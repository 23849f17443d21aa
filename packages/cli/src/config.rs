use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textsweep_engine::ReplaceOptions;

pub const DEFAULT_CONFIG_NAME: &str = "textsweep.config.json";

/// Textsweep configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Engine settings
    #[serde(flatten)]
    pub options: ReplaceOptions,

    /// Keep a `.bak` copy when a document is rewritten in place
    #[serde(default)]
    pub backup: bool,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
