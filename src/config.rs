use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Strategy;
use crate::export::{FenceRule, FenceTable};

/// User configuration for docxfence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory Markdown files are written to when `-o` is not given
    pub output_dir: Option<PathBuf>,

    /// Extraction strategy
    pub strategy: Strategy,

    /// Extra fence language rules, checked after the built-in ones
    pub fence_rules: Vec<FenceRule>,
}

impl Config {
    /// Load config from the config directory
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        // Return default config if no file found
        Ok(Config::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            self.save_to(&config_path)?;
        }

        Ok(())
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docxfence").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<()> {
        let config = Config::default();
        config.save()?;
        Ok(())
    }

    /// Built-in fence rules followed by the configured ones
    pub fn fence_table(&self) -> FenceTable {
        FenceTable::builtin().with_rules(self.fence_rules.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.strategy, Strategy::Auto);
    }

    #[test]
    fn test_parses_all_fields() {
        let config: Config = toml::from_str(
            r#"
output_dir = "converted"
strategy = "raw"

[[fence_rules]]
pattern = "dockerfile"
language = "dockerfile"
"#,
        )
        .unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("converted")));
        assert_eq!(config.strategy, Strategy::Raw);
        assert_eq!(
            config.fence_table().language_for("Dockerfile.docx"),
            "dockerfile"
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            output_dir: Some(PathBuf::from("out")),
            strategy: Strategy::Raw,
            fence_rules: vec![FenceRule::new("justfile", "just")],
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "strategy = \"sometimes\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
