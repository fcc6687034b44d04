use crate::bench::BenchConfig;
use crate::index::IndexConfig;
use crate::signal::Quantizer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "fmx";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the user config directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Index construction settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Sample-to-symbol mapping
    #[serde(default)]
    pub quantizer: Quantizer,

    /// Benchmark targets and track discovery
    #[serde(default)]
    pub bench: BenchConfig,
}

impl AppConfig {
    /// Load config from the user config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .quantizer
            .validate()
            .context("Invalid quantizer settings")?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Path of the default config file, if the platform has a config directory
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ConstructionStrategy;
    use tempfile::tempdir;

    #[test]
    fn test_app_config_empty_json() {
        // Empty object should use all defaults
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"index": {"strategy": "naive"}, "quantizer": {"scale": 2.0}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.index.strategy, ConstructionStrategy::Naive);
        assert_eq!(config.index.naive_threshold, IndexConfig::default().naive_threshold);
        assert_eq!(config.quantizer.scale, 2.0);
        assert_eq!(config.quantizer.base_offset, 128);
        assert_eq!(config.bench, BenchConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.bench.repeats = 3;
        config.index.timeout_secs = Some(30);
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_quantizer_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"quantizer": {"scale": 0.0}}"#).unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_config_path_ends_with_app_name() {
        if let Some(path) = get_config_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE)));
        }
    }
}
