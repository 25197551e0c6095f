use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_distribution_id")]
    pub distribution_id: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_aws_bin")]
    pub aws_bin: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_distribution_id() -> String {
    "E1YH7W2565N4LY".to_string()
}

fn default_output_file() -> String {
    "updated-distribution-config.json".to_string()
}

fn default_aws_bin() -> String {
    "aws".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distribution_id: default_distribution_id(),
            output_file: default_output_file(),
            aws_bin: default_aws_bin(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads the TOML config at `path`. A missing file is not an error; the
    /// built-in defaults apply.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load("does-not-exist.toml").unwrap();
        assert_eq!(config.distribution_id, "E1YH7W2565N4LY");
        assert_eq!(config.output_file, "updated-distribution-config.json");
        assert_eq!(config.aws_bin, "aws");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = toml::from_str(r#"distribution_id = "EABCDEF""#).unwrap();
        assert_eq!(config.distribution_id, "EABCDEF");
        assert_eq!(config.aws_bin, "aws");
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "distribution_id = [").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
