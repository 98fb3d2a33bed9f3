use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional user configuration. Unlike the API credential this is not
/// required; every field has a default. CLI flags override all of it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Model to use for summaries
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Base URL for the completion API
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub search: SearchEntry,
}

/// Search backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchEntry {
    /// Base URL of the DuckDuckGo HTML endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Cap on combined snippet text passed to the model
    #[serde(default)]
    pub max_chars: Option<usize>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("fable").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            model = "gpt-4o"
            temperature = 0.5

            [search]
            max_chars = 2000
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.model, Some("gpt-4o".to_string()));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.search.max_chars, Some(2000));
        assert_eq!(config.search.base_url, None);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model, None);
        assert_eq!(config.max_tokens, None);
    }
}
