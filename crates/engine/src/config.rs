use std::path::Path;

use log::warn;

use crate::error::ConfigError;
use crate::types::{CELL_COUNT, DEFAULT_FOUR_CHANCE_PERCENT, DEFAULT_INITIAL_TILES};

/// Game configuration, loadable from TOML.
///
/// ```toml
/// seed = 12345
/// initial_tiles = 2
/// four_chance_percent = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the spawn RNG; entropy when unset
    pub seed: Option<u64>,
    /// Tiles placed on a fresh board
    pub initial_tiles: usize,
    /// Chance (0-100) that a spawned tile is a 4
    pub four_chance_percent: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: None,
            initial_tiles: DEFAULT_INITIAL_TILES,
            four_chance_percent: DEFAULT_FOUR_CHANCE_PERCENT,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_tiles == 0 || self.initial_tiles > CELL_COUNT {
            return Err(ConfigError::Validation(format!(
                "initial_tiles must be in 1..={}",
                CELL_COUNT
            )));
        }
        if self.four_chance_percent > 100 {
            return Err(ConfigError::Validation(
                "four_chance_percent must be <= 100".into(),
            ));
        }
        Ok(())
    }

    /// Render the default configuration as TOML, for writing an example file.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_tiles, 2);
        assert_eq!(config.four_chance_percent, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("seed = 7").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_tiles, DEFAULT_INITIAL_TILES);
        assert_eq!(config.four_chance_percent, DEFAULT_FOUR_CHANCE_PERCENT);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_toml_str("four_chance_percent = 101").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = GameConfig::from_toml_str("initial_tiles = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = GameConfig::from_toml_str("initial_tiles = 17").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = GameConfig::from_toml_str("seed = \"abc\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_default_toml_parses_back() {
        let text = GameConfig::default_toml().unwrap();
        assert!(text.contains("initial_tiles = 2"));
        assert!(!text.contains("seed"));
        assert_eq!(GameConfig::from_toml_str(&text).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = Path::new("/nonexistent/tile-merge.toml");
        assert_eq!(GameConfig::load_or_default(path).unwrap(), GameConfig::default());
        assert!(matches!(
            GameConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
    }
}
