use std::path::Path;

use crate::error::ConfigError;
use crate::game::Color;

/// Board parameters: grid size, palette size, and an optional RNG seed for
/// reproducible deals.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub size: usize,
    pub colors: usize,
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            size: 8,
            colors: Color::PALETTE.len(),
            seed: None,
        }
    }
}

/// Interface parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Milliseconds between cascade ticks while the board is settling.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { tick_ms: 100 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.size < 4 {
            return Err(ConfigError::Validation("board.size must be >= 4".into()));
        }
        if self.board.size > 16 {
            return Err(ConfigError::Validation("board.size must be <= 16".into()));
        }
        if self.board.colors < 3 {
            return Err(ConfigError::Validation("board.colors must be >= 3".into()));
        }
        if self.board.colors > Color::PALETTE.len() {
            return Err(ConfigError::Validation(format!(
                "board.colors must be <= {}",
                Color::PALETTE.len()
            )));
        }
        if self.ui.tick_ms < 10 {
            return Err(ConfigError::Validation("ui.tick_ms must be >= 10".into()));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
size = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.size, 10);
        // Other fields should be defaults
        assert_eq!(config.board.colors, 6);
        assert_eq!(config.ui.tick_ms, 100);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.board.size, 8);
        assert_eq!(config.board.seed, None);
    }

    #[test]
    fn test_validation_rejects_tiny_board() {
        let mut config = AppConfig::default();
        config.board.size = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_huge_board() {
        let mut config = AppConfig::default();
        config.board.size = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_too_few_colors() {
        let mut config = AppConfig::default();
        config.board.colors = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_too_many_colors() {
        let mut config = AppConfig::default();
        config.board.colors = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_fast_tick() {
        let mut config = AppConfig::default();
        config.ui.tick_ms = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.board.size, 8);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
colors = 4
seed = 12

[ui]
tick_ms = 50
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.board.colors, 4);
        assert_eq!(config.board.seed, Some(12));
        assert_eq!(config.ui.tick_ms, 50);
        // Others are defaults
        assert_eq!(config.board.size, 8);
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
