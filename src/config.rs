use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::speech;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    #[serde(default = "speech::default_command")]
    pub speech_command: Vec<String>,
    #[serde(default = "default_stroke_diagram_dir")]
    pub stroke_diagram_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_speech_enabled() -> bool {
    true
}
fn default_stroke_diagram_dir() -> String {
    data_dir().join("kana").to_string_lossy().to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            language: default_language(),
            speech_enabled: default_speech_enabled(),
            speech_command: speech::default_command(),
            stroke_diagram_dir: default_stroke_diagram_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Per-user data directory, also home of the log file.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanadrill")
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("invalid config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kanadrill")
            .join("config.toml")
    }

    /// Reset `language` to the default if no locale file exists for it.
    pub fn normalize_language(&mut self, valid: &[&str]) {
        // Accept "zh" and "zh_CN" for the bundled "zh-CN".
        if self.language == "zh" || self.language == "zh_CN" {
            self.language = "zh-CN".to_string();
        }
        if !valid.contains(&self.language.as_str()) {
            self.language = default_language();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.language, "en");
        assert!(config.speech_enabled);
        assert!(!config.speech_command.is_empty());
        assert!(config.stroke_diagram_dir.contains("kana"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
theme = "catppuccin-latte"
speech_enabled = false
speech_command = ["say", "-v", "Otoya"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-latte");
        assert!(!config.speech_enabled);
        assert_eq!(config.speech_command, vec!["say", "-v", "Otoya"]);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.speech_command, deserialized.speech_command);
        assert_eq!(config.stroke_diagram_dir, deserialized.stroke_diagram_dir);
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap().theme, "catppuccin-mocha");

        let mut config = Config::default();
        config.language = "zh-CN".to_string();
        config.log_level = "debug".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.language, "zh-CN");
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "speech_enabled = \"sometimes\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn test_normalize_language() {
        let valid = ["en", "zh-CN"];
        let mut config = Config::default();
        config.language = "zh".to_string();
        config.normalize_language(&valid);
        assert_eq!(config.language, "zh-CN");

        config.language = "fr".to_string();
        config.normalize_language(&valid);
        assert_eq!(config.language, "en");

        config.language = String::new();
        config.normalize_language(&valid);
        assert_eq!(config.language, "en");
    }
}
