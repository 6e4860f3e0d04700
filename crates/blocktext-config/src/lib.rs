//! # blocktext configuration
//!
//! Persistent defaults for the command line, layered in priority order:
//! 1. CLI arguments (merged by the caller)
//! 2. Environment variables (`BLOCKTEXT_FONT`, `BLOCKTEXT_LETTER_SPACING`, ...).
//!    Lists take either form: `BLOCKTEXT_COLORS=red,blue` or
//!    `BLOCKTEXT_COLORS='[red, blue]'`
//! 3. User config (`~/.config/blocktext/config.toml`)
//! 4. Built-in defaults (filled in by the renderer)
//!
//! ```toml
//! font = "chrome"
//! colors = ["red", "#ffaa00"]
//! align = "center"
//! letterSpacing = 2
//! ```

use std::path::{Path, PathBuf};

use blocktext_core::PartialOptions;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be read or had the wrong shape
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    /// Options could not be written as TOML
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BLOCKTEXT_";

/// Get the configuration directory
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("dev", "blocktext", "blocktext")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config/blocktext"))
}

/// Default config file location
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// `LETTER_SPACING` and `letter_spacing` both become `letterSpacing`
fn env_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}

/// Reads [`PartialOptions`] from a config file and the environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader for the user config file
    pub fn new() -> Self {
        Self::with_path(config_path())
    }

    /// Loader for a specific config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Read environment variables with a different prefix
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The layered sources, file first and environment on top
    pub fn figment(&self) -> Figment {
        Figment::new()
            .merge(Toml::file(&self.path))
            .merge(Env::prefixed(&self.env_prefix).map(|key| env_key(key.as_str()).into()))
    }

    /// Load options. A missing file contributes nothing.
    pub fn load(&self) -> Result<PartialOptions> {
        if !self.path.exists() {
            tracing::debug!("No config file at {}", self.path.display());
        }
        let options: PartialOptions = self.figment().extract()?;
        tracing::debug!("Loaded config: {:?}", options);
        Ok(options)
    }

    /// Write options to the config file, creating its directory
    pub fn save(&self, options: &PartialOptions) -> Result<()> {
        let content = toml::to_string_pretty(options)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, content)?;
        tracing::info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loader(dir: &tempfile::TempDir) -> ConfigLoader {
        // a prefix nothing else sets, so the real environment stays out of it
        ConfigLoader::with_path(dir.path().join("config.toml")).env_prefix("BLOCKTEXT_UNSET_TEST_")
    }

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("letter_spacing"), "letterSpacing");
        assert_eq!(env_key("FONT"), "font");
        assert_eq!(env_key("BACKGROUND_COLOR"), "backgroundColor");
        assert_eq!(env_key("_max_length"), "maxLength");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(loader(&dir).load().unwrap(), PartialOptions::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            r##"
font = "chrome"
colors = ["red", "#ffaa00"]
letterSpacing = 2
backgroundColor = "blue"
"##,
        )
        .unwrap();

        let options = loader(&dir).load().unwrap();
        assert_eq!(options.font.as_deref(), Some("chrome"));
        assert_eq!(options.colors, Some(vec!["red".to_string(), "#ffaa00".to_string()]));
        assert_eq!(options.letter_spacing, Some(2));
        assert_eq!(options.background_color.as_deref(), Some("blue"));
        assert_eq!(options.align, None);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "font = \"chrome\"\nspace = true\n").unwrap();

        std::env::set_var("BLOCKTEXT_OVERRIDE_TEST_FONT", "tiny");
        std::env::set_var("BLOCKTEXT_OVERRIDE_TEST_LINE_HEIGHT", "3");
        let options = ConfigLoader::with_path(dir.path().join("config.toml"))
            .env_prefix("BLOCKTEXT_OVERRIDE_TEST_")
            .load()
            .unwrap();
        std::env::remove_var("BLOCKTEXT_OVERRIDE_TEST_FONT");
        std::env::remove_var("BLOCKTEXT_OVERRIDE_TEST_LINE_HEIGHT");

        assert_eq!(options.font.as_deref(), Some("tiny"));
        assert_eq!(options.line_height, Some(3));
        assert_eq!(options.space, Some(true));
    }

    #[test]
    fn test_env_lists_split_on_commas() {
        let dir = tempfile::tempdir().unwrap();

        std::env::set_var("BLOCKTEXT_LIST_TEST_COLORS", "red,blue");
        std::env::set_var("BLOCKTEXT_LIST_TEST_GRADIENT", "red, #00ff00");
        let options = ConfigLoader::with_path(dir.path().join("config.toml"))
            .env_prefix("BLOCKTEXT_LIST_TEST_")
            .load()
            .unwrap();
        std::env::remove_var("BLOCKTEXT_LIST_TEST_COLORS");
        std::env::remove_var("BLOCKTEXT_LIST_TEST_GRADIENT");

        assert_eq!(options.colors, Some(vec!["red".to_string(), "blue".to_string()]));
        assert_eq!(options.gradient, Some(vec!["red".to_string(), "#00ff00".to_string()]));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = ConfigLoader::with_path(dir.path().join("nested").join("config.toml"))
            .env_prefix("BLOCKTEXT_UNSET_TEST_");
        let options = PartialOptions {
            font: Some("huge".into()),
            gradient: Some(vec!["red".into(), "blue".into()]),
            independent_gradient: Some(true),
            ..Default::default()
        };

        nested.save(&options).unwrap();
        let saved = std::fs::read_to_string(nested.path()).unwrap();
        assert!(saved.contains("independentGradient = true"));
        assert_eq!(nested.load().unwrap(), options);
    }

    #[test]
    fn test_bad_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "letterSpacing = \"wide\"\n").unwrap();
        assert!(matches!(loader(&dir).load(), Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_config_dir_name() {
        assert!(config_path().ends_with("config.toml"));
    }
}
