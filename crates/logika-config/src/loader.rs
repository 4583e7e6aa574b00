//! Loading and saving settings files.
//!
//! Settings persist as TOML by default; JSON and (with the `yaml` feature)
//! YAML are selected by file extension. Saving validates first, so an
//! on-disk settings file is always a fully valid snapshot.
//!
//! # Example
//!
//! ```rust,no_run
//! use logika_config::ConfigLoader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::load_or_default(ConfigLoader::default_path()).await?;
//! assert!(config.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::VerificationConfig;
use crate::error::{ConfigError, ConfigResult};

/// Loads and saves [`VerificationConfig`] files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default settings file location, following OS conventions:
    /// `<user config dir>/sireum/logika.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sireum")
            .join("logika.toml")
    }

    /// Load settings from a file, validating the result.
    pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<VerificationConfig> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let config = Self::parse(path, &contents)?;
        debug!(path = %path.display(), "loaded settings file");
        config.validated()
    }

    /// Load settings synchronously (for non-async contexts).
    pub fn load_sync(path: impl AsRef<Path>) -> ConfigResult<VerificationConfig> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(path, &contents)?;
        config.validated()
    }

    /// Load settings from a file, or return the defaults when the file does
    /// not exist yet.
    pub async fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<VerificationConfig> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "no settings file, using defaults");
            return Ok(VerificationConfig::default());
        }
        Self::load_from_file(path).await
    }

    /// Save settings to a file, creating parent directories as needed.
    ///
    /// Fails without touching the file when any field is invalid.
    pub async fn save_to_file(
        config: &VerificationConfig,
        path: impl AsRef<Path>,
    ) -> ConfigResult<()> {
        let path = path.as_ref();
        let contents = Self::render(path, config)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
        info!(path = %path.display(), "saved settings file");
        Ok(())
    }

    /// Save settings synchronously (for non-async contexts).
    pub fn save_sync(config: &VerificationConfig, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let contents = Self::render(path, config)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn parse(path: &Path, contents: &str) -> ConfigResult<VerificationConfig> {
        match extension(path) {
            Some("toml") => Ok(toml::from_str(contents)?),
            Some("json") => Ok(serde_json::from_str(contents)?),
            #[cfg(feature = "yaml")]
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(contents)?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn render(path: &Path, config: &VerificationConfig) -> ConfigResult<String> {
        if let Err(errors) = config.validate() {
            return Err(ConfigError::Validation(errors));
        }
        match extension(path) {
            Some("toml") => Ok(toml::to_string_pretty(config)?),
            Some("json") => Ok(serde_json::to_string_pretty(config)?),
            #[cfg(feature = "yaml")]
            Some("yaml") | Some("yml") => Ok(serde_yaml::to_string(config)?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("logika.toml");
        let config = ConfigLoader::load_or_default(&path).await.unwrap();
        assert_eq!(config, VerificationConfig::default());
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("dir").join("logika.toml");
        let config = VerificationConfig::default();
        ConfigLoader::save_to_file(&config, &path).await.unwrap();
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn invalid_settings_are_not_written() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("logika.toml");

        let mut config = VerificationConfig::default();
        config.smt2.timeout_ms = 100;
        let err = ConfigLoader::save_to_file(&config, &path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(!path.exists());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("logika.ini");
        std::fs::write(&path, "x = 1").expect("write");
        assert!(matches!(
            ConfigLoader::load_sync(&path),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn default_path_ends_with_logika_toml() {
        let path = ConfigLoader::default_path();
        assert!(path.ends_with("sireum/logika.toml"));
    }
}
