//! Configuration loading from files.
//!
//! This module handles reading and parsing configuration files.

use std::path::{Path, PathBuf};

use super::{ConfigError, SiteConfig};

/// Config file looked for when none is named on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "quire.yaml";

impl SiteConfig {
    /// Load the config from the command line argument.
    ///
    /// With no argument, `quire.yaml` in the current directory is used if it
    /// exists and built-in defaults otherwise. A file named explicitly must
    /// exist.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let required = config_file.is_some();
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        if !config_file.exists() {
            if required {
                return Err(ConfigError::NotFound(config_file));
            }
            tracing::debug!(path = %config_file.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path.
    ///
    /// Relative directories in the file are resolved against the file's
    /// own directory.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml))
            .build()?
            .try_deserialize::<SiteConfig>()?;

        tracing::debug!(path = %path.display(), "loaded config file");

        Ok(config.relative_to(&base_path_from_config(path)))
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
