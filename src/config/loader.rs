//! Configuration loading utilities
//!
//! Provides helper functions for loading configuration from various sources
//! with proper error handling and validation.

use crate::{
    Result,
    config::{CliOverrides, Settings},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name looked up in the working directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loader with multiple source support
#[derive(Debug)]
pub struct ConfigLoader {
    /// Default settings
    defaults: Settings,
}

impl ConfigLoader {
    /// Create new configuration loader
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Load configuration with precedence order:
    /// 1. Command line arguments (highest priority)
    /// 2. Environment variables
    /// 3. Configuration file
    /// 4. Default values (lowest priority)
    pub fn load(&self, config_file: Option<&Path>, overrides: &CliOverrides) -> Result<Settings> {
        self.load_with_vars(config_file, overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`] with an explicit variable lookup
    pub fn load_with_vars<F>(
        &self,
        config_file: Option<&Path>,
        overrides: &CliOverrides,
        lookup: F,
    ) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading configuration");
        let mut settings = self.defaults.clone();

        match config_file {
            Some(path) if path.exists() => {
                debug!("Loading configuration from file: {:?}", path);
                settings = Settings::from_file(path)?;
            }
            Some(path) => warn!("Configuration file not found: {:?}, using defaults", path),
            None => warn!("No configuration file given, using defaults"),
        }

        debug!("Applying environment variable overrides");
        settings = settings.merge_with_vars(lookup)?;

        debug!("Applying command line overrides");
        settings = settings.apply_overrides(overrides);

        settings.validate()?;

        info!("Configuration loaded and validated");
        Ok(settings)
    }

    /// `./config.toml` when present, otherwise the per-user config file
    pub fn default_config_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        dirs::config_dir()
            .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(CONFIG_FILE_NAME))
            .unwrap_or(local)
    }

    /// Get default configuration
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
