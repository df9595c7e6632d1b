//! Tool configuration module.
//!
//! Handles loading and validating `snapfilter.toml`. Configuration is
//! sparse: every option has a default, and a config file only needs to
//! name the values it overrides. Unknown keys are rejected to catch typos
//! early.
//!
//! ## Config File Location
//!
//! `snapfilter.toml` in the working directory is picked up automatically;
//! `--config PATH` points anywhere else.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # File name for exported artifacts (inside the --output directory)
//! output_filename = "filtered-image.png"
//!
//! # Catalog filter applied when no --filter/--expr is given
//! default_filter = "Normal"
//! ```

use crate::filter::catalog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the implicitly loaded config file.
pub const CONFIG_FILE_NAME: &str = "snapfilter.toml";

/// Tool configuration loaded from `snapfilter.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// File name for exported artifacts.
    pub output_filename: String,
    /// Catalog filter label applied when the CLI names none.
    pub default_filter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            output_filename: "filtered-image.png".to_string(),
            default_filter: catalog::identity().label.to_string(),
        }
    }
}

impl ToolConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_filename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_filename must not be empty".into(),
            ));
        }
        if self.output_filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "output_filename '{}' must be a bare file name (use --output for the directory)",
                self.output_filename
            )));
        }
        if catalog::find(&self.default_filter).is_none() {
            let labels: Vec<&str> = catalog::PRESETS.iter().map(|p| p.label).collect();
            return Err(ConfigError::Validation(format!(
                "default_filter '{}' is not in the catalog. Available: {labels:?}",
                self.default_filter
            )));
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ToolConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist and parse. With no explicit path, a
    /// `snapfilter.toml` in the working directory is used when present;
    /// otherwise stock defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new(CONFIG_FILE_NAME);
                if implicit.exists() {
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// A documented stock config, suitable for writing out as a starting point.
pub fn stock_config_toml() -> String {
    let defaults = ToolConfig::default();
    format!(
        "\
# snapfilter configuration. All options are optional; defaults shown.

# File name for exported artifacts (inside the --output directory)
output_filename = \"{}\"

# Catalog filter applied when no --filter/--expr is given
default_filter = \"{}\"
",
        defaults.output_filename, defaults.default_filter
    )
}
