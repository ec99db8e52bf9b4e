//! Editor configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("text_name must not be empty")]
    EmptyTextName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name of the shared text inside the `yrs` document.
    pub text_name: String,
    /// Clamp a reconciled caret to the end of its run. Off by default, in
    /// which case a position past the document end yields an intra-run
    /// offset beyond the last run's length and the host must cope.
    pub clamp_caret_to_run: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            text_name: "text".to_string(),
            clamp_caret_to_run: false,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text_name.is_empty() {
            return Err(ConfigError::EmptyTextName);
        }
        Ok(())
    }
}
