use std::path::Path;

use biogate_biometric::PromptConfig;
use serde::{Deserialize, Serialize};

use crate::LoginError;

/// Settings for the login screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Prompt shown for every attempt.
    pub prompt: PromptConfig,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            prompt: PromptConfig::new("Title")
                .with_subtitle("Subtitle")
                .with_description("Description")
                .allow_device_credential(true)
                .require_confirmation(true),
        }
    }
}

impl LoginConfig {
    /// Create a config around a prompt.
    #[must_use]
    pub const fn new(prompt: PromptConfig) -> Self {
        Self { prompt }
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Returns [`LoginError::Json`] for malformed input and
    /// [`LoginError::InvalidPrompt`] if the prompt breaks a platform rule.
    pub fn from_json(json: &str) -> Result<Self, LoginError> {
        let config: Self = serde_json::from_str(json)?;
        config.prompt.validate()?;
        Ok(config)
    }

    /// Read a JSON config from disk.
    ///
    /// # Errors
    /// Returns [`LoginError::Io`] if the file cannot be read, otherwise as [`Self::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoginError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
