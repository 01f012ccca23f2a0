use serde::{Deserialize, Serialize};

use crate::BiometricError;

/// Configuration for the platform biometric prompt.
///
/// The value is immutable once built; construct a new one per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    allow_device_credential_fallback: bool,
    #[serde(default = "default_confirmation")]
    require_explicit_confirmation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    negative_button_text: Option<String>,
}

const fn default_confirmation() -> bool {
    true
}

impl PromptConfig {
    /// Create a prompt with the given title.
    ///
    /// Device credential fallback starts disabled and explicit confirmation starts required.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            allow_device_credential_fallback: false,
            require_explicit_confirmation: true,
            negative_button_text: None,
        }
    }

    /// Set the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Allow the device PIN, pattern or password in place of a biometric.
    #[must_use]
    pub const fn allow_device_credential(mut self, allow: bool) -> Self {
        self.allow_device_credential_fallback = allow;
        self
    }

    /// Require the user to confirm after a passive biometric (e.g. face) is recognized.
    #[must_use]
    pub const fn require_confirmation(mut self, require: bool) -> Self {
        self.require_explicit_confirmation = require;
        self
    }

    /// Set the text of the negative (cancel) button.
    #[must_use]
    pub fn with_negative_button(mut self, text: impl Into<String>) -> Self {
        self.negative_button_text = Some(text.into());
        self
    }

    /// Prompt title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prompt subtitle, empty when unset.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Prompt description, empty when unset.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the device credential may be used instead of a biometric.
    #[must_use]
    pub const fn allows_device_credential(&self) -> bool {
        self.allow_device_credential_fallback
    }

    /// Whether explicit confirmation is required.
    #[must_use]
    pub const fn requires_confirmation(&self) -> bool {
        self.require_explicit_confirmation
    }

    /// Negative button text, if any.
    #[must_use]
    pub fn negative_button_text(&self) -> Option<&str> {
        self.negative_button_text.as_deref()
    }

    /// Check the preconditions the platform prompt builder enforces.
    ///
    /// # Errors
    /// Returns [`BiometricError::InvalidPrompt`] if the title is blank, if a negative
    /// button is missing while device credential fallback is disabled, or if one is
    /// set while the fallback is enabled.
    pub fn validate(&self) -> Result<(), BiometricError> {
        if self.title.trim().is_empty() {
            return Err(BiometricError::InvalidPrompt("title must not be empty".into()));
        }
        match (
            self.allow_device_credential_fallback,
            self.negative_button_text.as_deref(),
        ) {
            (false, None) => Err(BiometricError::InvalidPrompt(
                "negative button text is required without device credential fallback".into(),
            )),
            (false, Some(text)) if text.trim().is_empty() => Err(BiometricError::InvalidPrompt(
                "negative button text must not be empty".into(),
            )),
            (true, Some(_)) => Err(BiometricError::InvalidPrompt(
                "negative button cannot be combined with device credential fallback".into(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_every_field() {
        let prompt = PromptConfig::new("Sign in")
            .with_subtitle("Welcome back")
            .with_description("Touch the sensor")
            .allow_device_credential(true)
            .require_confirmation(false);

        assert_eq!(prompt.title(), "Sign in");
        assert_eq!(prompt.subtitle(), "Welcome back");
        assert_eq!(prompt.description(), "Touch the sensor");
        assert!(prompt.allows_device_credential());
        assert!(!prompt.requires_confirmation());
        assert_eq!(prompt.negative_button_text(), None);
        assert!(prompt.validate().is_ok());
    }

    #[test]
    fn validation_follows_platform_builder_rules() {
        assert!(PromptConfig::new("  ").allow_device_credential(true).validate().is_err());
        assert!(PromptConfig::new("Sign in").validate().is_err());
        assert!(
            PromptConfig::new("Sign in")
                .with_negative_button("Cancel")
                .validate()
                .is_ok()
        );
        assert!(
            PromptConfig::new("Sign in")
                .allow_device_credential(true)
                .with_negative_button("Cancel")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let prompt: PromptConfig =
            serde_json::from_str(r#"{"title":"Unlock","allowDeviceCredentialFallback":true}"#)
                .unwrap();
        assert_eq!(prompt, PromptConfig::new("Unlock").allow_device_credential(true));
    }
}
