use biogate_biometric::BiometricError;
use thiserror::Error;

/// Errors raised while setting up the login screen.
#[derive(Error, Debug)]
pub enum LoginError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for a [`LoginConfig`](crate::LoginConfig).
    #[error("Malformed login config: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured prompt cannot be shown by the platform.
    #[error(transparent)]
    InvalidPrompt(#[from] BiometricError),
}
