use thiserror::Error;

use crate::{AvailabilityStatus, ErrorCode};

/// Errors that can occur during biometric authentication.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiometricError {
    /// Biometric authentication cannot be attempted on this device.
    #[error("Biometric authentication is not available: {0}")]
    Unavailable(AvailabilityStatus),

    /// The system, the user or the negative button canceled the prompt.
    #[error("Authentication canceled ({code}): {message}")]
    Canceled {
        /// Platform error code.
        code: ErrorCode,
        /// Platform message.
        message: String,
    },

    /// A biometric sample was rejected. The prompt may still accept more samples.
    #[error("Biometric sample was not recognized")]
    Rejected,

    /// Any other error reported by the platform.
    #[error("Platform error ({code}): {message}")]
    Platform {
        /// Platform error code.
        code: ErrorCode,
        /// Platform message.
        message: String,
    },

    /// The prompt configuration breaks a platform precondition.
    #[error("Invalid prompt configuration: {0}")]
    InvalidPrompt(String),

    /// The attempt was released or canceled before reaching a result.
    #[error("Authentication attempt ended without a result")]
    Interrupted,
}

impl BiometricError {
    /// Whether the error came from a cancellation.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }
}
