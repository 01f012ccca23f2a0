use std::fmt;

use crate::BiometricError;

/// Error code reported by the platform biometric prompt.
///
/// Values follow `androidx.biometric.BiometricPrompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// Hardware is unavailable.
    pub const HW_UNAVAILABLE: Self = Self(1);
    /// The sensor could not process the current image.
    pub const UNABLE_TO_PROCESS: Self = Self(2);
    /// The attempt timed out.
    pub const TIMEOUT: Self = Self(3);
    /// Not enough storage to complete the operation.
    pub const NO_SPACE: Self = Self(4);
    /// The operation was canceled by the system.
    pub const CANCELED: Self = Self(5);
    /// Too many attempts; locked out temporarily.
    pub const LOCKOUT: Self = Self(7);
    /// Vendor specific or backend failure.
    pub const VENDOR: Self = Self(8);
    /// Locked out until the user unlocks with a strong credential.
    pub const LOCKOUT_PERMANENT: Self = Self(9);
    /// The user canceled the operation.
    pub const USER_CANCELED: Self = Self(10);
    /// No biometric is enrolled.
    pub const NO_BIOMETRICS: Self = Self(11);
    /// The device has no biometric hardware.
    pub const HW_NOT_PRESENT: Self = Self(12);
    /// The user pressed the negative button.
    pub const NEGATIVE_BUTTON: Self = Self(13);
    /// No device credential is set up.
    pub const NO_DEVICE_CREDENTIAL: Self = Self(14);

    /// System cancellation, user cancellation and the negative button all count as cancellation.
    #[must_use]
    pub const fn is_cancellation(self) -> bool {
        matches!(
            self,
            Self::CANCELED | Self::USER_CANCELED | Self::NEGATIVE_BUTTON
        )
    }

    /// Fallback message for a code whose platform message was empty.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::HW_UNAVAILABLE => "biometric hardware is unavailable",
            Self::UNABLE_TO_PROCESS => "unable to process the biometric sample",
            Self::TIMEOUT => "authentication timed out",
            Self::NO_SPACE => "not enough storage to complete authentication",
            Self::CANCELED => "authentication was canceled by the system",
            Self::LOCKOUT => "too many attempts, try again later",
            Self::LOCKOUT_PERMANENT => "too many attempts, biometrics are locked",
            Self::USER_CANCELED => "authentication was canceled by the user",
            Self::NO_BIOMETRICS => "no biometrics are enrolled",
            Self::HW_NOT_PRESENT => "no biometric hardware present",
            Self::NEGATIVE_BUTTON => "negative button pressed",
            Self::NO_DEVICE_CREDENTIAL => "no device credential is set up",
            _ => "biometric authentication error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw callback from the platform prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user was authenticated.
    Succeeded,
    /// An unrecoverable error ended the attempt.
    Error {
        /// Platform error code.
        code: ErrorCode,
        /// Platform supplied message.
        message: String,
    },
    /// A biometric sample was rejected; the prompt keeps accepting samples.
    Failed,
}

/// How an [`AuthOutcome::Error`] should be read by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The system, the user or the negative button canceled the prompt.
    Canceled,
    /// Any other platform error.
    Platform,
}

/// Outcome of an authentication attempt, delivered to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Verification succeeded. Terminal.
    Success,
    /// The attempt ended with an error. Terminal.
    Error {
        /// Platform error code.
        code: ErrorCode,
        /// Human readable message, never empty.
        message: String,
    },
    /// A sample was rejected. The attempt remains open.
    Failed,
}

impl AuthOutcome {
    /// Classify a raw platform callback.
    #[must_use]
    pub fn classify(event: PlatformEvent) -> Self {
        match event {
            PlatformEvent::Succeeded => Self::Success,
            PlatformEvent::Failed => Self::Failed,
            PlatformEvent::Error { code, message } => {
                let message = if message.trim().is_empty() {
                    code.default_message().to_owned()
                } else {
                    message
                };
                Self::Error { code, message }
            }
        }
    }

    /// Whether this outcome ends the attempt.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// The kind of error, for [`Self::Error`] only.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Error { code, .. } if code.is_cancellation() => Some(ErrorKind::Canceled),
            Self::Error { .. } => Some(ErrorKind::Platform),
            _ => None,
        }
    }

    /// Convert a non-success outcome into the matching [`BiometricError`].
    #[must_use]
    pub fn into_error(self) -> Option<BiometricError> {
        match self {
            Self::Success => None,
            Self::Failed => Some(BiometricError::Rejected),
            Self::Error { code, message } if code.is_cancellation() => {
                Some(BiometricError::Canceled { code, message })
            }
            Self::Error { code, message } => Some(BiometricError::Platform { code, message }),
        }
    }
}

impl From<PlatformEvent> for AuthOutcome {
    fn from(event: PlatformEvent) -> Self {
        Self::classify(event)
    }
}
