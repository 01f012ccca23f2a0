use std::fmt;

/// Raw capability code reported by the platform biometric manager.
///
/// Values follow `androidx.biometric.BiometricManager`. Backends for other
/// platforms translate their native availability onto these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityCode(pub i32);

impl CapabilityCode {
    /// Biometrics can be used right now.
    pub const SUCCESS: Self = Self(0);
    /// Hardware exists but is currently unavailable.
    pub const HW_UNAVAILABLE: Self = Self(1);
    /// No biometric credential is enrolled.
    pub const NONE_ENROLLED: Self = Self(11);
    /// The device has no biometric hardware.
    pub const NO_HARDWARE: Self = Self(12);
    /// A security vulnerability was found and an update is required.
    pub const SECURITY_UPDATE_REQUIRED: Self = Self(15);
    /// The requested authenticator combination is unsupported.
    pub const UNSUPPORTED: Self = Self(-2);
    /// The platform could not determine availability.
    pub const STATUS_UNKNOWN: Self = Self(-1);
}

impl fmt::Display for CapabilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether biometric authentication can be attempted on this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    /// Biometric authentication can be attempted.
    Available,
    /// No biometric features exist on this device.
    NoHardware,
    /// Biometric features exist but are currently unavailable.
    HardwareUnavailable,
    /// The user has not enrolled any biometric credential.
    NoneEnrolled,
    /// Any code the gate does not recognize.
    Unknown,
}

impl AvailabilityStatus {
    /// Map a raw platform code onto a status. Unrecognized codes become [`Self::Unknown`].
    #[must_use]
    pub const fn from_code(code: CapabilityCode) -> Self {
        match code {
            CapabilityCode::SUCCESS => Self::Available,
            CapabilityCode::NO_HARDWARE => Self::NoHardware,
            CapabilityCode::HW_UNAVAILABLE => Self::HardwareUnavailable,
            CapabilityCode::NONE_ENROLLED => Self::NoneEnrolled,
            _ => Self::Unknown,
        }
    }

    /// Returns true only for [`Self::Available`].
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<CapabilityCode> for AvailabilityStatus {
    fn from(code: CapabilityCode) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Available => "app can authenticate using biometrics",
            Self::NoHardware => "no biometric features available on this device",
            Self::HardwareUnavailable => "biometric features are currently unavailable",
            Self::NoneEnrolled => "no biometric credentials are enrolled",
            Self::Unknown => "biometric availability is unknown",
        };
        f.write_str(text)
    }
}
