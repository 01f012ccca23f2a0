//! Windows Hello backend over `UserConsentVerifier`.

use log::{error, warn};
use windows::Security::Credentials::UI::{
    UserConsentVerificationResult, UserConsentVerifier, UserConsentVerifierAvailability,
};
use windows::core::HSTRING;

use crate::{BiometricProvider, CapabilityCode, ErrorCode, PlatformCallback, PromptConfig};

/// Provider backed by Windows Hello.
///
/// Windows Hello retries rejected samples internally, so this backend never
/// reports `Failed`; it only reports the final verification result. The
/// verification itself is awaited on the current `LocalSet`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProvider;

impl BiometricProvider for SystemProvider {
    /// Blocks the calling thread until Windows reports availability.
    fn query_capability(&self) -> CapabilityCode {
        match UserConsentVerifier::CheckAvailabilityAsync().and_then(|op| op.get()) {
            Ok(availability) => capability_code(availability),
            Err(e) => {
                warn!("CheckAvailabilityAsync failed: {e}");
                CapabilityCode::STATUS_UNKNOWN
            }
        }
    }

    fn authenticate(&self, config: &PromptConfig, callback: PlatformCallback) {
        let message = HSTRING::from(prompt_message(config));
        tokio::task::spawn_local(async move {
            let result = match UserConsentVerifier::RequestVerificationAsync(&message) {
                Ok(op) => op.await,
                Err(e) => Err(e),
            };
            match result {
                Ok(UserConsentVerificationResult::Verified) => callback.succeeded(),
                Ok(other) => {
                    let (code, text) = verification_error(other);
                    callback.error(code, text);
                }
                Err(e) => {
                    error!("RequestVerificationAsync failed: {e}");
                    callback.error(ErrorCode::VENDOR, e.to_string());
                }
            }
        });
    }
}

/// Windows Hello shows one line of text; fold the prompt fields into it.
fn prompt_message(config: &PromptConfig) -> String {
    [config.title(), config.subtitle(), config.description()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn capability_code(availability: UserConsentVerifierAvailability) -> CapabilityCode {
    match availability {
        UserConsentVerifierAvailability::Available => CapabilityCode::SUCCESS,
        UserConsentVerifierAvailability::DeviceNotPresent => CapabilityCode::NO_HARDWARE,
        UserConsentVerifierAvailability::NotConfiguredForUser => CapabilityCode::NONE_ENROLLED,
        UserConsentVerifierAvailability::DeviceBusy => CapabilityCode::HW_UNAVAILABLE,
        // DisabledByPolicy and anything newer
        _ => CapabilityCode::UNSUPPORTED,
    }
}

fn verification_error(result: UserConsentVerificationResult) -> (ErrorCode, &'static str) {
    match result {
        UserConsentVerificationResult::Canceled => {
            (ErrorCode::USER_CANCELED, "Verification canceled")
        }
        UserConsentVerificationResult::RetriesExhausted => {
            (ErrorCode::LOCKOUT, "Retries exhausted")
        }
        UserConsentVerificationResult::DeviceBusy => (ErrorCode::HW_UNAVAILABLE, "Device busy"),
        UserConsentVerificationResult::DeviceNotPresent => {
            (ErrorCode::HW_NOT_PRESENT, "Device not present")
        }
        UserConsentVerificationResult::NotConfiguredForUser => {
            (ErrorCode::NO_BIOMETRICS, "Windows Hello is not configured")
        }
        UserConsentVerificationResult::DisabledByPolicy => {
            (ErrorCode::HW_UNAVAILABLE, "Disabled by policy")
        }
        _ => (ErrorCode::VENDOR, "Verification failed"),
    }
}
