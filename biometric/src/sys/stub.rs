//! Fallback for platforms without a biometric backend.

use crate::{BiometricProvider, CapabilityCode, ErrorCode, PlatformCallback, PromptConfig};

/// Provider that reports no biometric hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProvider;

impl BiometricProvider for SystemProvider {
    fn query_capability(&self) -> CapabilityCode {
        CapabilityCode::NO_HARDWARE
    }

    fn authenticate(&self, _config: &PromptConfig, callback: PlatformCallback) {
        callback.error(
            ErrorCode::HW_NOT_PRESENT,
            "Biometric authentication is not supported on this platform",
        );
    }
}

#[cfg(test)]
mod tests {
    use async_channel::unbounded;

    use super::SystemProvider;
    use crate::{
        AvailabilityStatus, BiometricError, BiometricGate, BiometricProvider, CapabilityCode,
        ErrorCode, PlatformCallback, PlatformEvent, PromptConfig,
    };

    #[test]
    fn reports_no_hardware() {
        assert_eq!(SystemProvider.query_capability(), CapabilityCode::NO_HARDWARE);
        assert_eq!(
            BiometricGate::new(SystemProvider).check_availability(),
            AvailabilityStatus::NoHardware
        );
    }

    #[test]
    fn authenticate_reports_missing_hardware() {
        let (sender, receiver) = unbounded();
        let config = PromptConfig::new("Title").allow_device_credential(true);
        SystemProvider.authenticate(&config, PlatformCallback::new(sender));

        let event = receiver.try_recv().unwrap();
        assert!(matches!(
            event,
            PlatformEvent::Error { code: ErrorCode::HW_NOT_PRESENT, ref message } if !message.is_empty()
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn authenticate_if_available_never_prompts() {
        let gate = BiometricGate::new(SystemProvider);
        let config = PromptConfig::new("Title").allow_device_credential(true);
        let result = gate.authenticate_if_available(config, |_| {});
        assert!(matches!(
            result,
            Err(BiometricError::Unavailable(AvailabilityStatus::NoHardware))
        ));
    }
}
