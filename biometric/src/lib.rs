//! Biometric authentication gate.
//!
//! [`BiometricGate`] answers two questions for a caller: can this device
//! authenticate with biometrics right now, and did the user just do so. The
//! platform work is done by a [`BiometricProvider`]; the gate classifies the
//! platform's callbacks into a single [`AuthOutcome`] stream and guarantees
//! that:
//!
//! - outcomes are never delivered from inside [`BiometricGate::start_authentication`],
//! - any number of [`AuthOutcome::Failed`] precede exactly one terminal outcome,
//! - nothing is delivered after the terminal outcome or after [`AuthAttempt::cancel`].
//!
//! Delivery happens on the caller's event loop, so the gate must be used from
//! inside a [`tokio::task::LocalSet`].
//!
//! ```no_run
//! use biogate_biometric::{AuthOutcome, BiometricGate, PromptConfig, sys::SystemProvider};
//!
//! # async fn run() {
//! let gate = BiometricGate::new(SystemProvider);
//! let prompt = PromptConfig::new("Sign in").allow_device_credential(true);
//! match gate.authenticate_if_available(prompt, |outcome| {
//!     if outcome == AuthOutcome::Success {
//!         println!("welcome");
//!     }
//! }) {
//!     Ok(attempt) => attempt.finished().await,
//!     Err(e) => println!("{e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]

mod availability;
mod error;
mod gate;
mod outcome;
mod prompt;

/// Platform-specific implementations.
pub mod sys;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use availability::{AvailabilityStatus, CapabilityCode};
pub use error::BiometricError;
pub use gate::{AttemptState, AuthAttempt, BiometricGate, BiometricProvider, PlatformCallback};
pub use outcome::{AuthOutcome, ErrorCode, ErrorKind, PlatformEvent};
pub use prompt::PromptConfig;
