//! # biogate
//!
//! Gate a login behind the device's biometric prompt.
//!
//! ## Features
//!
//! - `biometric` (default): the [`BiometricGate`](biometric::BiometricGate), its data
//!   model and the platform backends.
//! - `login`: the login screen flow that navigates on a verified user.
//! - `mock`: a scripted provider for tests.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! biogate = { version = "0.1", features = ["login"] }
//! ```
//!
//! ```rust,no_run
//! use biogate::biometric::{AvailabilityStatus, BiometricGate, sys::SystemProvider};
//!
//! let gate = BiometricGate::new(SystemProvider);
//! if gate.check_availability() == AvailabilityStatus::Available {
//!     println!("biometrics ready");
//! }
//! ```

#[cfg(feature = "biometric")]
pub use biogate_biometric as biometric;

#[cfg(feature = "login")]
pub use biogate_login as login;
