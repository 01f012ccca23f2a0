//! Biometric login screen.
//!
//! On start the screen asks the [`BiometricGate`](biogate_biometric::BiometricGate)
//! whether biometrics are usable. If so it shows the prompt and, once the user
//! is verified, hands control to a [`Navigator`]. Otherwise it stays put and
//! leaves the manual path ([`LoginScreen::continue_without_biometrics`]) open.

#![warn(missing_docs)]

mod config;
mod error;
mod screen;

pub use config::LoginConfig;
pub use error::LoginError;
pub use screen::{LoginScreen, LoginStatus, Navigator};
