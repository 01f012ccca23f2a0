use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use biogate_biometric::{
    AuthAttempt, AuthOutcome, AvailabilityStatus, BiometricError, BiometricGate,
    BiometricProvider,
};
use log::info;
use tokio::sync::watch;

use crate::LoginConfig;

/// Moves the app past the login screen.
pub trait Navigator {
    /// Show the main screen.
    fn navigate_to_main(&self);
}

impl<F: Fn()> Navigator for F {
    fn navigate_to_main(&self) {
        self();
    }
}

/// What the login screen is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    /// Not started.
    Idle,
    /// Biometrics cannot be used; only the manual path remains.
    Unavailable(AvailabilityStatus),
    /// The biometric prompt is up.
    Authenticating,
    /// The last sample was rejected; the prompt is still up.
    Rejected,
    /// The user was verified and sent to the main screen.
    Authenticated,
    /// The prompt ended with an error; the screen stays.
    Dismissed(BiometricError),
}

impl LoginStatus {
    /// Whether nothing more will happen without user action.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::Authenticated | Self::Dismissed(_)
        )
    }
}

/// The login screen: checks biometrics on start and navigates on success.
pub struct LoginScreen<P, N> {
    gate: BiometricGate<P>,
    navigator: Rc<N>,
    config: LoginConfig,
    status: Rc<watch::Sender<LoginStatus>>,
    attempt: RefCell<Option<AuthAttempt>>,
}

impl<P, N> fmt::Debug for LoginScreen<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginScreen")
            .field("config", &self.config)
            .field("status", &*self.status.borrow())
            .finish_non_exhaustive()
    }
}

impl<P, N> LoginScreen<P, N>
where
    P: BiometricProvider + 'static,
    N: Navigator + 'static,
{
    /// Create an idle screen.
    pub fn new(gate: BiometricGate<P>, navigator: N, config: LoginConfig) -> Self {
        let (status, _) = watch::channel(LoginStatus::Idle);
        Self {
            gate,
            navigator: Rc::new(navigator),
            config,
            status: Rc::new(status),
            attempt: RefCell::new(None),
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> LoginStatus {
        self.status.borrow().clone()
    }

    /// Watch status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginStatus> {
        self.status.subscribe()
    }

    /// Check biometrics and, if available, show the prompt.
    ///
    /// A prompt still up from an earlier call is dismissed first.
    ///
    /// # Panics
    /// Panics if called outside a `LocalSet`.
    pub fn start(&self) -> LoginStatus {
        self.dismiss();
        let status = Rc::clone(&self.status);
        let navigator = Rc::clone(&self.navigator);
        let on_outcome = move |outcome: AuthOutcome| match outcome {
            AuthOutcome::Success => {
                status.send_replace(LoginStatus::Authenticated);
                info!("navigating to main screen");
                navigator.navigate_to_main();
            }
            AuthOutcome::Failed => {
                status.send_replace(LoginStatus::Rejected);
            }
            error @ AuthOutcome::Error { .. } => {
                if let Some(error) = error.into_error() {
                    status.send_replace(LoginStatus::Dismissed(error));
                }
            }
        };

        let next = match self
            .gate
            .authenticate_if_available(self.config.prompt.clone(), on_outcome)
        {
            Ok(attempt) => {
                *self.attempt.borrow_mut() = Some(attempt);
                LoginStatus::Authenticating
            }
            Err(BiometricError::Unavailable(availability)) => {
                info!("staying on login screen: {availability}");
                LoginStatus::Unavailable(availability)
            }
            Err(other) => LoginStatus::Dismissed(other),
        };
        self.status.send_replace(next.clone());
        next
    }

    /// Start again after a dismissed prompt. Does nothing while a prompt is up.
    ///
    /// # Panics
    /// Panics if called outside a `LocalSet`.
    pub fn retry(&self) -> LoginStatus {
        let active = self
            .attempt
            .borrow()
            .as_ref()
            .is_some_and(AuthAttempt::is_active);
        if active {
            return self.status();
        }
        self.start()
    }

    /// Skip biometrics and go straight to the main screen.
    pub fn continue_without_biometrics(&self) {
        self.dismiss();
        info!("continuing without biometrics");
        self.navigator.navigate_to_main();
    }

    /// Abandon any prompt in progress and return to [`LoginStatus::Idle`].
    pub fn dismiss(&self) {
        let Some(attempt) = self.attempt.borrow_mut().take() else {
            return;
        };
        if attempt.is_active() {
            attempt.cancel();
            self.status.send_replace(LoginStatus::Idle);
        }
    }

    /// Wait for outcome delivery of the current attempt to stop.
    ///
    /// The attempt stays with the screen while waiting, so `retry` and
    /// `dismiss` keep working and a dismissal ends the wait.
    pub async fn finished(&self) {
        let done = self.attempt.borrow().as_ref().map(AuthAttempt::finished);
        if let Some(done) = done {
            done.await;
        }
    }
}
