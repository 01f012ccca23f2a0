use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use async_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};
use tokio::sync::watch;

use crate::{
    AuthOutcome, AvailabilityStatus, BiometricError, CapabilityCode, ErrorCode, PlatformEvent,
    PromptConfig,
};

/// Access to the platform biometric subsystem.
///
/// The gate never talks to the platform directly; it is handed a provider at
/// construction so hosts and tests can substitute their own.
pub trait BiometricProvider {
    /// Query the current biometric capability. Must not show any UI.
    fn query_capability(&self) -> CapabilityCode;

    /// Show the platform prompt described by `config`.
    ///
    /// The provider reports every platform callback through `callback`, from any
    /// thread, at any time after this call.
    fn authenticate(&self, config: &PromptConfig, callback: PlatformCallback);

    /// Dismiss the prompt of the current attempt, if the platform supports it.
    fn cancel_authentication(&self) {}
}

impl<P: BiometricProvider + ?Sized> BiometricProvider for Rc<P> {
    fn query_capability(&self) -> CapabilityCode {
        (**self).query_capability()
    }

    fn authenticate(&self, config: &PromptConfig, callback: PlatformCallback) {
        (**self).authenticate(config, callback);
    }

    fn cancel_authentication(&self) {
        (**self).cancel_authentication();
    }
}

/// Sink for platform callbacks of a single attempt.
///
/// Cheap to clone and safe to move across threads. Events sent after the
/// attempt has ended are dropped.
#[derive(Debug, Clone)]
pub struct PlatformCallback {
    sender: Sender<PlatformEvent>,
}

impl PlatformCallback {
    pub(crate) const fn new(sender: Sender<PlatformEvent>) -> Self {
        Self { sender }
    }

    /// Report a successful verification.
    pub fn succeeded(&self) {
        self.send(PlatformEvent::Succeeded);
    }

    /// Report an unrecoverable error.
    pub fn error(&self, code: ErrorCode, message: impl Into<String>) {
        self.send(PlatformEvent::Error {
            code,
            message: message.into(),
        });
    }

    /// Report a rejected biometric sample.
    pub fn failed(&self) {
        self.send(PlatformEvent::Failed);
    }

    /// Forward a raw event.
    pub fn send(&self, event: PlatformEvent) {
        if let Err(err) = self.sender.try_send(event) {
            debug!("dropping biometric event for a closed attempt: {:?}", err.into_inner());
        }
    }

    /// Whether the attempt has stopped listening.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Lifecycle of one authentication attempt.
///
/// Before [`BiometricGate::start_authentication`] there is no attempt at all,
/// so every handle starts out [`AttemptState::Authenticating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptState {
    /// Waiting for the platform. Rejected samples keep the attempt here.
    Authenticating,
    /// Ended with [`AuthOutcome::Success`].
    Succeeded,
    /// Ended with [`AuthOutcome::Error`].
    Errored,
    /// Abandoned by the caller.
    Canceled,
}

impl AttemptState {
    /// Whether the attempt has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Authenticating)
    }
}

/// Handle to an attempt started by [`BiometricGate::start_authentication`].
///
/// Dropping the handle does not cancel the attempt.
pub struct AuthAttempt {
    state: Rc<Cell<AttemptState>>,
    receiver: Receiver<PlatformEvent>,
    canceller: Rc<dyn Fn()>,
    delivered: watch::Receiver<bool>,
}

impl fmt::Debug for AuthAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthAttempt")
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

impl AuthAttempt {
    /// Current state of the attempt.
    #[must_use]
    pub fn state(&self) -> AttemptState {
        self.state.get()
    }

    /// Whether outcomes may still be delivered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.state.get().is_terminal()
    }

    /// Abandon the attempt.
    ///
    /// No outcome is delivered after this returns. The provider is asked to
    /// dismiss its prompt. Has no effect on an attempt that already ended.
    pub fn cancel(&self) {
        if !self.is_active() {
            return;
        }
        info!("biometric attempt canceled by caller");
        self.state.set(AttemptState::Canceled);
        self.receiver.close();
        (self.canceller)();
    }

    /// Wait until outcome delivery for this attempt has stopped.
    ///
    /// Resolves after the terminal outcome, after cancellation, or once the
    /// provider has released every callback. Never resolves if the platform
    /// keeps the attempt open without answering.
    ///
    /// The returned future does not borrow the handle, so the attempt can still
    /// be inspected or canceled while something waits on it.
    pub fn finished(&self) -> impl Future<Output = ()> + 'static {
        let mut delivered = self.delivered.clone();
        async move {
            if delivered.wait_for(|done| *done).await.is_err() {
                debug!("biometric outcome delivery dropped before finishing");
            }
        }
    }
}

/// Gates a protected action behind platform biometric verification.
#[derive(Debug)]
pub struct BiometricGate<P> {
    provider: Rc<P>,
}

impl<P> Clone for BiometricGate<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
        }
    }
}

impl<P: BiometricProvider + 'static> BiometricGate<P> {
    /// Create a gate over the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Rc::new(provider),
        }
    }

    /// The provider this gate talks to.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Query whether biometric authentication can be attempted right now.
    ///
    /// The platform is queried on every call; nothing is cached.
    pub fn check_availability(&self) -> AvailabilityStatus {
        let code = self.provider.query_capability();
        let status = AvailabilityStatus::from_code(code);
        info!("biometric availability (code {code}): {status}");
        status
    }

    /// Begin a single authentication attempt.
    ///
    /// Returns immediately. `on_outcome` runs later on the current
    /// [`LocalSet`](tokio::task::LocalSet), never inside this call. Any number of
    /// [`AuthOutcome::Failed`] may arrive before exactly one terminal outcome.
    ///
    /// The caller is expected to have seen [`AvailabilityStatus::Available`];
    /// otherwise the result is whatever the platform reports.
    ///
    /// # Panics
    /// Panics if called outside a `LocalSet`.
    pub fn start_authentication<F>(&self, config: PromptConfig, on_outcome: F) -> AuthAttempt
    where
        F: FnMut(AuthOutcome) + 'static,
    {
        let (sender, receiver) = unbounded();
        let (done, delivered) = watch::channel(false);
        let state = Rc::new(Cell::new(AttemptState::Authenticating));

        info!("showing biometric prompt \"{}\"", config.title());
        self.provider
            .authenticate(&config, PlatformCallback::new(sender));

        tokio::task::spawn_local(deliver_outcomes(
            receiver.clone(),
            Rc::clone(&state),
            on_outcome,
            done,
        ));

        let provider = Rc::clone(&self.provider);
        AuthAttempt {
            state,
            receiver,
            canceller: Rc::new(move || provider.cancel_authentication()),
            delivered,
        }
    }

    /// Check availability and start an attempt only if biometrics are available.
    ///
    /// # Errors
    /// Returns [`BiometricError::Unavailable`] without showing any prompt when
    /// the device cannot authenticate.
    ///
    /// # Panics
    /// Panics if called outside a `LocalSet`.
    pub fn authenticate_if_available<F>(
        &self,
        config: PromptConfig,
        on_outcome: F,
    ) -> Result<AuthAttempt, BiometricError>
    where
        F: FnMut(AuthOutcome) + 'static,
    {
        let status = self.check_availability();
        if !status.is_available() {
            return Err(BiometricError::Unavailable(status));
        }
        Ok(self.start_authentication(config, on_outcome))
    }

    /// Run one attempt to completion.
    ///
    /// Rejected samples are logged and waited through. Dropping the future
    /// before it resolves cancels the attempt.
    ///
    /// # Errors
    /// - [`BiometricError::Unavailable`] if biometrics cannot be used.
    /// - [`BiometricError::Canceled`] or [`BiometricError::Platform`] if the attempt ended with an error.
    /// - [`BiometricError::Interrupted`] if the platform released the attempt without a result.
    ///
    /// # Panics
    /// Panics if called outside a `LocalSet`.
    pub async fn authenticate(&self, config: PromptConfig) -> Result<(), BiometricError> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let mut tx = Some(tx);
        let _attempt = CancelOnDrop(self.authenticate_if_available(config, move |outcome| {
            if !outcome.is_terminal() {
                info!("biometric sample rejected, waiting for another try");
                return;
            }
            if let Some(tx) = tx.take() {
                let _ = tx.send(outcome);
            }
        })?);

        match rx.await {
            Ok(outcome) => outcome.into_error().map_or(Ok(()), Err),
            Err(_) => Err(BiometricError::Interrupted),
        }
    }
}

struct CancelOnDrop(AuthAttempt);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

async fn deliver_outcomes<F>(
    receiver: Receiver<PlatformEvent>,
    state: Rc<Cell<AttemptState>>,
    mut on_outcome: F,
    done: watch::Sender<bool>,
) where
    F: FnMut(AuthOutcome),
{
    while let Ok(event) = receiver.recv().await {
        if state.get() != AttemptState::Authenticating {
            break;
        }

        let outcome = AuthOutcome::classify(event);
        match &outcome {
            AuthOutcome::Success => {
                info!("biometric authentication succeeded");
                state.set(AttemptState::Succeeded);
            }
            AuthOutcome::Error { code, message } => {
                info!("biometric authentication error {code}: {message}");
                state.set(AttemptState::Errored);
            }
            AuthOutcome::Failed => info!("biometric authentication failed, attempt stays open"),
        }

        let terminal = outcome.is_terminal();
        on_outcome(outcome);
        if terminal {
            receiver.close();
            break;
        }
    }

    if state.get() == AttemptState::Authenticating {
        warn!("biometric provider released the attempt without a result");
    }
    done.send_replace(true);
}
