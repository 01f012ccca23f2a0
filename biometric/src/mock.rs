//! A scripted provider for exercising the gate without a platform.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{BiometricProvider, CapabilityCode, PlatformCallback, PlatformEvent, PromptConfig};

#[derive(Debug)]
struct Inner {
    capability: CapabilityCode,
    script: Vec<PlatformEvent>,
    prompts: Vec<PromptConfig>,
    callback: Option<PlatformCallback>,
    cancellations: usize,
}

/// Fake provider with a fixed capability and a scripted event sequence.
///
/// Clones share state, so a test can keep a handle after giving one to a gate.
/// Scripted events are pushed synchronously from inside `authenticate`, which is
/// the worst case for a gate that must never deliver synchronously.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    inner: Rc<RefCell<Inner>>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new(CapabilityCode::SUCCESS)
    }
}

impl ScriptedProvider {
    /// A provider reporting `capability` and emitting nothing on its own.
    #[must_use]
    pub fn new(capability: CapabilityCode) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                capability,
                script: Vec::new(),
                prompts: Vec::new(),
                callback: None,
                cancellations: 0,
            })),
        }
    }

    /// Events emitted on every `authenticate` call.
    #[must_use]
    pub fn with_script(self, events: impl IntoIterator<Item = PlatformEvent>) -> Self {
        self.inner.borrow_mut().script = events.into_iter().collect();
        self
    }

    /// Change the reported capability.
    pub fn set_capability(&self, capability: CapabilityCode) {
        self.inner.borrow_mut().capability = capability;
    }

    /// Every prompt the gate asked to show, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<PromptConfig> {
        self.inner.borrow().prompts.clone()
    }

    /// Number of `authenticate` calls.
    #[must_use]
    pub fn authenticate_calls(&self) -> usize {
        self.inner.borrow().prompts.len()
    }

    /// Number of `cancel_authentication` calls.
    #[must_use]
    pub fn cancellations(&self) -> usize {
        self.inner.borrow().cancellations
    }

    /// Emit an event on the most recent attempt.
    ///
    /// # Panics
    /// Panics if `authenticate` was never called or the callback was released.
    pub fn emit(&self, event: PlatformEvent) {
        let callback = self.inner.borrow().callback.clone();
        callback
            .expect("no attempt in progress")
            .send(event);
    }

    /// Drop the callback of the most recent attempt without a result.
    pub fn release(&self) {
        self.inner.borrow_mut().callback = None;
    }
}

impl BiometricProvider for ScriptedProvider {
    fn query_capability(&self) -> CapabilityCode {
        self.inner.borrow().capability
    }

    fn authenticate(&self, config: &PromptConfig, callback: PlatformCallback) {
        let script = {
            let mut inner = self.inner.borrow_mut();
            inner.prompts.push(config.clone());
            inner.callback = Some(callback.clone());
            inner.script.clone()
        };
        for event in script {
            callback.send(event);
        }
    }

    fn cancel_authentication(&self) {
        self.inner.borrow_mut().cancellations += 1;
    }
}
