//! Android backend.
//!
//! `BiometricPrompt` needs an `AuthenticationCallback` subclass, which only Java or
//! Kotlin code can provide. The host therefore hands us a bridge object with:
//!
//! ```text
//! int  canAuthenticate()
//! void authenticate(String title, String subtitle, String description,
//!                   String negativeButton, boolean allowDeviceCredential,
//!                   boolean confirmationRequired, long handle)
//! void cancelAuthentication()
//! ```
//!
//! and routes its prompt callbacks back through the static natives of
//! `biogate.biometric.NativeCallbacks`, passing `handle` along.
//!
//! `handle` owns a boxed callback. `onSucceeded`, `onError` and `release`
//! consume it, so the bridge must call exactly one of them, once. If
//! `authenticate` throws, ownership stays on the Rust side and the bridge must
//! not retain `handle` or pass it to any native afterwards.

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{jint, jlong};
use jni::{JNIEnv, JavaVM};
use log::{error, warn};

use crate::{
    BiometricError, BiometricProvider, CapabilityCode, ErrorCode, PlatformCallback, PromptConfig,
};

const AUTHENTICATE_SIG: &str = "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;ZZJ)V";

/// Provider that drives `androidx.biometric` through a host bridge object.
pub struct AndroidProvider {
    vm: JavaVM,
    bridge: GlobalRef,
}

impl std::fmt::Debug for AndroidProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidProvider").finish_non_exhaustive()
    }
}

impl AndroidProvider {
    /// Wrap the host bridge object.
    ///
    /// # Errors
    /// Returns [`BiometricError::Platform`] if the VM or a global reference
    /// cannot be obtained.
    pub fn new(env: &mut JNIEnv, bridge: &JObject) -> Result<Self, BiometricError> {
        let vm = env.get_java_vm().map_err(|e| jni_error("get_java_vm", &e))?;
        let bridge = env
            .new_global_ref(bridge)
            .map_err(|e| jni_error("new_global_ref", &e))?;
        Ok(Self { vm, bridge })
    }

    fn with_env<T>(
        &self,
        what: &str,
        f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<T>,
    ) -> Result<T, BiometricError> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| jni_error("attach_current_thread", &e))?;
        f(&mut *env).map_err(|e| jni_error(what, &e))
    }
}

impl BiometricProvider for AndroidProvider {
    fn query_capability(&self) -> CapabilityCode {
        let bridge = self.bridge.as_obj();
        match self.with_env("canAuthenticate", |env| {
            env.call_method(bridge, "canAuthenticate", "()I", &[])?.i()
        }) {
            Ok(code) => CapabilityCode(code),
            Err(e) => {
                warn!("{e}");
                CapabilityCode::STATUS_UNKNOWN
            }
        }
    }

    fn authenticate(&self, config: &PromptConfig, callback: PlatformCallback) {
        let handle = Box::into_raw(Box::new(callback)) as jlong;
        let bridge = self.bridge.as_obj();

        let result = self.with_env("authenticate", |env| {
            let title = env.new_string(config.title())?;
            let subtitle = env.new_string(config.subtitle())?;
            let description = env.new_string(config.description())?;
            let negative = match config.negative_button_text() {
                Some(text) => JObject::from(env.new_string(text)?),
                None => JObject::null(),
            };
            env.call_method(
                bridge,
                "authenticate",
                AUTHENTICATE_SIG,
                &[
                    JValue::Object(&title),
                    JValue::Object(&subtitle),
                    JValue::Object(&description),
                    JValue::Object(&negative),
                    JValue::Bool(u8::from(config.allows_device_credential())),
                    JValue::Bool(u8::from(config.requires_confirmation())),
                    JValue::Long(handle),
                ],
            )?;
            Ok(())
        });

        if let Err(e) = result {
            error!("{e}");
            // The bridge threw or was never reached and must not hold the handle.
            let callback = unsafe { Box::from_raw(handle as *mut PlatformCallback) };
            callback.error(ErrorCode::VENDOR, e.to_string());
        }
    }

    fn cancel_authentication(&self) {
        let bridge = self.bridge.as_obj();
        if let Err(e) = self.with_env("cancelAuthentication", |env| {
            env.call_method(bridge, "cancelAuthentication", "()V", &[])
                .map(|_| ())
        }) {
            warn!("{e}");
        }
    }
}

fn jni_error(what: &str, err: &jni::errors::Error) -> BiometricError {
    BiometricError::Platform {
        code: ErrorCode::VENDOR,
        message: format!("{what}: {err}"),
    }
}

/// `NativeCallbacks.onSucceeded(long)`. Consumes the handle.
///
/// # Safety
/// `handle` must come from [`AndroidProvider::authenticate`] and not have been consumed.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn Java_biogate_biometric_NativeCallbacks_onSucceeded(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    let callback = unsafe { Box::from_raw(handle as *mut PlatformCallback) };
    callback.succeeded();
}

/// `NativeCallbacks.onError(long, int, String)`. Consumes the handle.
///
/// # Safety
/// `handle` must come from [`AndroidProvider::authenticate`] and not have been consumed.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn Java_biogate_biometric_NativeCallbacks_onError(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    code: jint,
    message: JString,
) {
    let callback = unsafe { Box::from_raw(handle as *mut PlatformCallback) };
    let message: String = env
        .get_string(&message)
        .map(Into::into)
        .unwrap_or_default();
    callback.error(ErrorCode(code), message);
}

/// `NativeCallbacks.onFailed(long)`. The handle stays valid.
///
/// # Safety
/// `handle` must come from [`AndroidProvider::authenticate`] and not have been consumed.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn Java_biogate_biometric_NativeCallbacks_onFailed(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    let callback = unsafe { &*(handle as *const PlatformCallback) };
    callback.failed();
}

/// `NativeCallbacks.release(long)`. Drops the handle without a result.
///
/// # Safety
/// `handle` must come from [`AndroidProvider::authenticate`] and not have been consumed.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn Java_biogate_biometric_NativeCallbacks_release(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    drop(unsafe { Box::from_raw(handle as *mut PlatformCallback) });
}
