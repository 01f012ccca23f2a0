use std::cell::Cell;
use std::rc::Rc;

use biogate_biometric::mock::ScriptedProvider;
use biogate_biometric::{
    AvailabilityStatus, BiometricError, BiometricGate, CapabilityCode, ErrorCode, PlatformEvent,
};
use biogate_login::{LoginConfig, LoginError, LoginScreen, LoginStatus};
use tokio::task::LocalSet;

fn counting_navigator() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move || handle.set(handle.get() + 1))
}

#[test]
fn default_config_matches_the_stock_prompt() {
    let config = LoginConfig::default();
    assert_eq!(config.prompt.title(), "Title");
    assert_eq!(config.prompt.subtitle(), "Subtitle");
    assert_eq!(config.prompt.description(), "Description");
    assert!(config.prompt.allows_device_credential());
    assert!(config.prompt.requires_confirmation());
    assert!(config.prompt.validate().is_ok());
}

#[test]
fn config_loads_from_json() {
    let config = LoginConfig::from_json(
        r#"{"prompt":{"title":"Unlock","subtitle":"Vault","negativeButtonText":"Use password"}}"#,
    )
    .unwrap();
    assert_eq!(config.prompt.title(), "Unlock");
    assert_eq!(config.prompt.subtitle(), "Vault");
    assert_eq!(config.prompt.negative_button_text(), Some("Use password"));
    assert!(!config.prompt.allows_device_credential());
}

#[test]
fn config_rejects_bad_input() {
    assert!(matches!(
        LoginConfig::from_json("{"),
        Err(LoginError::Json(_))
    ));
    assert!(matches!(
        LoginConfig::from_json(r#"{"prompt":{"title":"Unlock"}}"#),
        Err(LoginError::InvalidPrompt(BiometricError::InvalidPrompt(_)))
    ));
    assert!(matches!(
        LoginConfig::load("/nonexistent/biogate/login.json"),
        Err(LoginError::Io(_))
    ));
}

#[tokio::test]
async fn success_navigates_to_main() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::default()
                .with_script([PlatformEvent::Failed, PlatformEvent::Succeeded]);
            let (navigations, navigator) = counting_navigator();
            let screen = LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            );

            assert_eq!(screen.start(), LoginStatus::Authenticating);
            assert_eq!(navigations.get(), 0);

            screen.finished().await;
            assert_eq!(screen.status(), LoginStatus::Authenticated);
            assert_eq!(navigations.get(), 1);
            assert_eq!(provider.prompts(), vec![LoginConfig::default().prompt]);
        })
        .await;
}

#[tokio::test]
async fn unavailable_device_stays_on_screen() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::new(CapabilityCode::NO_HARDWARE);
            let (navigations, navigator) = counting_navigator();
            let screen = LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            );

            assert_eq!(
                screen.start(),
                LoginStatus::Unavailable(AvailabilityStatus::NoHardware)
            );
            assert_eq!(provider.authenticate_calls(), 0);
            assert_eq!(navigations.get(), 0);

            screen.continue_without_biometrics();
            assert_eq!(navigations.get(), 1);
        })
        .await;
}

#[tokio::test]
async fn rejection_keeps_the_prompt_up() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::default();
            let (navigations, navigator) = counting_navigator();
            let screen = LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            );
            let mut status = screen.subscribe();

            screen.start();
            provider.emit(PlatformEvent::Failed);
            status
                .wait_for(|s| *s == LoginStatus::Rejected)
                .await
                .unwrap();

            assert_eq!(screen.retry(), LoginStatus::Rejected);
            assert_eq!(provider.authenticate_calls(), 1);
            assert_eq!(navigations.get(), 0);
        })
        .await;
}

#[tokio::test]
async fn cancellation_dismisses_and_retry_prompts_again() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::default().with_script([PlatformEvent::Error {
                code: ErrorCode::NEGATIVE_BUTTON,
                message: "Cancel".into(),
            }]);
            let (navigations, navigator) = counting_navigator();
            let screen = LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            );

            screen.start();
            screen.finished().await;
            let status = screen.status();
            assert!(status.is_settled());
            assert!(matches!(
                status,
                LoginStatus::Dismissed(BiometricError::Canceled {
                    code: ErrorCode::NEGATIVE_BUTTON,
                    ..
                })
            ));

            assert_eq!(screen.retry(), LoginStatus::Authenticating);
            assert_eq!(provider.authenticate_calls(), 2);
            assert_eq!(navigations.get(), 0);
        })
        .await;
}

#[tokio::test]
async fn dismiss_cancels_the_prompt() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::default();
            let (navigations, navigator) = counting_navigator();
            let screen = LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            );

            screen.start();
            screen.dismiss();
            provider.emit(PlatformEvent::Succeeded);
            tokio::task::yield_now().await;

            assert_eq!(provider.cancellations(), 1);
            assert_eq!(screen.status(), LoginStatus::Idle);
            assert_eq!(navigations.get(), 0);
        })
        .await;
}

#[tokio::test]
async fn retry_and_dismiss_work_while_waiting() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::default();
            let (navigations, navigator) = counting_navigator();
            let screen = Rc::new(LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            ));

            screen.start();
            let waiting = tokio::task::spawn_local({
                let screen = Rc::clone(&screen);
                async move { screen.finished().await }
            });
            tokio::task::yield_now().await;
            assert!(!waiting.is_finished());

            assert_eq!(screen.retry(), LoginStatus::Authenticating);
            assert_eq!(provider.authenticate_calls(), 1);

            screen.dismiss();
            assert_eq!(provider.cancellations(), 1);
            assert_eq!(screen.status(), LoginStatus::Idle);

            waiting.await.unwrap();
            assert_eq!(screen.status(), LoginStatus::Idle);
            assert_eq!(navigations.get(), 0);
        })
        .await;
}

#[tokio::test]
async fn success_while_waiting_navigates_once() {
    LocalSet::new()
        .run_until(async {
            let provider = ScriptedProvider::default();
            let (navigations, navigator) = counting_navigator();
            let screen = Rc::new(LoginScreen::new(
                BiometricGate::new(provider.clone()),
                navigator,
                LoginConfig::default(),
            ));

            screen.start();
            let waiting = tokio::task::spawn_local({
                let screen = Rc::clone(&screen);
                async move { screen.finished().await }
            });
            tokio::task::yield_now().await;

            provider.emit(PlatformEvent::Succeeded);
            waiting.await.unwrap();

            assert_eq!(screen.status(), LoginStatus::Authenticated);
            assert_eq!(navigations.get(), 1);
        })
        .await;
}
