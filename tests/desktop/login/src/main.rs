use std::path::PathBuf;

use anyhow::{Context, Result};
use biogate_biometric::BiometricGate;
use biogate_biometric::sys::SystemProvider;
use biogate_login::{LoginConfig, LoginScreen, LoginStatus};
use clap::Parser;
use tokio::task::LocalSet;

#[derive(Parser)]
#[command(name = "biogate-login-demo")]
#[command(about = "Run the biometric login screen against this machine", long_about = None)]
struct Cli {
    /// JSON login config; the stock prompt is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LoginConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => LoginConfig::default(),
    };

    LocalSet::new().run_until(run(config)).await
}

async fn run(config: LoginConfig) -> Result<()> {
    let screen = LoginScreen::new(
        BiometricGate::new(SystemProvider),
        || println!("✅ Main screen"),
        config,
    );
    let mut status = screen.subscribe();

    println!("Checking biometric availability...");
    screen.start();

    let settled = status
        .wait_for(LoginStatus::is_settled)
        .await
        .context("Login screen went away")?
        .clone();

    match settled {
        LoginStatus::Unavailable(availability) => {
            println!("Biometrics not available on this machine: {availability}");
            screen.continue_without_biometrics();
        }
        LoginStatus::Dismissed(e) => println!("❌ Authentication ended: {e}"),
        _ => {}
    }
    Ok(())
}
