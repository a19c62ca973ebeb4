mod app;
mod fixtures;
mod pages;
mod paths;
mod settings;
#[cfg(test)]
mod testing;

use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use engage_api::{ApiClient, ApiConfig, AuthService};
use engage_ui::runtime::{Runtime, RuntimeError};
use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};
use thiserror::Error;

use crate::app::{Services, router, routes};
use crate::paths::AppPaths;
use crate::settings::{SettingsError, SettingsProvider, SettingsTokenStore, SqliteBackend};

const LOG_LEVEL_VAR: &str = "ENGAGE_LOG";

#[derive(Debug, Error)]
enum StartupError {
    #[error("could not prepare application directories: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("settings unavailable: {0}")]
    Settings(#[from] SettingsError),
    #[error("invalid API configuration: {0}")]
    Config(#[from] engage_api::error::ConfigError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn log_level() -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .unwrap_or(LevelFilter::Debug)
}

async fn run() -> Result<(), StartupError> {
    // A missing .env is normal
    let _ = dotenvy::dotenv();

    let paths = AppPaths::resolve();
    paths.create_dirs()?;
    WriteLogger::init(log_level(), Config::default(), paths.start_log()?)?;
    info!(
        "engage console starting, settings in {}, logs in {}",
        paths.settings_db().display(),
        paths.log_dir().display()
    );

    let settings = SettingsProvider::new(SqliteBackend::new(paths.settings_db()).await?);
    let tokens = Arc::new(SettingsTokenStore::new(settings));
    let config = ApiConfig::from_env()?;
    info!("backend at {}", config.base_url());

    let auth = AuthService::new(ApiClient::new(config, tokens));
    let start = match auth.is_authenticated().await {
        Ok(true) => routes::DASHBOARD,
        Ok(false) => routes::LOGIN,
        Err(e) => {
            warn!("could not read stored token: {e}");
            routes::LOGIN
        }
    };

    let services = Services::new(auth);
    Runtime::new(router(&services)).run(start).await?;
    info!("engage console stopped");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
