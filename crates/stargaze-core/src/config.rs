use thiserror::Error;

use crate::app_config::AppConfig;

/// Default APOD endpoint; override with `STARGAZE_APOD_URL`.
const DEFAULT_API_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Default fallback dataset; override with `STARGAZE_FALLBACK_URL`.
const DEFAULT_FALLBACK_URL: &str = "https://cdn.jsdelivr.net/gh/GCA-Classroom/apod/data.json";

/// Errors produced while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // The APOD API accepts DEMO_KEY with a tight rate limit, so the key is
    // defaulted rather than required.
    let api_key = or_default("NASA_API_KEY", "DEMO_KEY");
    let api_url = or_default("STARGAZE_APOD_URL", DEFAULT_API_URL);
    let fallback_url = or_default("STARGAZE_FALLBACK_URL", DEFAULT_FALLBACK_URL);
    let request_timeout_secs = parse_u64("STARGAZE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STARGAZE_USER_AGENT", "stargaze/0.1 (apod-gallery)");
    let log_level = or_default("STARGAZE_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_key,
        api_url,
        fallback_url,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}
