//! Shared domain types and configuration for the stargaze workspace.

mod app_config;
mod config;
mod record;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use record::{MediaRecord, MediaType, RetrievalResult, Source};
