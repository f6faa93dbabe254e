mod app_config;
mod config;
pub mod de;
mod deals;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use deals::{Deal, DealId};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
