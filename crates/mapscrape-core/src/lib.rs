pub mod app_config;
pub mod business;
mod config;
pub mod queries;

pub use app_config::{AppConfig, SettleDelays};
pub use business::{Business, ResultSet, ReviewAverage, ReviewCount, Target};
pub use config::{load_app_config, load_app_config_from_env};
pub use queries::{load_queries, QueryError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
