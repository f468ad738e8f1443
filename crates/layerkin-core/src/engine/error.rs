use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::trajectory::TrajectoryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid trajectory: {source}")]
    Trajectory {
        #[from]
        source: TrajectoryError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
