use thiserror::Error;

use super::config::ConfigError;
use crate::core::collaborators::PredictionError;
use crate::core::models::sequence::SequenceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid target sequence: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Secondary structure prediction failed: {source}")]
    Prediction {
        #[from]
        source: PredictionError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
