//! Error types for chainwalk

use thiserror::Error;

/// Main error type for chainwalk
#[derive(Error, Debug)]
pub enum ChainwalkError {
    #[error("invalid action index {index} for an action space of size {count}")]
    InvalidAction { index: usize, count: usize },

    #[error("state {state} is outside the valid range [1, {max}]")]
    StateOutOfRange { state: usize, max: usize },

    #[error("environment is terminal at state {state}; start a new episode before stepping")]
    EpisodeOver { state: usize },

    #[error("no episode in progress; call start first")]
    NotStarted,

    #[error("episode exceeded the step limit of {limit}")]
    StepLimit { limit: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for chainwalk operations
pub type Result<T> = std::result::Result<T, ChainwalkError>;
