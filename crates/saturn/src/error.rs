//! Error types for configuration and setup
//!
//! The saturation core itself never fails on well-formed input: recoverable
//! conditions are flags and counters, and contract violations panic. Only
//! building a proof state from user configuration can produce an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaturnError {
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Unknown queue: {0}")]
    UnknownQueue(String),

    #[error("Unknown literal selection strategy: {0}")]
    UnknownSelection(String),

    #[error("Queue {0} has coefficient 0")]
    ZeroCoefficient(String),

    #[error("Queue profile is empty")]
    EmptyProfile,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SaturnError>;
