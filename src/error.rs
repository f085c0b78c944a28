use serde::Serialize;
use thiserror::Error;

use crate::types::Body;

/// Errors raised while computing calendar units.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub enum VedicError {
    /// Invalid division or engine parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("rate unavailable: {0}")]
    RateUnavailable(String),
    /// The position provider failed or returned a non-finite value.
    #[error("position provider failed for {body}: {message}")]
    Provider { body: Body, message: String },
    #[error("config file error: {0}")]
    ConfigFile(String),
}

impl VedicError {
    pub fn provider(body: Body, message: impl Into<String>) -> Self {
        Self::Provider {
            body,
            message: message.into(),
        }
    }

    /// Whether the condition only affects a single unit of a snapshot.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RateUnavailable(_) | Self::Provider { .. })
    }
}
