// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The agent could not reach the replica or the call was rejected at the
    /// protocol level (not a business-level `Err`).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Candid error: {0}")]
    Candid(#[from] candid::Error),

    /// Identity provider failed or the user cancelled the flow.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("No authenticated session")]
    NotAuthenticated,

    /// Business failure reported by the canister in an `Err` variant.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Validation(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<ic_agent::AgentError> for AppError {
    fn from(err: ic_agent::AgentError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<candid::types::principal::PrincipalError> for AppError {
    fn from(err: candid::types::principal::PrincipalError) -> Self {
        AppError::Validation(format!("Invalid principal: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
