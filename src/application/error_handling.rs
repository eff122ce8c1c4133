// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Transport and session failures get a generic retry message
// - Backend rejections and validation messages are shown as-is
// - Logs errors for debugging

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found
    NotFound,

    /// Invalid input, rejected before any call
    Validation,

    /// Domain invariant violation
    DomainError,

    /// The backend answered with an `Err`
    Rejected,

    /// No session, or the identity provider failed
    Unauthenticated,

    /// Replica unreachable, call rejected, undecodable reply
    ExternalService,

    FileSystem,

    /// Other/unknown error
    Internal,
}

pub type CommandResult<T> = Result<T, ErrorResponse>;

impl ErrorResponse {
    /// Create error response from AppError, with a generic action name
    pub fn from_app_error(error: AppError) -> Self {
        Self::for_action("complete the request", error)
    }

    /// Create error response from AppError raised while trying to `action`
    /// (e.g. "purchase tokens")
    pub fn for_action(action: &str, error: AppError) -> Self {
        match error {
            AppError::NotFound => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: "Resource not found".to_string(),
                details: None,
            },

            AppError::Validation(message) => Self::validation(message),

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: domain_error.to_string(),
                details: None,
            },

            AppError::Rejected(message) => Self {
                success: false,
                error_type: ErrorType::Rejected,
                message,
                details: None,
            },

            AppError::NotAuthenticated => Self {
                success: false,
                error_type: ErrorType::Unauthenticated,
                message: "Please log in to continue.".to_string(),
                details: None,
            },

            AppError::Auth(reason) => {
                warn!("Authentication failed: {}", reason);

                Self {
                    success: false,
                    error_type: ErrorType::Unauthenticated,
                    message: "Failed to log in. Please try again.".to_string(),
                    details: Some(reason),
                }
            }

            AppError::Transport(reason) => {
                error!("Failed to {}: {}", action, reason);
                Self::retry(action, Some(reason))
            }

            AppError::Candid(candid_error) => {
                error!("Failed to {}: {:?}", action, candid_error);
                Self::retry(action, Some(candid_error.to_string()))
            }

            AppError::Config(reason) => {
                error!("Configuration error: {}", reason);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Client is misconfigured".to_string(),
                    details: Some(reason),
                }
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    fn retry(action: &str, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type: ErrorType::ExternalService,
            message: format!("Failed to {}. Please try again.", action),
            details,
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorResponse {}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self, action: &str) -> CommandResult<T>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self, action: &str) -> CommandResult<T> {
        self.map_err(|e| ErrorResponse::for_action(action, e))
    }
}
