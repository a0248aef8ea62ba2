// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Every store and identity error ends here as visible state
// - Auth failures never reveal which part of the credentials was wrong
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use super::dto::FieldErrorDto;
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldErrorDto>,
}

/// Error categories for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Credential check failed (401)
    Auth,

    /// No active admin session (401)
    Unauthenticated,

    /// Domain invariant violation (422)
    DomainError,

    /// Catalog store unavailable or refused (502)
    Store,

    /// Database/persistence error (500)
    Database,

    /// Bad configuration (500)
    Configuration,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
            field_errors: Vec::new(),
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Validation(errors) => Self {
                field_errors: errors.iter().map(FieldErrorDto::from).collect(),
                ..Self::new(
                    ErrorType::Validation,
                    "Please correct the highlighted fields",
                    Some(errors.to_string()),
                )
            },

            AppError::Auth => Self::new(ErrorType::Auth, AppError::Auth.to_string(), None),

            AppError::Unauthenticated => Self::new(
                ErrorType::Unauthenticated,
                AppError::Unauthenticated.to_string(),
                None,
            ),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Store(reason) => {
                error!("Store error: {}", reason);
                Self::new(
                    ErrorType::Store,
                    "The catalog is unavailable right now. Please try again.",
                    Some(reason),
                )
            }

            AppError::Database(db_error) => {
                error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Config(message) => {
                Self::new(ErrorType::Configuration, "Invalid configuration", Some(message))
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for field_error in &self.field_errors {
            write!(f, "\n  {}: {}", field_error.field, field_error.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}

/// Result type returned by every command
pub type CommandResult<T> = Result<T, ErrorResponse>;
