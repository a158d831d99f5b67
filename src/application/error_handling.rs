// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found
    NotFound,

    /// Candidate rejected before admission
    Validation,

    /// A load failed while reading the file
    LoadFailed,

    /// Dialog, web view bridge or temp store failure
    Platform,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::not_found("Resource"),

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "File reference rejected".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::ReadFailed { name, message } => {
                log::warn!("Load of {:?} failed: {}", name, message);

                Self {
                    success: false,
                    error_type: ErrorType::LoadFailed,
                    message: format!("Could not open {}", name),
                    details: Some(message),
                }
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Platform(message) => {
                log::error!("Platform error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Platform,
                    message: "Platform operation failed".to_string(),
                    details: Some(message),
                }
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Config(message) | AppError::Other(message) => {
                log::error!("Internal error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
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

    /// JSON string handed back to the web view as the command error.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
    }

    #[test]
    fn test_read_failure_names_the_file() {
        let error = ErrorResponse::from_app_error(AppError::read_failed("scan.h5", "EOF"));
        assert_eq!(error.error_type, ErrorType::LoadFailed);
        assert_eq!(error.message, "Could not open scan.h5");
        assert_eq!(error.details.as_deref(), Some("EOF"));
    }

    #[test]
    fn test_invariant_violation_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvariantViolation("File path must be absolute".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "File reference rejected");
    }

    #[test]
    fn test_result_conversion_serializes() {
        let result: Result<(), AppError> = Err(AppError::Platform("dialog closed".to_string()));
        let json = result.to_error_response().unwrap_err();
        assert!(json.contains("\"platform\""));
        assert!(json.contains("dialog closed"));
    }
}
