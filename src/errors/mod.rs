//! Error handling module for the admin data layer.
//!
//! Provides the error taxonomy shared by the HTTP client, the resource stores and
//! the page controllers, plus extraction of human-readable messages from backend
//! error payloads.

use serde_json::Value;

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Message used when a failed write carries nothing more specific.
pub const GENERIC_FAILURE: &str = "Operation failed";

/// Application error type.
///
/// `Display` renders only the human-readable message, which is what the UI layer
/// shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The request never produced a response (connect, DNS, timeout)
    #[error("{0}")]
    Network(String),
    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// The backend answered with a payload we could not interpret
    #[error("{0}")]
    Decode(String),
    /// Field-level validation errors, one per line
    #[error("{0}")]
    Validation(String),
    /// The caller passed something the backend contract cannot express
    #[error("{0}")]
    InvalidInput(String),
    /// Durable token storage failure
    #[error("{0}")]
    Storage(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Backend { .. } => codes::BACKEND_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::InvalidInput(_) => codes::INVALID_INPUT,
            AppError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Backend { status, .. } => Some(*status),
            AppError::Validation(_) => Some(422),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response from its status and JSON body.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let field_errors = field_error_messages(body);
        if !field_errors.is_empty() {
            return AppError::Validation(field_errors.join("\n"));
        }
        AppError::Backend {
            status,
            message: mutation_error_message(body),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("HTTP transport error: {:?}", err);
        if err.is_decode() {
            AppError::Decode(format!("Malformed response: {}", err))
        } else {
            AppError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        AppError::Decode(format!("Malformed response: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(format!("Storage error: {}", err))
    }
}

/// Flatten the `errors` map of a backend error payload, in field order.
///
/// Each field maps to an array of messages; a bare string is accepted too.
pub fn field_error_messages(body: &Value) -> Vec<String> {
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut messages = Vec::new();
    for value in errors.values() {
        match value {
            Value::Array(items) => messages.extend(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string),
            ),
            Value::String(s) if !s.trim().is_empty() => messages.push(s.clone()),
            _ => {}
        }
    }
    messages
}

/// Pick the best human-readable message out of a failed write's response body:
/// joined field errors, then the top-level `message`, then [`GENERIC_FAILURE`].
pub fn mutation_error_message(body: &Value) -> String {
    let field_errors = field_error_messages(body);
    if !field_errors.is_empty() {
        return field_errors.join("\n");
    }

    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_errors_joined_with_newlines() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {
                "name": ["The name field is required."],
                "price": ["must be positive", "must be a number"]
            }
        });

        assert_eq!(
            mutation_error_message(&body),
            "The name field is required.\nmust be positive\nmust be a number"
        );
    }

    #[test]
    fn test_message_used_without_field_errors() {
        let body = json!({ "message": "Salon not found", "errors": {} });
        assert_eq!(mutation_error_message(&body), "Salon not found");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(mutation_error_message(&json!({})), GENERIC_FAILURE);
        assert_eq!(mutation_error_message(&json!({ "message": "  " })), GENERIC_FAILURE);
        assert_eq!(mutation_error_message(&Value::Null), GENERIC_FAILURE);
    }

    #[test]
    fn test_from_response_classifies_validation() {
        let err = AppError::from_response(422, &json!({ "errors": { "price": ["must be positive"] } }));
        assert_eq!(err, AppError::Validation("must be positive".to_string()));
        assert_eq!(err.to_string(), "must be positive");
        assert_eq!(err.error_code(), codes::VALIDATION_ERROR);

        let err = AppError::from_response(500, &json!({ "message": "Server Error" }));
        assert_eq!(
            err,
            AppError::Backend {
                status: 500,
                message: "Server Error".to_string()
            }
        );
        assert_eq!(err.status(), Some(500));
    }
}
