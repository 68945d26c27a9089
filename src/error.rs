//! Application error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. Storage variants carry the name of the
//! failed operation and the underlying `sqlx` error so the boundary can log
//! them; the JSON body only ever exposes a short message.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Error payload returned by every failing endpoint.
///
/// ```json
/// { "success": false, "error": "content_rejected", "message": "quote text contains disallowed language" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Input is malformed: empty, too long, not JSON.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The content validator refused the submission; nothing was written.
    #[error("{reason}")]
    ContentRejected { reason: String },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String },

    /// The backing store could not be opened or its schema created.
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("storage write failed during {operation}: {source}")]
    StorageWrite {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("storage read failed during {operation}: {source}")]
    StorageRead {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// An operation was attempted after the store was shut down.
    #[error("storage is closed ({operation})")]
    StorageClosed { operation: &'static str },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn content_rejected(reason: impl Into<String>) -> Self {
        Self::ContentRejected {
            reason: reason.into(),
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Machine readable error code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::ContentRejected { .. } => "content_rejected",
            AppError::NotFound { .. } => "not_found",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::StorageUnavailable { .. } => "storage_unavailable",
            AppError::StorageWrite { .. } => "storage_write_error",
            AppError::StorageRead { .. } => "storage_read_error",
            AppError::StorageClosed { .. } => "storage_closed",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ContentRejected { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::StorageUnavailable { .. } | AppError::StorageClosed { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::StorageWrite { .. }
            | AppError::StorageRead { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the JSON body. Storage failures are reported generically; the
    /// underlying cause is logged, not returned.
    pub fn to_error_body(&self) -> ErrorBody {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details } => (message.clone(), details.clone()),
            AppError::ContentRejected { reason } => (reason.clone(), Value::Null),
            AppError::Unauthorized { message } => (message.clone(), Value::Null),
            AppError::StorageUnavailable { .. } | AppError::StorageClosed { .. } => {
                ("Quote storage is unavailable".to_string(), Value::Null)
            }
            AppError::StorageWrite { operation, .. } | AppError::StorageRead { operation, .. } => (
                "Database error".to_string(),
                json!({ "operation": operation }),
            ),
            AppError::Internal { message, .. } => (message.clone(), Value::Null),
        };

        ErrorBody {
            success: false,
            error: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            match &self {
                AppError::StorageWrite { operation, source }
                | AppError::StorageRead { operation, source } => {
                    tracing::error!(operation, error = %source, "Storage operation failed");
                }
                other => tracing::error!(error = %other, "Request failed"),
            }
        }

        let unauthorized = matches!(self, AppError::Unauthorized { .. });
        let mut response = (status, Json(self.to_error_body())).into_response();

        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();

        let message = match fields.as_slice() {
            [] => "Invalid request".to_string(),
            fields => format!("Invalid value for: {}", fields.join(", ")),
        };

        AppError::bad_request(message, json!(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::content_rejected("nope").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::StorageClosed {
                operation: "list_quotes"
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::StorageRead {
                operation: "stats",
                source: sqlx::Error::RowNotFound,
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_content_rejected_body_is_verbatim() {
        let body = AppError::content_rejected("quote text contains disallowed language")
            .to_error_body();

        assert!(!body.success);
        assert_eq!(body.error, "content_rejected");
        assert_eq!(body.message, "quote text contains disallowed language");
    }

    #[test]
    fn test_storage_body_hides_cause() {
        let body = AppError::StorageWrite {
            operation: "add_quote",
            source: sqlx::Error::Protocol("disk on fire".to_string()),
        }
        .to_error_body();

        assert_eq!(body.message, "Database error");
        assert_eq!(body.details["operation"], "add_quote");
        assert!(!body.message.contains("disk"));
    }

    #[test]
    fn test_display_includes_operation_and_cause() {
        let err = AppError::StorageRead {
            operation: "list_quotes",
            source: sqlx::Error::PoolTimedOut,
        };

        let text = err.to_string();
        assert!(text.contains("list_quotes"));
        assert!(text.contains("timed out"));
    }
}
