/// Error types for the ESG API client
use thiserror::Error;

/// Main error type for ESG API operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// `message`/`detail` string from the error body, if the server sent one
        detail: Option<String>,
    },

    /// HTTP request failed before a status was received
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("Response did not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// Failed to read a file to upload
    #[error("Failed to read upload file: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Human-readable message for a failed HTTP status.
///
/// These strings document the failure modes the backend is expected to
/// produce and are shown to the user as-is.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Bad request. Please check your input and try again.".to_string(),
        401 => "Unauthorized. Please log in again.".to_string(),
        403 => "Forbidden. You don't have permission to access this resource.".to_string(),
        404 => "Resource not found.".to_string(),
        422 => "Validation error. Please check the submitted data.".to_string(),
        500 => "Internal server error. Please try again later.".to_string(),
        503 => "Service unavailable. Please try again later.".to_string(),
        other => format!("Request failed with status {other}"),
    }
}

impl ApiError {
    /// Build a status error from the response code and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "detail", "error"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(|d| d.as_str()).map(str::to_string))
            })
            .filter(|d| !d.trim().is_empty());
        ApiError::Status {
            status,
            message: status_message(status),
            detail,
        }
    }

    /// HTTP status for status errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
