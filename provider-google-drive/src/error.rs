//! Error types for Google Drive provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Google Drive provider errors
#[derive(Error, Debug)]
pub enum GoogleDriveError {
    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// File resource came back without an owner
    #[error("File {file_id} has no owner")]
    MissingOwner { file_id: String },

    /// Root folder resource is not a folder
    #[error("Expected a folder for {file_id}, got {mime_type}")]
    UnexpectedItemType { file_id: String, mime_type: String },

    /// Drive answered with a non-success status
    #[error("API request failed (status {status}): {message}")]
    ApiError { status: u16, message: String },
}

/// Result type for Google Drive operations
pub type Result<T> = std::result::Result<T, GoogleDriveError>;

impl From<GoogleDriveError> for BridgeError {
    fn from(error: GoogleDriveError) -> Self {
        match error {
            GoogleDriveError::ParseError(msg) => {
                BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            other => BridgeError::OperationFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for GoogleDriveError {
    fn from(error: serde_json::Error) -> Self {
        GoogleDriveError::ParseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GoogleDriveError::MissingOwner {
            file_id: "abc".to_string(),
        };

        assert_eq!(error.to_string(), "File abc has no owner");

        let error = GoogleDriveError::ApiError {
            status: 404,
            message: "notFound".to_string(),
        };
        assert_eq!(error.to_string(), "API request failed (status 404): notFound");
    }

    #[test]
    fn test_error_conversion() {
        let error = GoogleDriveError::ParseError("unexpected EOF".to_string());
        let bridge_error: BridgeError = error.into();

        assert!(matches!(
            bridge_error,
            BridgeError::OperationFailed(msg) if msg == "Parse error: unexpected EOF"
        ));
    }
}
