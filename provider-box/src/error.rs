use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxError {
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Item {item_id} has no owner")]
    MissingOwner { item_id: String },

    #[error("Expected a folder for {item_id}, got {item_type}")]
    UnexpectedItemType { item_id: String, item_type: String },

    #[error("API request failed (status {status}): {message}")]
    ApiError { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, BoxError>;

impl From<BoxError> for BridgeError {
    fn from(error: BoxError) -> Self {
        BridgeError::OperationFailed(error.to_string())
    }
}

impl From<serde_json::Error> for BoxError {
    fn from(error: serde_json::Error) -> Self {
        BoxError::ParseError(error.to_string())
    }
}
