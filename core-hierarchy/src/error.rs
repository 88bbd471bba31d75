use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("Root directory not found: {path}")]
    RootNotFound { path: String },

    #[error("Folder not found: {path}")]
    FolderNotFound { path: String },

    #[error("Listing failed: {0}")]
    Listing(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
