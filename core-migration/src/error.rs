use core_hierarchy::HierarchyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Config error: {0}")]
    Config(#[from] core_runtime::Error),

    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MigrationError>;
