//! # Migration Configuration Module
//!
//! Provides configuration management for a metadata migration run.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `MigrationConfig` value that is threaded explicitly through the tree
//! builder and the reconciler. There is no process-wide mutable state: the
//! path prefix and every run flag live on this value.
//!
//! ## Settings
//!
//! - `path_prefix` - Path of each hierarchy's root (default `"D:"`)
//! - `source_root` / `destination_root` - Optional sub-folder to treat as the
//!   root of each side (e.g. `"Team/2023"`)
//! - `test_only` - Match and report without writing metadata
//! - `verbose` - Render owner and modification details when printing trees
//! - `print_details` - Emit the full matched/missed/duplicate lists in reports
//! - `output_file` - Write reports to a file instead of stdout
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{MigrationConfig, Side};
//!
//! let config = MigrationConfig::builder()
//!     .path_prefix("D:")
//!     .destination_root("D:/Team/2023")
//!     .test_only(true)
//!     .build()
//!     .expect("valid config");
//!
//! let options = config.tree_options(Side::Destination);
//! assert_eq!(options.root_segments(), vec!["Team", "2023"]);
//! ```
//!
//! ## Root directory rule
//!
//! An absent or empty root directory always means "the account root". A root
//! directory that starts with `path_prefix + "/"` has the prefix stripped; any
//! other value is taken as relative to the account root.
//!
//! The value is split on `/`, one segment per folder level. A segment matches a
//! folder by its raw name or its normalized name, so a folder whose normalized
//! name contains `/` (raw `a002fb`, normalized `a/b`) is selected by its raw
//! name.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default path prefix given to each hierarchy's root
pub const DEFAULT_PATH_PREFIX: &str = "D:";

/// Which backend a setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Source,
    Destination,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "Source"),
            Side::Destination => write!(f, "Destination"),
        }
    }
}

/// Options for building one hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Path assigned to the root node
    pub path_prefix: String,

    /// Slash-delimited sub-path of the raw tree to use as the root
    pub root_directory: Option<String>,
}

impl TreeOptions {
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            root_directory: None,
        }
    }

    pub fn with_root_directory(mut self, root_directory: impl Into<String>) -> Self {
        self.root_directory = Some(root_directory.into());
        self
    }

    /// Folder names to walk from the account root to reach the configured root
    ///
    /// Empty when no root directory is configured.
    pub fn root_segments(&self) -> Vec<&str> {
        let Some(root) = self.root_directory.as_deref() else {
            return Vec::new();
        };

        let relative = if root == self.path_prefix {
            ""
        } else {
            root.strip_prefix(self.path_prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(root)
        };

        relative.split('/').filter(|segment| !segment.is_empty()).collect()
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_PREFIX)
    }
}

/// Configuration for a migration run.
///
/// Use [`MigrationConfigBuilder`] to construct instances, or
/// [`MigrationConfig::from_json_str`] to load a saved run definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Path assigned to both hierarchies' roots
    pub path_prefix: String,

    /// Sub-folder of the source backend to use as its root
    pub source_root: Option<String>,

    /// Sub-folder of the destination backend to use as its root
    pub destination_root: Option<String>,

    /// Dry run: match and report but never call the metadata sink
    pub test_only: bool,

    /// Verbose tree printing
    pub verbose: bool,

    /// Include the full path lists in reports
    pub print_details: bool,

    /// Report destination; stdout when absent
    pub output_file: Option<PathBuf>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            source_root: None,
            destination_root: None,
            test_only: false,
            verbose: false,
            print_details: false,
            output_file: None,
        }
    }
}

impl MigrationConfig {
    /// Creates a new builder for constructing a `MigrationConfig`.
    pub fn builder() -> MigrationConfigBuilder {
        MigrationConfigBuilder::default()
    }

    /// Load and validate a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MigrationConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid migration config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Path prefix is not empty
    /// - Path prefix does not end with `/`
    /// - Output file path, when given, is not empty
    pub fn validate(&self) -> Result<()> {
        if self.path_prefix.is_empty() {
            return Err(Error::Config("Path prefix cannot be empty".to_string()));
        }

        if self.path_prefix.ends_with('/') {
            return Err(Error::Config(format!(
                "Path prefix <{}> must not end with '/'",
                self.path_prefix
            )));
        }

        if let Some(path) = &self.output_file {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("Output file path cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Root directory configured for one side
    pub fn root_directory(&self, side: Side) -> Option<&str> {
        match side {
            Side::Source => self.source_root.as_deref(),
            Side::Destination => self.destination_root.as_deref(),
        }
    }

    /// Tree builder options for one side
    pub fn tree_options(&self, side: Side) -> TreeOptions {
        TreeOptions {
            path_prefix: self.path_prefix.clone(),
            root_directory: self
                .root_directory(side)
                .filter(|root| !root.is_empty())
                .map(str::to_string),
        }
    }
}

/// Builder for constructing [`MigrationConfig`] instances.
#[derive(Debug, Default)]
pub struct MigrationConfigBuilder {
    path_prefix: Option<String>,
    source_root: Option<String>,
    destination_root: Option<String>,
    test_only: bool,
    verbose: bool,
    print_details: bool,
    output_file: Option<PathBuf>,
}

impl MigrationConfigBuilder {
    /// Sets the path prefix (default `"D:"`).
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Sets the folder inside the source backend to start in.
    pub fn source_root(mut self, root: impl Into<String>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    /// Sets the folder inside the destination backend to start in.
    pub fn destination_root(mut self, root: impl Into<String>) -> Self {
        self.destination_root = Some(root.into());
        self
    }

    pub fn test_only(mut self, enabled: bool) -> Self {
        self.test_only = enabled;
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn print_details(mut self, enabled: bool) -> Self {
        self.print_details = enabled;
        self
    }

    pub fn output_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Builds the final `MigrationConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (see [`MigrationConfig::validate`]).
    pub fn build(self) -> Result<MigrationConfig> {
        let config = MigrationConfig {
            path_prefix: self
                .path_prefix
                .unwrap_or_else(|| DEFAULT_PATH_PREFIX.to_string()),
            source_root: self.source_root,
            destination_root: self.destination_root,
            test_only: self.test_only,
            verbose: self.verbose,
            print_details: self.print_details,
            output_file: self.output_file,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MigrationConfig::builder().build().unwrap();

        assert_eq!(config.path_prefix, "D:");
        assert!(config.source_root.is_none());
        assert!(config.destination_root.is_none());
        assert!(!config.test_only);
        assert!(!config.print_details);
        assert!(config.output_file.is_none());
    }

    #[test]
    fn test_builder_with_all_fields() {
        let config = MigrationConfig::builder()
            .path_prefix("E:")
            .source_root("Shared")
            .destination_root("E:/Archive/2023")
            .test_only(true)
            .verbose(true)
            .print_details(true)
            .output_file("report.txt")
            .build()
            .unwrap();

        assert_eq!(config.path_prefix, "E:");
        assert_eq!(config.root_directory(Side::Source), Some("Shared"));
        assert_eq!(config.root_directory(Side::Destination), Some("E:/Archive/2023"));
        assert!(config.test_only);
        assert!(config.verbose);
        assert!(config.print_details);
        assert_eq!(config.output_file, Some(PathBuf::from("report.txt")));
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let result = MigrationConfig::builder().path_prefix("").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_trailing_slash() {
        let result = MigrationConfig::builder().path_prefix("D:/").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_tree_options_strip_prefix() {
        let config = MigrationConfig::builder()
            .destination_root("D:/Team/2023")
            .build()
            .unwrap();

        let options = config.tree_options(Side::Destination);
        assert_eq!(options.path_prefix, "D:");
        assert_eq!(options.root_segments(), vec!["Team", "2023"]);
    }

    #[test]
    fn test_tree_options_relative_root() {
        let options = TreeOptions::new("D:").with_root_directory("/Team//2023/");
        assert_eq!(options.root_segments(), vec!["Team", "2023"]);
    }

    #[test]
    fn test_missing_or_empty_root_means_account_root() {
        let config = MigrationConfig::builder().source_root("").build().unwrap();

        assert!(config.tree_options(Side::Source).root_directory.is_none());
        assert!(config.tree_options(Side::Source).root_segments().is_empty());
        assert!(config.tree_options(Side::Destination).root_segments().is_empty());
        assert!(TreeOptions::new("D:")
            .with_root_directory("D:")
            .root_segments()
            .is_empty());
    }

    #[test]
    fn test_prefix_must_be_a_whole_segment() {
        // "D:ocs" is not under "D:", so it is taken relative to the account root
        let options = TreeOptions::new("D:").with_root_directory("D:ocs/2023");
        assert_eq!(options.root_segments(), vec!["D:ocs", "2023"]);
    }

    #[test]
    fn test_from_json_str() {
        let config = MigrationConfig::from_json_str(
            r#"{ "path_prefix": "X:", "destination_root": "Team", "test_only": true }"#,
        )
        .unwrap();

        assert_eq!(config.path_prefix, "X:");
        assert_eq!(config.destination_root.as_deref(), Some("Team"));
        assert!(config.test_only);
        assert!(!config.verbose);
    }

    #[test]
    fn test_from_json_str_rejects_invalid() {
        assert!(MigrationConfig::from_json_str("not json").is_err());
        assert!(MigrationConfig::from_json_str(r#"{ "path_prefix": "" }"#).is_err());
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = MigrationConfig::from_json_file("/nonexistent/migration.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
