//! # Google Drive Provider
//!
//! Data contract for Google Drive API v3, as a migration source or as a
//! Drive-to-Drive destination.
//!
//! ## Overview
//!
//! This module provides:
//! - Serde types for `files.list` pages and file resources
//! - Conversion of file resources into flat `RemoteObject`s
//! - `DriveListing`, an `ObjectLister` over pages fetched by the host
//! - `DriveMetadataSink`, a `MetadataSink` that copies `modifiedTime` through
//!   `files.update` and can move ownership to a new domain
//!
//! Docs, Sheets and Slides keep their native MIME types so the tree builder
//! can repair their export extensions.

pub mod error;
pub mod listing;
pub mod metadata;
pub mod types;

pub use error::{GoogleDriveError, Result};
pub use listing::{convert_file, list_query, parse_page, DriveListing};
pub use metadata::{convert_to_new_domain, DriveMetadataSink, DriveUpdateOptions};
pub use types::{DriveFile, DriveUser, FilesListResponse, FOLDER_MIME_TYPE};
