//! # Box Provider
//!
//! Destination-side data contract for the Box Content API.
//!
//! ## Overview
//!
//! This module provides:
//! - Serde types for folder resources and item collections
//! - `BoxListing`, flattening nested folder listings into flat
//!   `RemoteObject`s rooted at folder `"0"`
//! - `BoxMetadataSink`, writing the `enterprise/legacyData` template through
//!   an injected `HttpClient`

pub mod error;
pub mod listing;
pub mod metadata;
pub mod types;

pub use error::{BoxError, Result};
pub use listing::{parse_folder, parse_items, BoxListing};
pub use metadata::{BoxMetadataSink, LegacyData, METADATA_SCOPE, METADATA_TEMPLATE};
pub use types::{BoxItem, BoxItemCollection, BoxItemType, BoxUser, ROOT_FOLDER_ID};
