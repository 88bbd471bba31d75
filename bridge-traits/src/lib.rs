//! # Host Bridge Traits
//!
//! Collaborator contracts between the migration core and the storage backends
//! it reconciles.
//!
//! ## Overview
//!
//! The core never talks to a vendor API directly. It consumes two fixed
//! capabilities, each implemented once per backend outside the core:
//!
//! - [`ObjectLister`](storage::ObjectLister) - returns the complete, already
//!   paginated flat list of [`RemoteObject`](storage::RemoteObject)s for one
//!   backend (folders and files intermixed, in no particular order)
//! - [`MetadataSink`](storage::MetadataSink) - persists a
//!   [`MetadataPayload`](storage::MetadataPayload) onto a destination object
//!   and reports whether it wrote new metadata or found it already present
//!
//! ### Utilities
//! - [`HttpClient`](http::HttpClient) - Injected transport for provider sinks
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for consistent
//! error handling. Implementations should:
//!
//! - Convert vendor-specific errors to `BridgeError`
//! - Provide actionable error messages
//! - Include error context (e.g., object ids, HTTP status)
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so that a host may drive the
//! collaborators from any async task. The core itself calls them sequentially.
//!
//! ## Examples
//!
//! ### Implementing MetadataSink
//!
//! ```ignore
//! use bridge_traits::storage::{MetadataPayload, MetadataSink, WriteOutcome};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyBackendSink {
//!     client: MyApiClient,
//! }
//!
//! #[async_trait]
//! impl MetadataSink for MyBackendSink {
//!     async fn apply_metadata(&self, object_id: &str, payload: &MetadataPayload) -> Result<WriteOutcome> {
//!         if self.client.has_template(object_id).await? {
//!             return Ok(WriteOutcome::AlreadyPresent);
//!         }
//!         self.client.create_template(object_id, payload).await?;
//!         Ok(WriteOutcome::Written)
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod logging;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use storage::{
    MetadataPayload, MetadataSink, ObjectLister, RemoteKind, RemoteObject, RemoteUser,
    WriteOutcome,
};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use logging::{format_entry, ConsoleLogger, LogEntry, LogLevel, LoggerSink};
