//! Remote Storage Abstractions
//!
//! Value types for flat, unattached remote objects as returned by a backend
//! listing call, plus the listing and metadata-write collaborator traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A user as reported by a backend (owner or last modifier)
///
/// `email` is the identity key; two users with the same email are the same
/// person even when the display names differ between listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteUser {
    pub display_name: String,
    pub email: String,
}

impl RemoteUser {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}

/// Kind of a remote object, carrying the kind-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteKind {
    Folder,
    File {
        /// Backend-native MIME type, used for extension repair
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

/// Flat remote object, before it is attached to a tree
///
/// The designated backend root is the only folder with empty `parent_ids`.
/// Timestamps are opaque strings and are never parsed by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteObject {
    /// Backend identifier, unique per backend
    pub id: String,

    /// Raw name, before normalization
    pub name: String,

    pub kind: RemoteKind,

    pub owner: RemoteUser,

    /// Absent means "same as owner"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modifying_user: Option<RemoteUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,

    /// Parent object ids, normally exactly one
    #[serde(default)]
    pub parent_ids: Vec<String>,
}

impl RemoteObject {
    /// Create a folder with no parents and no timestamps
    pub fn folder(id: impl Into<String>, name: impl Into<String>, owner: RemoteUser) -> Self {
        Self::new(id.into(), name.into(), RemoteKind::Folder, owner)
    }

    /// Create a file with no parents and no timestamps
    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        owner: RemoteUser,
        mime_type: Option<String>,
    ) -> Self {
        Self::new(id.into(), name.into(), RemoteKind::File { mime_type }, owner)
    }

    fn new(id: String, name: String, kind: RemoteKind, owner: RemoteUser) -> Self {
        Self {
            id,
            name,
            kind,
            owner,
            last_modifying_user: None,
            created_time: None,
            last_modified_time: None,
            parent_ids: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_ids.push(parent_id.into());
        self
    }

    pub fn with_last_modifying_user(mut self, user: RemoteUser) -> Self {
        self.last_modifying_user = Some(user);
        self
    }

    pub fn with_times(mut self, created: impl Into<String>, modified: impl Into<String>) -> Self {
        self.created_time = Some(created.into());
        self.last_modified_time = Some(modified.into());
        self
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RemoteKind::Folder)
    }

    pub fn mime_type(&self) -> Option<&str> {
        match &self.kind {
            RemoteKind::File { mime_type } => mime_type.as_deref(),
            RemoteKind::Folder => None,
        }
    }
}

/// Listing collaborator
///
/// Returns the complete flat list of objects for one backend, already
/// deduplicated and fully paginated. Retry and rate limiting are the
/// implementation's concern.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Human-readable backend name used in logs and reports
    fn backend_name(&self) -> &str;

    async fn list_objects(&self) -> Result<Vec<RemoteObject>>;
}

/// Metadata copied from a source object onto its destination counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPayload {
    pub owner_name: String,
    /// Used by sinks that re-assign ownership
    #[serde(default)]
    pub owner_email: String,
    pub created_time: String,
    pub last_modified_by_name: String,
    pub last_modified_time: String,
}

/// Successful result of a metadata write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Metadata did not exist and was written
    Written,
    /// Metadata already existed and was left untouched
    AlreadyPresent,
}

/// Metadata sink collaborator
///
/// Implementations must be idempotent: writing to an object that already
/// carries the metadata yields `Ok(WriteOutcome::AlreadyPresent)`, never an
/// overwrite and never an error. `Err` is reserved for genuine write failures.
#[async_trait]
pub trait MetadataSink: Send + Sync {
    async fn apply_metadata(
        &self,
        object_id: &str,
        payload: &MetadataPayload,
    ) -> Result<WriteOutcome>;
}
