use std::fmt;
use std::sync::Arc;

use crate::user::User;

/// Index of a node inside its [`Hierarchy`](crate::Hierarchy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File { mime_type: Option<String> },
}

/// A folder or file placed in a hierarchy
///
/// `path` is assigned when the node is created, after its parent already has
/// one, and never changes.
#[derive(Debug, Clone)]
pub struct Node {
    /// Backend identifier
    pub id: String,
    /// Normalized (and for rich documents, extension-repaired) name
    pub name: String,
    pub kind: NodeKind,
    pub owner: Arc<User>,
    pub last_modified_by: Arc<User>,
    pub created_time: String,
    pub last_modified_time: String,
    pub parent: Option<NodeId>,
    pub(crate) path: String,
    pub(crate) depth: usize,
}

impl Node {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Distance from the root (root is 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    pub fn is_file(&self) -> bool {
        !self.is_folder()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// `id name (owner) (last modified) (last modifier email)`
    pub fn verbose_line(&self) -> String {
        format!(
            "{} {} ({}) ({}) ({})",
            self.id,
            self.name,
            self.owner.display_name,
            self.last_modified_time,
            self.last_modified_by.email
        )
    }
}
