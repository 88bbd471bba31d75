//! The materialized tree and its path queries.

use std::sync::Arc;

use tracing::debug;

use crate::error::{HierarchyError, Result};
use crate::node::{Node, NodeId};
use crate::user::{User, UserRegistry};

/// One backend's tree, path-annotated and immutable once built
///
/// Nodes live in an arena indexed by [`NodeId`]. The root is always
/// `NodeId(0)`.
#[derive(Debug)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    folders: Vec<NodeId>,
    files: Vec<NodeId>,
    child_folders: Vec<Vec<NodeId>>,
    child_files: Vec<Vec<NodeId>>,
    pub(crate) users: UserRegistry,
}

impl Hierarchy {
    pub(crate) fn with_root(mut root: Node) -> Self {
        root.parent = None;
        root.depth = 0;
        Self {
            nodes: vec![root],
            folders: vec![NodeId(0)],
            files: Vec::new(),
            child_folders: vec![Vec::new()],
            child_files: vec![Vec::new()],
            users: UserRegistry::new(),
        }
    }

    /// Path a child called `name` of `parent` receives
    pub(crate) fn child_path(&self, parent: NodeId, name: &str) -> String {
        format!("{}/{}", self.nodes[parent.0].path, name)
    }

    /// Attach a node under an already-materialized folder.
    ///
    /// Fills in `parent`, `path` and `depth`.
    pub(crate) fn attach(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.path = self.child_path(parent, &node.name);
        node.depth = self.nodes[parent.0].depth + 1;
        node.parent = Some(parent);

        if node.is_folder() {
            self.folders.push(id);
            self.child_folders[parent.0].push(id);
        } else {
            self.files.push(id);
            self.child_files[parent.0].push(id);
        }

        self.nodes.push(node);
        self.child_folders.push(Vec::new());
        self.child_files.push(Vec::new());
        id
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.parent.and_then(|id| self.node(id))
    }

    /// All folders in materialization order, root first
    pub fn folders(&self) -> impl Iterator<Item = &Node> + '_ {
        self.folders.iter().map(move |id| &self.nodes[id.0])
    }

    pub fn files(&self) -> impl Iterator<Item = &Node> + '_ {
        self.files.iter().map(move |id| &self.nodes[id.0])
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Direct subfolders of `folder`, in input order
    pub fn subfolders(&self, folder: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.child_folders
            .get(folder.0)
            .into_iter()
            .flatten()
            .map(move |id| &self.nodes[id.0])
    }

    /// Files directly inside `folder`, in input order
    pub fn folder_files(&self, folder: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.child_files
            .get(folder.0)
            .into_iter()
            .flatten()
            .map(move |id| &self.nodes[id.0])
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Registered user for `email`
    pub fn user(&self, email: &str) -> Option<&Arc<User>> {
        self.users.get(email)
    }

    /// First file whose path equals `path`
    pub fn get_file(&self, path: &str) -> Option<&Node> {
        let found = self.files().find(|node| node.path == path);
        if found.is_none() {
            debug!(path, "No file at path");
        }
        found
    }

    /// First folder whose path equals `path`
    pub fn get_folder(&self, path: &str) -> Option<&Node> {
        let found = self.folders().find(|node| node.path == path);
        if found.is_none() {
            debug!(path, "No folder at path");
        }
        found
    }

    /// Every file at `path`; more than one means the backend holds duplicates
    pub fn files_at(&self, path: &str) -> Vec<&Node> {
        self.files().filter(|node| node.path == path).collect()
    }

    /// Lines of a depth-first rendering starting at `root_path`
    ///
    /// Each folder is followed by its files, then by its subfolders. Lines are
    /// indented two spaces per level below the starting folder. The returned
    /// iterator is lazy and can be cloned to restart.
    pub fn print(&self, root_path: Option<&str>, verbose: bool) -> Result<TreeLines<'_>> {
        let start = match root_path {
            None => self.root_id(),
            Some(path) => self
                .folders
                .iter()
                .copied()
                .find(|id| self.nodes[id.0].path == path)
                .ok_or_else(|| HierarchyError::FolderNotFound {
                    path: path.to_string(),
                })?,
        };

        Ok(TreeLines {
            hierarchy: self,
            base_depth: self.nodes[start.0].depth,
            stack: vec![start],
            verbose,
        })
    }
}

/// Lazy line iterator returned by [`Hierarchy::print`]
#[derive(Debug, Clone)]
pub struct TreeLines<'a> {
    hierarchy: &'a Hierarchy,
    base_depth: usize,
    stack: Vec<NodeId>,
    verbose: bool,
}

impl Iterator for TreeLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let id = self.stack.pop()?;
        let hierarchy = self.hierarchy;
        let node = &hierarchy.nodes[id.0];

        if node.is_folder() {
            // Reversed so the stack pops in input order: files, then subfolders
            self.stack
                .extend(hierarchy.child_folders[id.0].iter().rev().copied());
            self.stack
                .extend(hierarchy.child_files[id.0].iter().rev().copied());
        }

        let indent = "  ".repeat(node.depth - self.base_depth);
        let label = if self.verbose {
            node.verbose_line()
        } else {
            node.name.clone()
        };
        Some(format!("{}{}", indent, label))
    }
}
