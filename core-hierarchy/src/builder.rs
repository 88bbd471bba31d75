//! Flat listing to [`Hierarchy`] conversion.

use std::collections::{HashMap, HashSet};

use bridge_traits::storage::{ObjectLister, RemoteKind, RemoteObject};
use core_runtime::config::TreeOptions;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{HierarchyError, Result};
use crate::hierarchy::Hierarchy;
use crate::names::node_name;
use crate::node::{Node, NodeId, NodeKind};
use crate::user::UserRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Folder,
    File,
}

/// An object whose parent chain never reaches the backend root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedObject {
    pub id: String,
    pub name: String,
    pub kind: ObjectKind,
    pub parent_ids: Vec<String>,
}

/// Non-fatal findings from one build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    /// Objects with an unresolvable or cyclic parent chain
    pub orphans: Vec<OrphanedObject>,
    /// Objects outside the selected root directory
    pub pruned: usize,
    /// Parentless folders attached under the backend root
    pub reparented: usize,
    /// Objects listing more than one parent
    pub multi_parent: usize,
}

impl BuildDiagnostics {
    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }
}

#[derive(Debug)]
pub struct BuildOutput {
    pub hierarchy: Hierarchy,
    pub diagnostics: BuildDiagnostics,
}

/// Builds a [`Hierarchy`] from an unordered flat listing
///
/// The backend root is the first parentless folder in the listing. A folder
/// with several listed parents hangs under the first of them reached by the
/// pre-order walk from the selected root; a file hangs under the first of
/// its listed parents that made it into the tree.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: TreeOptions,
}

impl TreeBuilder {
    pub fn new(options: TreeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// List every object through `lister` and build from the result.
    #[instrument(skip(self, lister), fields(backend = lister.backend_name()))]
    pub async fn build_from(&self, lister: &dyn ObjectLister) -> Result<BuildOutput> {
        let objects = lister.list_objects().await?;
        self.build(&objects)
    }

    /// Build the hierarchy.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::RootNotFound`] when the listing has no parentless
    /// folder or a root directory segment names no child folder.
    #[instrument(skip(self, objects), fields(prefix = %self.options.path_prefix))]
    pub fn build(&self, objects: &[RemoteObject]) -> Result<BuildOutput> {
        info!(objects = objects.len(), "Building hierarchy");

        let mut diagnostics = BuildDiagnostics::default();

        let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(objects.len());
        for (index, object) in objects.iter().enumerate() {
            by_id.entry(object.id.as_str()).or_insert(index);
        }

        let backend_root = objects
            .iter()
            .position(|object| object.is_folder() && object.parent_ids.is_empty())
            .ok_or_else(|| HierarchyError::RootNotFound {
                path: self.options.path_prefix.clone(),
            })?;

        let parents = self.candidate_parents(objects, &by_id, backend_root, &mut diagnostics);

        let mut child_folders: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, candidates) in parents.iter().enumerate() {
            if objects[index].is_folder() {
                for parent in candidates {
                    child_folders.entry(*parent).or_default().push(index);
                }
            }
        }

        let selected_root = self.resolve_root(objects, &child_folders, backend_root)?;

        let mut users = UserRegistry::new();
        let mut root = make_node(
            &mut users,
            &objects[selected_root],
            self.options.path_prefix.clone(),
        );
        root.path = self.options.path_prefix.clone();

        let mut hierarchy = Hierarchy::with_root(root);
        let mut materialized: HashMap<usize, NodeId> = HashMap::with_capacity(objects.len());
        materialized.insert(selected_root, hierarchy.root_id());

        // Pre-order over folders so a parent's path always exists first.
        // A folder with several parents lands under the first one reached.
        let mut stack: Vec<(usize, NodeId)> = Vec::new();
        push_children(&mut stack, &child_folders, selected_root, hierarchy.root_id());

        while let Some((index, parent)) = stack.pop() {
            if materialized.contains_key(&index) {
                continue;
            }
            let object = &objects[index];
            let node = make_node(&mut users, object, node_name(&object.name, None));
            let id = hierarchy.attach(parent, node);
            materialized.insert(index, id);
            push_children(&mut stack, &child_folders, index, id);
        }

        for (index, object) in objects.iter().enumerate() {
            let RemoteKind::File { mime_type } = &object.kind else {
                continue;
            };
            let Some(parent) = parents[index]
                .iter()
                .find_map(|parent| materialized.get(parent).copied())
            else {
                continue;
            };
            let name = node_name(&object.name, mime_type.as_deref());
            let node = make_node(&mut users, object, name);
            let id = hierarchy.attach(parent, node);
            materialized.insert(index, id);
        }

        hierarchy.users = users;

        self.classify_unattached(
            objects,
            &child_folders,
            &parents,
            &materialized,
            backend_root,
            &mut diagnostics,
        );

        info!(
            folders = hierarchy.folder_count(),
            files = hierarchy.file_count(),
            orphans = diagnostics.orphan_count(),
            pruned = diagnostics.pruned,
            "Hierarchy built"
        );

        Ok(BuildOutput {
            hierarchy,
            diagnostics,
        })
    }

    /// Listed folder parents of every object, in listing order
    fn candidate_parents(
        &self,
        objects: &[RemoteObject],
        by_id: &HashMap<&str, usize>,
        backend_root: usize,
        diagnostics: &mut BuildDiagnostics,
    ) -> Vec<Vec<usize>> {
        objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                if index == backend_root {
                    return Vec::new();
                }

                if object.parent_ids.len() > 1 {
                    diagnostics.multi_parent += 1;
                }

                if object.parent_ids.is_empty() && object.is_folder() {
                    debug!(id = %object.id, name = %object.name, "Attaching parentless folder to root");
                    diagnostics.reparented += 1;
                    return vec![backend_root];
                }

                let mut candidates: Vec<usize> = Vec::new();
                for parent_id in &object.parent_ids {
                    if *parent_id == object.id {
                        continue;
                    }
                    let Some(parent) = by_id.get(parent_id.as_str()).copied() else {
                        continue;
                    };
                    let usable = parent != index && objects[parent].is_folder();
                    if usable && !candidates.contains(&parent) {
                        candidates.push(parent);
                    }
                }
                candidates
            })
            .collect()
    }

    /// Walk the root directory segments down from the backend root
    fn resolve_root(
        &self,
        objects: &[RemoteObject],
        child_folders: &HashMap<usize, Vec<usize>>,
        backend_root: usize,
    ) -> Result<usize> {
        let segments = self.options.root_segments();
        let mut current = backend_root;

        for (depth, segment) in segments.iter().enumerate() {
            let next = child_folders.get(&current).and_then(|children| {
                children
                    .iter()
                    .copied()
                    .find(|child| {
                        let raw = objects[*child].name.as_str();
                        raw == *segment || node_name(raw, None) == *segment
                    })
            });

            current = next.ok_or_else(|| HierarchyError::RootNotFound {
                path: format!(
                    "{}/{}",
                    self.options.path_prefix,
                    segments[..=depth].join("/")
                ),
            })?;
        }

        if current != backend_root {
            debug!(id = %objects[current].id, "Using sub-folder as root");
        }

        Ok(current)
    }

    fn classify_unattached(
        &self,
        objects: &[RemoteObject],
        child_folders: &HashMap<usize, Vec<usize>>,
        parents: &[Vec<usize>],
        materialized: &HashMap<usize, NodeId>,
        backend_root: usize,
        diagnostics: &mut BuildDiagnostics,
    ) {
        let rooted = reachable_folders(child_folders, backend_root);

        for (index, object) in objects.iter().enumerate() {
            if materialized.contains_key(&index) {
                continue;
            }

            let reaches_root = rooted.contains(&index)
                || parents[index].iter().any(|parent| rooted.contains(parent));

            if reaches_root {
                debug!(id = %object.id, name = %object.name, "Outside selected root");
                diagnostics.pruned += 1;
            } else {
                warn!(
                    id = %object.id,
                    name = %object.name,
                    parents = ?object.parent_ids,
                    "Orphaned object"
                );
                diagnostics.orphans.push(OrphanedObject {
                    id: object.id.clone(),
                    name: object.name.clone(),
                    kind: if object.is_folder() {
                        ObjectKind::Folder
                    } else {
                        ObjectKind::File
                    },
                    parent_ids: object.parent_ids.clone(),
                });
            }
        }
    }
}

fn push_children(
    stack: &mut Vec<(usize, NodeId)>,
    child_folders: &HashMap<usize, Vec<usize>>,
    index: usize,
    id: NodeId,
) {
    if let Some(children) = child_folders.get(&index) {
        stack.extend(children.iter().rev().map(|child| (*child, id)));
    }
}

/// Folders connected to the backend root through any of their parents
fn reachable_folders(
    child_folders: &HashMap<usize, Vec<usize>>,
    backend_root: usize,
) -> HashSet<usize> {
    let mut seen = HashSet::from([backend_root]);
    let mut pending = vec![backend_root];

    while let Some(index) = pending.pop() {
        for child in child_folders.get(&index).into_iter().flatten() {
            if seen.insert(*child) {
                pending.push(*child);
            }
        }
    }
    seen
}

fn make_node(users: &mut UserRegistry, object: &RemoteObject, name: String) -> Node {
    let owner = users.intern(&object.owner.email, &object.owner.display_name);
    let last_modified_by = match &object.last_modifying_user {
        Some(user) => users.intern(&user.email, &user.display_name),
        None => owner.clone(),
    };

    let created_time = object.created_time.clone().unwrap_or_default();
    let last_modified_time = object
        .last_modified_time
        .clone()
        .unwrap_or_else(|| created_time.clone());

    let kind = match &object.kind {
        RemoteKind::Folder => NodeKind::Folder,
        RemoteKind::File { mime_type } => NodeKind::File {
            mime_type: mime_type.clone(),
        },
    };

    Node {
        id: object.id.clone(),
        name,
        kind,
        owner,
        last_modified_by,
        created_time,
        last_modified_time,
        parent: None,
        path: String::new(),
        depth: 0,
    }
}
