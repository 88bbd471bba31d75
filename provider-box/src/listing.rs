//! Box folder listings to flat remote objects
//!
//! Box returns the tree one folder at a time. The host feeds the root folder
//! and every further page of items into a [`BoxListing`], which flattens the
//! nested collections into parent-referencing objects.

use std::collections::HashMap;

use async_trait::async_trait;
use bridge_traits::storage::{ObjectLister, RemoteObject, RemoteUser};
use tracing::{debug, info};

use crate::error::{BoxError, Result};
use crate::types::{BoxItem, BoxItemCollection, BoxItemType, BoxUser};

/// Parse a `GET /folders/{id}` response body
pub fn parse_folder(body: &str) -> Result<BoxItem> {
    Ok(serde_json::from_str(body)?)
}

/// Parse a `GET /folders/{id}/items` response body
pub fn parse_items(body: &str) -> Result<BoxItemCollection> {
    Ok(serde_json::from_str(body)?)
}

fn convert_user(user: &BoxUser) -> RemoteUser {
    RemoteUser::new(user.name.clone(), user.login.clone())
}

/// Accumulated Box listing for the destination side
///
/// Items listed without `owned_by` inherit their parent folder's owner.
#[derive(Debug, Clone)]
pub struct BoxListing {
    name: String,
    objects: Vec<RemoteObject>,
    positions: HashMap<String, usize>,
}

impl BoxListing {
    /// Start from the root folder (normally id `"0"`), flattening any items
    /// it was fetched with
    pub fn new(name: impl Into<String>, mut root: BoxItem) -> Result<Self> {
        if !root.is_folder() {
            return Err(BoxError::UnexpectedItemType {
                item_id: root.id,
                item_type: root.item_type.to_string(),
            });
        }

        let owner = root
            .owned_by
            .as_ref()
            .map(convert_user)
            .ok_or_else(|| BoxError::MissingOwner {
                item_id: root.id.clone(),
            })?;

        let items = root.item_collection.take().unwrap_or_default();
        let root_id = root.id.clone();

        let mut object = RemoteObject::folder(root.id, root.name, owner);
        object.last_modifying_user = root.modified_by.as_ref().map(convert_user);
        object.created_time = root.created_at;
        object.last_modified_time = root.modified_at;

        let mut listing = Self {
            name: name.into(),
            positions: HashMap::from([(root_id.clone(), 0)]),
            objects: vec![object],
        };
        listing.add_items(&root_id, items)?;
        Ok(listing)
    }

    /// Add one page of items belonging to `parent_id`
    pub fn add_items(&mut self, parent_id: &str, page: BoxItemCollection) -> Result<()> {
        let mut stack: Vec<(String, BoxItem)> = page
            .entries
            .into_iter()
            .rev()
            .map(|item| (parent_id.to_string(), item))
            .collect();

        while let Some((parent_id, mut item)) = stack.pop() {
            if item.item_type == BoxItemType::WebLink {
                debug!(id = %item.id, "Skipping web link");
                continue;
            }
            if self.positions.contains_key(&item.id) {
                debug!(id = %item.id, "Skipping repeated item");
                continue;
            }

            let owner = match (&item.owned_by, self.positions.get(&parent_id)) {
                (Some(user), _) => convert_user(user),
                (None, Some(position)) => self.objects[*position].owner.clone(),
                (None, None) => {
                    return Err(BoxError::MissingOwner {
                        item_id: item.id.clone(),
                    })
                }
            };

            if let Some(children) = item.item_collection.take() {
                stack.extend(
                    children
                        .entries
                        .into_iter()
                        .rev()
                        .map(|child| (item.id.clone(), child)),
                );
            }

            let mut object = if item.is_folder() {
                RemoteObject::folder(item.id.clone(), item.name, owner)
            } else {
                RemoteObject::file(item.id.clone(), item.name, owner, None)
            };
            object.last_modifying_user = item.modified_by.as_ref().map(convert_user);
            object.created_time = item.created_at;
            object.last_modified_time = item.modified_at;
            object.parent_ids.push(parent_id);

            self.positions.insert(item.id, self.objects.len());
            self.objects.push(object);
        }

        Ok(())
    }

    /// Ids of every listed folder, for hosts fetching items folder by folder
    pub fn folder_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects
            .iter()
            .filter(|object| object.is_folder())
            .map(|object| object.id.as_str())
    }

    pub fn objects(&self) -> &[RemoteObject] {
        &self.objects
    }
}

#[async_trait]
impl ObjectLister for BoxListing {
    fn backend_name(&self) -> &str {
        &self.name
    }

    async fn list_objects(&self) -> bridge_traits::error::Result<Vec<RemoteObject>> {
        info!(objects = self.objects.len(), "Listed {}", self.name);
        Ok(self.objects.clone())
    }
}
