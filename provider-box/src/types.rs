//! Box API response types
//!
//! Data structures for deserializing Box Content API folder listings.

use serde::{Deserialize, Serialize};

/// Id Box gives every account's root folder ("All Files")
pub const ROOT_FOLDER_ID: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxItemType {
    File,
    Folder,
    WebLink,
}

impl std::fmt::Display for BoxItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxItemType::File => write!(f, "file"),
            BoxItemType::Folder => write!(f, "folder"),
            BoxItemType::WebLink => write!(f, "web_link"),
        }
    }
}

/// Mini user resource (`owned_by`, `modified_by`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub login: String,
}

/// File, folder or web link as returned inside a folder listing
///
/// See: https://developer.box.com/reference/resources/folder/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxItem {
    #[serde(rename = "type")]
    pub item_type: BoxItemType,

    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<BoxUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<BoxUser>,

    /// Present on folders fetched with their items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection: Option<BoxItemCollection>,
}

impl BoxItem {
    pub fn is_folder(&self) -> bool {
        self.item_type == BoxItemType::Folder
    }
}

/// One page of folder items
///
/// See: https://developer.box.com/reference/get-folders-id-items/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxItemCollection {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub entries: Vec<BoxItem>,

    #[serde(default)]
    pub offset: u64,

    #[serde(default)]
    pub limit: u64,
}

impl BoxItemCollection {
    /// Offset of the following page, if one remains
    pub fn next_offset(&self) -> Option<u64> {
        let next = self.offset + self.entries.len() as u64;
        (!self.entries.is_empty() && next < self.total_count).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_folder_with_items() {
        let json = r#"{
            "type": "folder",
            "id": "0",
            "name": "All Files",
            "owned_by": { "type": "user", "id": "11", "name": "Admin", "login": "admin@example.com" },
            "item_collection": {
                "total_count": 2,
                "offset": 0,
                "limit": 100,
                "entries": [
                    { "type": "folder", "id": "12", "name": "Team" },
                    { "type": "web_link", "id": "13", "name": "Wiki" }
                ]
            }
        }"#;

        let folder: BoxItem = serde_json::from_str(json).unwrap();
        assert!(folder.is_folder());
        assert_eq!(folder.owned_by.unwrap().login, "admin@example.com");

        let items = folder.item_collection.unwrap();
        assert_eq!(items.entries[1].item_type, BoxItemType::WebLink);
        assert!(items.next_offset().is_none());
    }

    #[test]
    fn test_next_offset() {
        let page = BoxItemCollection {
            total_count: 250,
            entries: vec![
                BoxItem {
                    item_type: BoxItemType::File,
                    id: "1".into(),
                    name: "a.txt".into(),
                    created_at: None,
                    modified_at: None,
                    owned_by: None,
                    modified_by: None,
                    item_collection: None,
                };
                100
            ],
            offset: 100,
            limit: 100,
        };

        assert_eq!(page.next_offset(), Some(200));
    }
}
