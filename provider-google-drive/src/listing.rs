//! Drive file resources to flat remote objects
//!
//! The host performs the `files.list` calls (see [`list_query`]) and feeds
//! each page into a [`DriveListing`], which then serves as the
//! [`ObjectLister`] for the source side.

use std::collections::HashSet;

use async_trait::async_trait;
use bridge_traits::storage::{ObjectLister, RemoteKind, RemoteObject, RemoteUser};
use tracing::{debug, info};

use crate::error::{GoogleDriveError, Result};
use crate::types::{DriveFile, DriveUser, FilesListResponse};

/// Maximum results per page (Google Drive API limit)
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Fields to request for file resources
pub const FILE_FIELDS: &str =
    "nextPageToken, files(id, mimeType, name, owners, parents, modifiedTime, lastModifyingUser, createdTime)";

/// Only live files take part in a migration
pub const LIST_QUERY: &str = "trashed = false";

/// Query parameters for one `files.list` request
pub fn list_query(page_token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", LIST_QUERY.to_string()),
        ("pageSize", MAX_PAGE_SIZE.to_string()),
        ("fields", FILE_FIELDS.to_string()),
    ];
    if let Some(token) = page_token {
        params.push(("pageToken", token.to_string()));
    }
    params
}

/// Parse a raw `files.list` response body
pub fn parse_page(body: &str) -> Result<FilesListResponse> {
    Ok(serde_json::from_str(body)?)
}

fn convert_user(user: &DriveUser) -> Option<RemoteUser> {
    user.email_address
        .as_ref()
        .map(|email| RemoteUser::new(user.display_name.clone(), email.clone()))
}

/// Convert a Drive file resource into a flat remote object
///
/// The first owner is used. A modifier without an email is dropped so the
/// owner stands in for it.
pub fn convert_file(file: DriveFile) -> Result<RemoteObject> {
    let owner = file
        .owners
        .first()
        .and_then(convert_user)
        .ok_or_else(|| GoogleDriveError::MissingOwner {
            file_id: file.id.clone(),
        })?;

    let kind = if file.is_folder() {
        RemoteKind::Folder
    } else {
        RemoteKind::File {
            mime_type: Some(file.mime_type.clone()),
        }
    };

    Ok(RemoteObject {
        id: file.id,
        name: file.name,
        kind,
        owner,
        last_modifying_user: file.last_modifying_user.as_ref().and_then(convert_user),
        created_time: file.created_time,
        last_modified_time: file.modified_time,
        parent_ids: file.parents,
    })
}

/// Accumulated Drive listing, rooted at the account's `root` folder
///
/// `files.list` never returns the root itself, so it is supplied up front
/// (from `files.get` on `root`). Repeated ids across pages are kept once.
#[derive(Debug, Clone)]
pub struct DriveListing {
    name: String,
    objects: Vec<RemoteObject>,
    seen: HashSet<String>,
    pages: usize,
}

impl DriveListing {
    pub fn new(name: impl Into<String>, root: DriveFile) -> Result<Self> {
        if !root.is_folder() {
            return Err(GoogleDriveError::UnexpectedItemType {
                file_id: root.id,
                mime_type: root.mime_type,
            });
        }

        let mut root = convert_file(root)?;
        root.parent_ids.clear();

        let mut seen = HashSet::new();
        seen.insert(root.id.clone());

        Ok(Self {
            name: name.into(),
            objects: vec![root],
            seen,
            pages: 0,
        })
    }

    /// Add one page; returns the token for the next request, if any
    pub fn push_page(&mut self, page: FilesListResponse) -> Result<Option<String>> {
        self.pages += 1;
        for file in page.files {
            if file.trashed {
                continue;
            }
            if !self.seen.insert(file.id.clone()) {
                debug!(id = %file.id, "Skipping repeated file");
                continue;
            }
            let object = convert_file(file)?;
            debug!(
                id = %object.id,
                folder = object.is_folder(),
                "Listed object"
            );
            self.objects.push(object);
        }
        Ok(page.next_page_token)
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn objects(&self) -> &[RemoteObject] {
        &self.objects
    }
}

#[async_trait]
impl ObjectLister for DriveListing {
    fn backend_name(&self) -> &str {
        &self.name
    }

    async fn list_objects(&self) -> bridge_traits::error::Result<Vec<RemoteObject>> {
        info!(
            pages = self.pages,
            objects = self.objects.len(),
            "Found pages of results for {}",
            self.name
        );
        Ok(self.objects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FOLDER_MIME_TYPE;

    fn alice() -> DriveUser {
        DriveUser {
            display_name: "Alice".to_string(),
            email_address: Some("alice@example.com".to_string()),
        }
    }

    fn drive_file(id: &str, name: &str, mime_type: &str, parent: Option<&str>) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            owners: vec![alice()],
            last_modifying_user: None,
            parents: parent.map(|p| vec![p.to_string()]).unwrap_or_default(),
            created_time: Some("2023-01-01T00:00:00.000Z".to_string()),
            modified_time: Some("2023-01-02T00:00:00.000Z".to_string()),
            trashed: false,
        }
    }

    #[test]
    fn test_convert_file() {
        let file = drive_file("f1", "Plan", "application/vnd.google-apps.document", Some("d1"));

        let object = convert_file(file).unwrap();

        assert_eq!(object.id, "f1");
        assert_eq!(object.mime_type(), Some("application/vnd.google-apps.document"));
        assert_eq!(object.owner.email, "alice@example.com");
        assert_eq!(object.parent_ids, vec!["d1".to_string()]);
        assert_eq!(object.last_modified_time.as_deref(), Some("2023-01-02T00:00:00.000Z"));
    }

    #[test]
    fn test_convert_folder() {
        let object = convert_file(drive_file("d1", "Team", FOLDER_MIME_TYPE, None)).unwrap();
        assert!(object.is_folder());
    }

    #[test]
    fn test_modifier_without_email_is_dropped() {
        let mut file = drive_file("f1", "a.txt", "text/plain", Some("d1"));
        file.last_modifying_user = Some(DriveUser {
            display_name: "Former Employee".to_string(),
            email_address: None,
        });

        let object = convert_file(file).unwrap();
        assert!(object.last_modifying_user.is_none());
    }

    #[test]
    fn test_missing_owner() {
        let mut file = drive_file("f1", "a.txt", "text/plain", Some("d1"));
        file.owners.clear();

        assert!(matches!(
            convert_file(file),
            Err(GoogleDriveError::MissingOwner { file_id }) if file_id == "f1"
        ));
    }

    #[test]
    fn test_list_query() {
        let first = list_query(None);
        assert!(first.contains(&("q", "trashed = false".to_string())));
        assert!(first.iter().all(|(key, _)| *key != "pageToken"));

        let next = list_query(Some("abc"));
        assert!(next.contains(&("pageToken", "abc".to_string())));
    }

    #[test]
    fn test_listing_pages() {
        let mut root = drive_file("root", "My Drive", FOLDER_MIME_TYPE, None);
        root.parents = vec!["ignored".to_string()];
        let mut listing = DriveListing::new("drive", root).unwrap();

        let page = parse_page(
            r#"{
                "nextPageToken": "p2",
                "files": [
                    {
                        "id": "d1", "name": "Team",
                        "mimeType": "application/vnd.google-apps.folder",
                        "owners": [{ "displayName": "Alice", "emailAddress": "alice@example.com" }],
                        "parents": ["root"]
                    },
                    {
                        "id": "f1", "name": "a.txt", "mimeType": "text/plain",
                        "owners": [{ "displayName": "Alice", "emailAddress": "alice@example.com" }],
                        "parents": ["d1"]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(listing.push_page(page).unwrap().as_deref(), Some("p2"));

        let mut trashed = drive_file("f2", "old.txt", "text/plain", Some("d1"));
        trashed.trashed = true;
        let repeat = drive_file("f1", "a.txt", "text/plain", Some("d1"));
        let last = FilesListResponse {
            files: vec![trashed, repeat],
            next_page_token: None,
            incomplete_search: false,
        };
        assert!(listing.push_page(last).unwrap().is_none());

        assert_eq!(listing.page_count(), 2);
        let ids: Vec<&str> = listing.objects().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "d1", "f1"]);
        assert!(listing.objects()[0].parent_ids.is_empty());
    }

    #[test]
    fn test_root_must_be_folder() {
        let root = drive_file("root", "notes.txt", "text/plain", None);
        assert!(matches!(
            DriveListing::new("drive", root),
            Err(GoogleDriveError::UnexpectedItemType { .. })
        ));
    }

    #[test]
    fn test_parse_page_rejects_garbage() {
        assert!(matches!(parse_page("{"), Err(GoogleDriveError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_list_objects() {
        let listing =
            DriveListing::new("drive", drive_file("root", "My Drive", FOLDER_MIME_TYPE, None))
                .unwrap();

        let objects = listing.list_objects().await.unwrap();
        assert_eq!(listing.backend_name(), "drive");
        assert_eq!(objects.len(), 1);
    }
}
