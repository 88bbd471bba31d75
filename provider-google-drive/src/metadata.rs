//! Drive-to-Drive metadata writes.
//!
//! The destination file gets the source's `modifiedTime` through
//! `files.update`. With an owner domain configured, ownership is also
//! transferred to the source owner's account under that domain.

use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{MetadataPayload, MetadataSink, WriteOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{GoogleDriveError, Result};

/// Google Drive API v3 base URL
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Options for [`DriveMetadataSink`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveUpdateOptions {
    /// Domain owners move to, e.g. `new.example.com`; owners are left alone when absent
    pub owner_domain: Option<String>,
}

impl DriveUpdateOptions {
    pub fn with_owner_domain(mut self, domain: impl Into<String>) -> Self {
        self.owner_domain = Some(domain.into());
        self
    }
}

/// Swap the domain part of `email` for `new_domain`.
pub fn convert_to_new_domain(email: &str, new_domain: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    format!("{}@{}", local, new_domain)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedTimeBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
}

/// Body of a `permissions.create` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionBody {
    pub email_address: String,
    pub role: String,
    #[serde(rename = "type")]
    pub permission_type: String,
}

impl PermissionBody {
    pub fn owner(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
            role: "owner".to_string(),
            permission_type: "user".to_string(),
        }
    }
}

pub fn file_url(file_id: &str) -> String {
    format!("{}/files/{}", DRIVE_API_BASE, file_id)
}

pub fn owner_permission_url(file_id: &str) -> String {
    format!(
        "{}/files/{}/permissions?transferOwnership=true&sendNotificationEmail=true",
        DRIVE_API_BASE, file_id
    )
}

/// Copies modification times (and optionally ownership) onto Drive files
///
/// The current `modifiedTime` is read first. A file that already carries the
/// source time is reported as [`WriteOutcome::AlreadyPresent`] and left
/// untouched, ownership included.
pub struct DriveMetadataSink {
    http_client: Arc<dyn HttpClient>,
    options: DriveUpdateOptions,
}

impl DriveMetadataSink {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_options(http_client, DriveUpdateOptions::default())
    }

    pub fn with_options(http_client: Arc<dyn HttpClient>, options: DriveUpdateOptions) -> Self {
        Self {
            http_client,
            options,
        }
    }

    async fn send(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let response = self.http_client.execute(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(api_error(&response).into())
        }
    }

    async fn current_modified_time(&self, file_id: &str) -> BridgeResult<Option<String>> {
        let url = format!("{}?fields=modifiedTime", file_url(file_id));
        let response = self.send(HttpRequest::new(HttpMethod::Get, url)).await?;
        let body: ModifiedTimeBody = response.json()?;
        Ok(body.modified_time)
    }
}

fn api_error(response: &HttpResponse) -> GoogleDriveError {
    GoogleDriveError::ApiError {
        status: response.status,
        message: response.text().unwrap_or_default(),
    }
}

fn new_owner(
    options: &DriveUpdateOptions,
    file_id: &str,
    payload: &MetadataPayload,
) -> Result<Option<String>> {
    let Some(domain) = options.owner_domain.as_deref() else {
        return Ok(None);
    };
    if payload.owner_email.is_empty() {
        return Err(GoogleDriveError::MissingOwner {
            file_id: file_id.to_string(),
        });
    }
    Ok(Some(convert_to_new_domain(&payload.owner_email, domain)))
}

#[async_trait]
impl MetadataSink for DriveMetadataSink {
    #[instrument(skip(self, payload))]
    async fn apply_metadata(
        &self,
        object_id: &str,
        payload: &MetadataPayload,
    ) -> BridgeResult<WriteOutcome> {
        let owner = new_owner(&self.options, object_id, payload)?;

        let current = self.current_modified_time(object_id).await?;
        if current.as_deref() == Some(payload.last_modified_time.as_str()) {
            debug!("Modified time already matches, skipping");
            return Ok(WriteOutcome::AlreadyPresent);
        }

        let body = ModifiedTimeBody {
            modified_time: Some(payload.last_modified_time.clone()),
        };
        self.send(HttpRequest::new(HttpMethod::Patch, file_url(object_id)).json(&body)?)
            .await?;
        debug!(modified_time = %payload.last_modified_time, "Modified time updated");

        if let Some(owner) = owner {
            let request = HttpRequest::new(HttpMethod::Post, owner_permission_url(object_id))
                .json(&PermissionBody::owner(owner.as_str()))?;
            self.send(request).await?;
            info!(owner = %owner, "Ownership transferred");
        }

        Ok(WriteOutcome::Written)
    }
}
