//! `enterprise/legacyData` metadata template and the sink that writes it.

use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::storage::{MetadataPayload, MetadataSink, WriteOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::BoxError;

/// Box Content API base URL
pub const BOX_API_BASE: &str = "https://api.box.com/2.0";

pub const METADATA_SCOPE: &str = "enterprise";
pub const METADATA_TEMPLATE: &str = "legacyData";

/// Instance body for the `legacyData` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyData {
    pub owner: String,
    #[serde(rename = "legacyCreatedDate")]
    pub legacy_created_date: String,
    #[serde(rename = "legacyLastModifyingUser")]
    pub legacy_last_modifying_user: String,
    #[serde(rename = "legacyLastModifiedDate")]
    pub legacy_last_modified_date: String,
}

impl From<&MetadataPayload> for LegacyData {
    fn from(payload: &MetadataPayload) -> Self {
        Self {
            owner: payload.owner_name.clone(),
            legacy_created_date: payload.created_time.clone(),
            legacy_last_modifying_user: payload.last_modified_by_name.clone(),
            legacy_last_modified_date: payload.last_modified_time.clone(),
        }
    }
}

pub fn metadata_url(file_id: &str) -> String {
    format!(
        "{}/files/{}/metadata/{}/{}",
        BOX_API_BASE, file_id, METADATA_SCOPE, METADATA_TEMPLATE
    )
}

/// Writes legacy metadata onto Box files
///
/// Creation is attempted directly; Box answers `409 Conflict` when the file
/// already carries an instance of the template, which maps to
/// [`WriteOutcome::AlreadyPresent`]. Existing instances are never updated.
pub struct BoxMetadataSink {
    http_client: Arc<dyn HttpClient>,
}

impl BoxMetadataSink {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl MetadataSink for BoxMetadataSink {
    #[instrument(skip(self, payload))]
    async fn apply_metadata(
        &self,
        object_id: &str,
        payload: &MetadataPayload,
    ) -> BridgeResult<WriteOutcome> {
        let request = HttpRequest::new(HttpMethod::Post, metadata_url(object_id))
            .json(&LegacyData::from(payload))?;

        let response = self.http_client.execute(request).await?;

        match response.status {
            201 | 200 => {
                debug!("Legacy metadata created");
                Ok(WriteOutcome::Written)
            }
            409 => {
                debug!("Legacy metadata already exists, skipping");
                Ok(WriteOutcome::AlreadyPresent)
            }
            status => {
                let message = response.text().unwrap_or_default();
                Err(BoxError::ApiError { status, message }.into())
            }
        }
    }
}
