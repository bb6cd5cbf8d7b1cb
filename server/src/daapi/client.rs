//! Data-Aggregation API Client
//!
//! Authenticated GET of a device's openconfig document. Failures are
//! terminal: no retry.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::topology::{DaapiVersion, TopologyDocument};
use super::FetchError;
use crate::auth::Credentials;
use crate::common::create_http_client_with_timeout;

/// Anything able to produce a topology document for a device
#[async_trait]
pub trait TopologySource: Send + Sync {
    async fn fetch(&self, device: &str, version: DaapiVersion) -> Result<TopologyDocument, FetchError>;
}

/// HTTP client for both aggregation API versions
pub struct DaapiClient {
    client: reqwest::Client,
    v0_base_url: String,
    v1_base_url: String,
    credentials: Credentials,
}

impl DaapiClient {
    /// Create a client for the given base URLs
    pub fn new(
        v0_base_url: &str,
        v1_base_url: &str,
        timeout_secs: u64,
        credentials: Credentials,
    ) -> Result<Self, String> {
        let client = create_http_client_with_timeout(timeout_secs)?;

        Ok(Self {
            client,
            v0_base_url: v0_base_url.trim_end_matches('/').to_string(),
            v1_base_url: v1_base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Full URL of a device's openconfig document for `version`
    pub fn url(&self, device: &str, version: DaapiVersion) -> String {
        let base = match version {
            DaapiVersion::V0 => &self.v0_base_url,
            DaapiVersion::V1 => &self.v1_base_url,
        };
        format!("{}{}", base, version.openconfig_path(device))
    }
}

#[async_trait]
impl TopologySource for DaapiClient {
    async fn fetch(&self, device: &str, version: DaapiVersion) -> Result<TopologyDocument, FetchError> {
        let url = self.url(device, version);
        debug!("Fetching openconfig for {} from {}", device, url);

        let response = self
            .client
            .get(&url)
            .basic_auth(self.credentials.user(), Some(self.credentials.password()))
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                FetchError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned HTTP {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        // A body cut short is a transport failure, not a bad document
        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read response from {}: {}", url, e);
            FetchError::Unreachable(e.to_string())
        })?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!("Failed to parse response from {}: {}", url, e);
            FetchError::InvalidDocument(e.to_string())
        })?;

        TopologyDocument::from_openconfig(version, body)
    }
}
