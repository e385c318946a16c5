//! Warrant create and delete.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v2/warrants` | Create a warrant |
//! | DELETE | `/v2/warrants` | Delete a warrant |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use warrant_core::{MutationRequest, ObjectRef, SubjectRef};

use crate::error::ApiError;
use crate::http;

/// A warrant as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warrant {
    #[serde(flatten)]
    pub object: ObjectRef,
    pub relation: String,
    pub subject: SubjectRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Client for `/v2/warrants`.
#[derive(Debug, Clone)]
pub struct WarrantsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WarrantsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Create a warrant.
    ///
    /// Calls `POST {base_url}/v2/warrants`.
    pub async fn create(&self, req: &MutationRequest) -> Result<Warrant, ApiError> {
        let endpoint = "POST /v2/warrants";
        let url = http::url_for(&self.base_url, &["v2", "warrants"])?;
        http::send_json(endpoint, self.http.post(url).json(req)).await
    }

    /// Delete a warrant. The body identifies it exactly, policy included.
    ///
    /// Calls `DELETE {base_url}/v2/warrants`.
    pub async fn delete(&self, req: &MutationRequest) -> Result<(), ApiError> {
        let endpoint = "DELETE /v2/warrants";
        let url = http::url_for(&self.base_url, &["v2", "warrants"])?;
        http::send(endpoint, self.http.delete(url).json(req)).await?;
        Ok(())
    }
}
