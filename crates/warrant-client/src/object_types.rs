//! Object type definitions.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v2/object-types?limit=&nextCursor=` | List one page |
//! | PUT    | `/v2/object-types` | Batch update |
//!
//! Definitions are opaque JSON documents; the service owns their schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::http::{self, RequestOptions};

/// Page size requested when listing object types.
pub const LIST_PAGE_SIZE: u32 = 100;

/// One page of object type definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypePage {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Client for `/v2/object-types`.
#[derive(Debug, Clone)]
pub struct ObjectTypeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ObjectTypeClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch one page, starting after `next_cursor` when given.
    ///
    /// Calls `GET {base_url}/v2/object-types`.
    pub async fn list_page(
        &self,
        next_cursor: Option<&str>,
        opts: &RequestOptions,
    ) -> Result<ObjectTypePage, ApiError> {
        let endpoint = "GET /v2/object-types";
        let mut url = http::url_for(&self.base_url, &["v2", "object-types"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &LIST_PAGE_SIZE.to_string());
            if let Some(cursor) = next_cursor {
                pairs.append_pair("nextCursor", cursor);
            }
        }
        http::send_json(endpoint, opts.apply(self.http.get(url))).await
    }

    /// Fetch every page, following `nextCursor` until it is empty.
    pub async fn list_all(&self, opts: &RequestOptions) -> Result<Vec<Value>, ApiError> {
        let mut types = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.list_page(cursor.as_deref(), opts).await?;
            types.extend(page.results);
            match page.next_cursor.filter(|c| !c.is_empty()) {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(types)
    }

    /// Replace the environment's object types with `types`.
    ///
    /// Calls `PUT {base_url}/v2/object-types`.
    pub async fn batch_update(&self, types: &[Value]) -> Result<Value, ApiError> {
        let endpoint = "PUT /v2/object-types";
        let url = http::url_for(&self.base_url, &["v2", "object-types"])?;
        http::send_json(endpoint, self.http.put(url).json(types)).await
    }
}
