//! Warrant queries.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v2/query?q=&limit=&nextCursor=&prevCursor=` | Run a query |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::http::{self, RequestOptions};

/// Query string plus paging parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Query in the service's query language, e.g. `select explicit *`.
    pub query: String,
    pub limit: Option<u32>,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

impl QueryParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.query.clone())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.next_cursor {
            pairs.push(("nextCursor", cursor.clone()));
        }
        if let Some(cursor) = &self.prev_cursor {
            pairs.push(("prevCursor", cursor.clone()));
        }
        pairs
    }
}

/// One page of query results. Results are passed through untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
}

/// Client for `/v2/query`.
#[derive(Debug, Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl QueryClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Run a query and return one page.
    ///
    /// Calls `GET {base_url}/v2/query`.
    pub async fn query(
        &self,
        params: &QueryParams,
        opts: &RequestOptions,
    ) -> Result<QueryResponse, ApiError> {
        let endpoint = "GET /v2/query";
        let mut url = http::url_for(&self.base_url, &["v2", "query"])?;
        url.query_pairs_mut().extend_pairs(params.pairs());
        http::send_json(endpoint, opts.apply(self.http.get(url))).await
    }
}
