//! Authorization checks.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v2/check` | Check one warrant (`op: anyOf`) |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use warrant_core::CheckRequest;

use crate::error::ApiError;
use crate::http::{self, RequestOptions};

/// Result string the service returns for a granted check.
pub const AUTHORIZED: &str = "Authorized";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckBody<'a> {
    op: &'static str,
    warrants: [&'a CheckRequest; 1],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    debug: bool,
}

/// Outcome of a check as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[serde(default)]
    pub code: Option<u16>,
    /// `Authorized` or `Not Authorized`.
    pub result: String,
    #[serde(default)]
    pub is_implicit: bool,
    /// Present only for debug checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_path: Option<Value>,
}

impl CheckResult {
    pub fn is_authorized(&self) -> bool {
        self.result == AUTHORIZED
    }
}

/// Client for `/v2/check`.
#[derive(Debug, Clone)]
pub struct CheckClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CheckClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Run a single check. With `debug` set the service also returns the
    /// decision path it followed.
    ///
    /// Calls `POST {base_url}/v2/check`.
    pub async fn check(
        &self,
        req: &CheckRequest,
        debug: bool,
        opts: &RequestOptions,
    ) -> Result<CheckResult, ApiError> {
        let endpoint = "POST /v2/check";
        let url = http::url_for(&self.base_url, &["v2", "check"])?;
        let body = CheckBody {
            op: "anyOf",
            warrants: [req],
            debug,
        };

        let result: CheckResult =
            http::send_json(endpoint, opts.apply(self.http.post(url).json(&body))).await?;
        tracing::debug!(check = %req, result = %result.result, "check complete");
        Ok(result)
    }
}
