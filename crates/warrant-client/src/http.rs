//! Shared request plumbing for the sub-clients: URL building, the
//! optional `Warrant-Token` header, and status/body handling.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ConfigError;
use crate::error::ApiError;

/// Header carrying a consistency token from a previous write.
pub const WARRANT_TOKEN_HEADER: &str = "Warrant-Token";

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Sent as the `Warrant-Token` header when set.
    pub warrant_token: Option<String>,
}

impl RequestOptions {
    /// Options carrying a warrant token. Blank tokens are dropped.
    pub fn with_warrant_token(token: Option<&str>) -> Self {
        Self {
            warrant_token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }

    pub(crate) fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.warrant_token {
            Some(token) => req.header(WARRANT_TOKEN_HEADER, token),
            None => req,
        }
    }
}

/// Join percent-encoded path segments onto the base URL.
pub(crate) fn url_for(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            ConfigError::InvalidUrl(base.to_string(), "URL cannot be used as a base".into())
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request once and turn a non-2xx status into [`ApiError::Api`].
pub(crate) async fn send(endpoint: &str, req: RequestBuilder) -> Result<Response, ApiError> {
    tracing::debug!(endpoint, "sending request");

    let resp = req.send().await.map_err(|e| ApiError::Http {
        endpoint: endpoint.to_string(),
        source: e,
    })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(endpoint, status = status.as_u16(), "request failed");
        return Err(ApiError::Api {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(resp)
}

/// Send a request and decode its JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    endpoint: &str,
    req: RequestBuilder,
) -> Result<T, ApiError> {
    let resp = send(endpoint, req).await?;
    resp.json().await.map_err(|e| ApiError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}
