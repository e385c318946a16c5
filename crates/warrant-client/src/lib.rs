//! # warrant-client — Typed Rust client for the Warrant API
//!
//! Thin async SDK over the Warrant REST API. Request values come from
//! `warrant-core`; this crate only moves them over HTTP and decodes the
//! replies.
//!
//! - **Checks** via `POST /v2/check`
//! - **Warrants** via `/v2/warrants`
//! - **Queries** via `GET /v2/query`
//! - **Objects** via `/v2/objects`
//! - **Object types** via `/v2/object-types`
//! - **Built-ins** (users, tenants, roles, ...) via the legacy `/v1` paths
//!
//! ## Transport
//!
//! Every call is sent exactly once. Transport errors, non-2xx statuses and
//! undecodable bodies surface as [`ApiError`] carrying the endpoint that
//! failed. Requests carry `Authorization: ApiKey <key>` and time out after
//! [`ClientConfig::timeout_secs`].

pub mod builtins;
pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod object_types;
pub mod objects;
pub mod query;
pub mod warrants;

pub use check::CheckResult;
pub use config::{ClientConfig, ConfigError, DEFAULT_API_ENDPOINT};
pub use error::ApiError;
pub use http::RequestOptions;
pub use query::{QueryParams, QueryResponse};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Top-level Warrant API client. Holds a sub-client per resource.
#[derive(Debug, Clone)]
pub struct WarrantClient {
    checks: check::CheckClient,
    warrants: warrants::WarrantsClient,
    query: query::QueryClient,
    objects: objects::ObjectClient,
    object_types: object_types::ObjectTypeClient,
    builtins: builtins::BuiltinClient,
}

impl WarrantClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("ApiKey {}", config.api_key.as_str()))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("warrant-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let base = config.api_endpoint.clone();
        tracing::debug!(endpoint = %base, "warrant client ready");

        Ok(Self {
            checks: check::CheckClient::new(http.clone(), base.clone()),
            warrants: warrants::WarrantsClient::new(http.clone(), base.clone()),
            query: query::QueryClient::new(http.clone(), base.clone()),
            objects: objects::ObjectClient::new(http.clone(), base.clone()),
            object_types: object_types::ObjectTypeClient::new(http.clone(), base.clone()),
            builtins: builtins::BuiltinClient::new(http, base),
        })
    }

    /// Access the check client.
    pub fn checks(&self) -> &check::CheckClient {
        &self.checks
    }

    /// Access the warrant create/delete client.
    pub fn warrants(&self) -> &warrants::WarrantsClient {
        &self.warrants
    }

    /// Access the query client.
    pub fn query(&self) -> &query::QueryClient {
        &self.query
    }

    /// Access the object client.
    pub fn objects(&self) -> &objects::ObjectClient {
        &self.objects
    }

    /// Access the object type client.
    pub fn object_types(&self) -> &object_types::ObjectTypeClient {
        &self.object_types
    }

    /// Access the built-in resource client.
    pub fn builtins(&self) -> &builtins::BuiltinClient {
        &self.builtins
    }
}
