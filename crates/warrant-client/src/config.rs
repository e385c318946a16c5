//! Warrant API client configuration.
//!
//! One endpoint and one API key per client. The CLI builds this from the
//! active environment of `~/.warrant.json` plus any overrides and hands it
//! to [`crate::WarrantClient::new`].

use url::Url;
use zeroize::Zeroizing;

/// Endpoint used when an environment does not override it.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.warrant.dev";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the Warrant API.
///
/// Custom `Debug` implementation redacts the `api_key` field so the key
/// never reaches log output. The key is wiped from memory on drop.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API. Always ends with `/`.
    pub api_endpoint: Url,
    /// API key sent as `Authorization: ApiKey <key>`.
    pub api_key: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_endpoint", &self.api_endpoint.as_str())
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration from a key and an endpoint string.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingApiKey`] if the key is empty or blank.
    /// - [`ConfigError::InvalidUrl`] if the endpoint is not an absolute
    ///   `http`/`https` URL.
    pub fn new(api_key: impl Into<String>, api_endpoint: &str) -> Result<Self, ConfigError> {
        let api_key = Zeroizing::new(api_key.into());
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_endpoint: parse_endpoint(api_endpoint)?,
            api_key,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Parse and normalize an API endpoint so that relative paths join under it.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] for unparseable URLs, non-HTTP
/// schemes, and URLs that cannot carry a path.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl(raw.to_string(), reason);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing API key. Run 'warrant init' or pass --key")]
    MissingApiKey,
    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,
    #[error("invalid API endpoint {0}: {1}")]
    InvalidUrl(String, String),
}
