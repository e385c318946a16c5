//! Built-in resources (users, tenants, roles, permissions, pricing tiers,
//! features) and the association shortcuts between them.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v1/{collection}` | Create |
//! | DELETE | `/v1/{collection}/{id}` | Delete |
//! | GET    | `/v1/{collection}?page=&limit=` | List one page |
//! | POST   | `/v1/{objects}/{id}/{subjects}/{id}` | Assign |
//! | DELETE | `/v1/{objects}/{id}/{subjects}/{id}` | Remove |

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;
use warrant_core::{Association, BuiltinType};

use crate::error::ApiError;
use crate::http;

/// A user to create, as read from an import row. A blank id is omitted
/// from the body and the service assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Client for the `/v1` built-in collections.
#[derive(Debug, Clone)]
pub struct BuiltinClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BuiltinClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Create a built-in resource with the given id.
    ///
    /// Calls `POST {base_url}/v1/{collection}` with `{"<idField>": id}`.
    pub async fn create(&self, kind: BuiltinType, id: &str) -> Result<Value, ApiError> {
        let mut body = Map::new();
        body.insert(kind.id_field().to_string(), Value::String(id.to_string()));
        self.post_collection(kind, &body).await
    }

    /// Create a user, with an email when one is known.
    ///
    /// Calls `POST {base_url}/v1/users`.
    pub async fn create_user(&self, user: &NewUser) -> Result<Value, ApiError> {
        self.post_collection(BuiltinType::User, user).await
    }

    /// Delete a built-in resource.
    ///
    /// Calls `DELETE {base_url}/v1/{collection}/{id}`.
    pub async fn delete(&self, kind: BuiltinType, id: &str) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /v1/{}/{id}", kind.collection());
        let url = http::url_for(&self.base_url, &["v1", kind.collection(), id])?;
        http::send(&endpoint, self.http.delete(url)).await?;
        Ok(())
    }

    /// List one page of a collection.
    ///
    /// Calls `GET {base_url}/v1/{collection}?page=&limit=`.
    pub async fn list(
        &self,
        kind: BuiltinType,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Value>, ApiError> {
        let endpoint = format!("GET /v1/{}", kind.collection());
        let mut url = http::url_for(&self.base_url, &["v1", kind.collection()])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        http::send_json(&endpoint, self.http.get(url)).await
    }

    /// Attach `subject_id` to `object_id` through an association shortcut.
    ///
    /// Calls `POST {base_url}/v1/{objects}/{object_id}/{subjects}/{subject_id}`.
    pub async fn assign(
        &self,
        assoc: Association,
        subject_id: &str,
        object_id: &str,
    ) -> Result<(), ApiError> {
        let segments = assoc.segments(subject_id, object_id);
        let endpoint = format!("POST /{}", segments.join("/"));
        let url = http::url_for(&self.base_url, &segments)?;
        http::send(&endpoint, self.http.post(url)).await?;
        Ok(())
    }

    /// Detach `subject_id` from `object_id`.
    ///
    /// Calls `DELETE {base_url}/v1/{objects}/{object_id}/{subjects}/{subject_id}`.
    pub async fn remove(
        &self,
        assoc: Association,
        subject_id: &str,
        object_id: &str,
    ) -> Result<(), ApiError> {
        let segments = assoc.segments(subject_id, object_id);
        let endpoint = format!("DELETE /{}", segments.join("/"));
        let url = http::url_for(&self.base_url, &segments)?;
        http::send(&endpoint, self.http.delete(url)).await?;
        Ok(())
    }

    async fn post_collection<B: Serialize + ?Sized>(
        &self,
        kind: BuiltinType,
        body: &B,
    ) -> Result<Value, ApiError> {
        let endpoint = format!("POST /v1/{}", kind.collection());
        let url = http::url_for(&self.base_url, &["v1", kind.collection()])?;
        http::send_json(&endpoint, self.http.post(url).json(body)).await
    }
}
