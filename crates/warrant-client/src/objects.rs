//! Object CRUD.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v2/objects` | Create (id optional) |
//! | GET    | `/v2/objects/{type}/{id}` | Get |
//! | PUT    | `/v2/objects/{type}/{id}` | Replace meta |
//! | DELETE | `/v2/objects/{type}/{id}` | Delete |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use warrant_core::{ObjectMeta, ObjectRef};

use crate::error::ApiError;
use crate::http::{self, RequestOptions};

/// An object as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub object_type: String,
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ObjectMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Object {
    /// Meta, when present and non-empty.
    pub fn meta(&self) -> Option<&ObjectMeta> {
        self.meta.as_ref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateObjectBody<'a> {
    #[serde(flatten)]
    object: &'a ObjectRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a ObjectMeta>,
}

#[derive(Debug, Serialize)]
struct UpdateObjectBody<'a> {
    meta: &'a ObjectMeta,
}

/// Client for `/v2/objects`.
#[derive(Debug, Clone)]
pub struct ObjectClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ObjectClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Create an object. An empty id lets the service assign one.
    ///
    /// Calls `POST {base_url}/v2/objects`.
    pub async fn create(
        &self,
        object: &ObjectRef,
        meta: Option<&ObjectMeta>,
    ) -> Result<Object, ApiError> {
        let endpoint = "POST /v2/objects";
        let url = http::url_for(&self.base_url, &["v2", "objects"])?;
        let body = CreateObjectBody { object, meta };
        http::send_json(endpoint, self.http.post(url).json(&body)).await
    }

    /// Fetch an object and its meta.
    ///
    /// Calls `GET {base_url}/v2/objects/{type}/{id}`.
    pub async fn get(&self, object: &ObjectRef, opts: &RequestOptions) -> Result<Object, ApiError> {
        let endpoint = format!("GET /v2/objects/{object}");
        let url = self.object_url(object)?;
        http::send_json(&endpoint, opts.apply(self.http.get(url))).await
    }

    /// Replace an object's meta. Type and id never change.
    ///
    /// Calls `PUT {base_url}/v2/objects/{type}/{id}`.
    pub async fn update(&self, object: &ObjectRef, meta: &ObjectMeta) -> Result<Object, ApiError> {
        let endpoint = format!("PUT /v2/objects/{object}");
        let url = self.object_url(object)?;
        http::send_json(&endpoint, self.http.put(url).json(&UpdateObjectBody { meta })).await
    }

    /// Delete an object, meta included.
    ///
    /// Calls `DELETE {base_url}/v2/objects/{type}/{id}`.
    pub async fn delete(&self, object: &ObjectRef) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /v2/objects/{object}");
        let url = self.object_url(object)?;
        http::send(&endpoint, self.http.delete(url)).await?;
        Ok(())
    }

    fn object_url(&self, object: &ObjectRef) -> Result<Url, ApiError> {
        http::url_for(
            &self.base_url,
            &["v2", "objects", object.object_type(), object.object_id()],
        )
    }
}
