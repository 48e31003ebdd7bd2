//! # Backend API
//!
//! The [`Backend`] trait is the seam between the controllers and the network.
//! [`RestBackend`] implements it over the REST contract; tests swap in an
//! in-memory fake.
//!
//! ## REST Contract
//! ```text
//! GET    {base}/{resource}        → [record, ...] | null
//! POST   {base}/{resource}        ← schema fields only
//! PUT    {base}/{resource}/{id}   ← schema fields only
//! DELETE {base}/{resource}/{id}   → 204
//! GET    {gateway}/health         (startup probe)
//! ```

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use wms_core::{Entity, Payload};

use crate::config::HubConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, Method};

/// Operations the controllers need from a backend.
///
/// Works on raw JSON so one implementation serves every resource.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetches the whole collection. `None` means an empty body.
    async fn list(&self, resource: &str) -> ClientResult<Option<Value>>;

    async fn create(&self, resource: &str, body: &Payload) -> ClientResult<()>;

    async fn update(&self, resource: &str, id: &str, body: &Payload) -> ClientResult<()>;

    async fn delete(&self, resource: &str, id: &str) -> ClientResult<()>;
}

/// Decodes a list response into records. `null` and empty bodies are empty.
///
/// Elements are decoded one by one; an element that does not fit the record
/// type is logged and left out instead of failing the whole list.
pub fn decode_list<E: Entity>(body: Option<Value>) -> ClientResult<Option<Vec<E>>> {
    match body {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(elements)) => {
            let total = elements.len();
            let records: Vec<E> = elements
                .into_iter()
                .enumerate()
                .filter_map(|(index, element)| match serde_json::from_value::<E>(element) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(resource = E::RESOURCE, index, error = %e, "Skipping malformed record");
                        None
                    }
                })
                .collect();
            if records.len() < total {
                debug!(resource = E::RESOURCE, kept = records.len(), total, "List partially decoded");
            }
            Ok(Some(records))
        }
        Some(other) => Err(ClientError::Decode(format!(
            "expected a list of {}, got {}",
            E::TITLE.to_lowercase(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// REST Backend
// =============================================================================

#[derive(Debug, Clone)]
pub struct RestBackend {
    http: HttpClient,
    base: Url,
}

impl RestBackend {
    pub fn new(http: HttpClient, base: Url) -> Self {
        RestBackend { http, base }
    }

    /// Builds the backend from a validated config.
    pub fn from_config(config: &HubConfig) -> ClientResult<Self> {
        let base = config.base_url()?;
        let http = HttpClient::new(config.request_timeout())?;
        info!(base_url = %base, "REST backend ready");
        Ok(Self::new(http, base))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/{resource}` or `{base}/{resource}/{id}`, with segments escaped.
    pub fn resource_url(&self, resource: &str, id: Option<&str>) -> ClientResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base)))?;
            segments.pop_if_empty().push(resource);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Probes `{gateway}/health`. Used by `--check`.
    pub async fn health(&self, gateway: &str) -> ClientResult<Option<Value>> {
        let url = format!("{}/health", gateway.trim_end_matches('/'));
        debug!(url = %url, "Checking gateway health");
        self.http.get(&url).await
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Payload>) -> ClientResult<()> {
        let body = body.map(|b| Value::Object(b.clone()));
        self.http.request(method, url.as_str(), body.as_ref()).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list(&self, resource: &str) -> ClientResult<Option<Value>> {
        let url = self.resource_url(resource, None)?;
        self.http.get(url.as_str()).await
    }

    async fn create(&self, resource: &str, body: &Payload) -> ClientResult<()> {
        let url = self.resource_url(resource, None)?;
        self.send(Method::POST, url, Some(body)).await
    }

    async fn update(&self, resource: &str, id: &str, body: &Payload) -> ClientResult<()> {
        let url = self.resource_url(resource, Some(id))?;
        self.send(Method::PUT, url, Some(body)).await
    }

    async fn delete(&self, resource: &str, id: &str) -> ClientResult<()> {
        let url = self.resource_url(resource, Some(id))?;
        self.send(Method::DELETE, url, None).await
    }
}
