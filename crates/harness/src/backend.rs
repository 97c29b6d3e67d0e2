//! Backend CRUD API client
//!
//! The console's records live in an HTTP API (`/api/v2/<kind>/`) addressed
//! by name and id. The provisioner only ever touches it through the
//! [`Backend`] trait so tests can substitute an in-memory fake.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::RecordSpec;
use crate::record::{Record, RecordKind};

/// Minimal CRUD surface the fixture provisioner consumes
#[async_trait]
pub trait Backend: Send + Sync {
    /// Look up a record by its exact generated name
    async fn find_by_name(&self, kind: RecordKind, name: &str) -> HarnessResult<Option<Record>>;

    /// Create a record with minimal valid attributes for its kind
    async fn create(&self, kind: RecordKind, spec: &RecordSpec) -> HarnessResult<Record>;

    /// Delete a record by id
    async fn delete(&self, kind: RecordKind, id: u64) -> HarnessResult<()>;
}

/// Connection settings for the HTTP backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8043".to_string(),
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

impl BackendConfig {
    /// Apply `GANTRY_API_URL` / `GANTRY_API_USERNAME` / `GANTRY_API_PASSWORD`
    /// overrides on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("GANTRY_API_URL") {
            config.base_url = url;
        }
        if let Ok(user) = std::env::var("GANTRY_API_USERNAME") {
            config.username = user;
        }
        if let Ok(pass) = std::env::var("GANTRY_API_PASSWORD") {
            config.password = pass;
        }
        config
    }
}

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    results: Vec<ApiRecord>,
}

/// Production [`Backend`] speaking HTTP with basic auth
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> HarnessResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    fn collection_url(&self, kind: RecordKind) -> String {
        format!("{}/api/v2/{}/", self.config.base_url.trim_end_matches('/'), kind.api_slug())
    }

    fn record_url(&self, kind: RecordKind, id: u64) -> String {
        format!("{}{}/", self.collection_url(kind), id)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.basic_auth(&self.config.username, Some(&self.config.password))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn find_by_name(&self, kind: RecordKind, name: &str) -> HarnessResult<Option<Record>> {
        let resp = self
            .authed(self.client.get(self.collection_url(kind)))
            .query(&[("name", name)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(HarnessError::Provision {
                kind: kind.to_string(),
                name: name.to_string(),
                reason: format!("lookup returned {}", resp.status()),
            });
        }

        let page: ApiPage = resp.json().await?;
        // The ?name= filter is exact, but only the exact match counts.
        let hit = page.results.into_iter().find(|r| r.name == name);

        Ok(hit.map(|r| Record {
            kind,
            id: r.id,
            name: r.name,
            description: r.description,
        }))
    }

    async fn create(&self, kind: RecordKind, spec: &RecordSpec) -> HarnessResult<Record> {
        let mut body = json!({ "name": spec.name });
        if let Some(desc) = &spec.description {
            body["description"] = json!(desc);
        }
        for (field, value) in &spec.extra {
            body[field.as_str()] = value.clone();
        }

        debug!(kind = %kind, name = %spec.name, "creating backend record");

        let resp = self
            .authed(self.client.post(self.collection_url(kind)))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(HarnessError::Provision {
                kind: kind.to_string(),
                name: spec.name.clone(),
                reason: format!("create returned {status}: {detail}"),
            });
        }

        let created: ApiRecord = resp.json().await?;
        Ok(Record {
            kind,
            id: created.id,
            name: created.name,
            description: created.description,
        })
    }

    async fn delete(&self, kind: RecordKind, id: u64) -> HarnessResult<()> {
        let resp = self
            .authed(self.client.delete(self.record_url(kind, id)))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Provision {
                kind: kind.to_string(),
                name: id.to_string(),
                reason: format!("delete returned {status}"),
            });
        }
        Ok(())
    }
}
