//! HTTP client for the Wandbox compilation service

use crate::backend::error::{Result, TransportError};
use crate::backend::traits::CompilationBackend;
use crate::registry::CompilerEntry;
use crate::request::CompileRequest;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

pub const DEFAULT_WANDBOX_URL: &str = "https://wandbox.org/api/";

const LIST_ENDPOINT: &str = "list.json";
const COMPILE_ENDPOINT: &str = "compile.json";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// One record of `list.json`. The service sends many more fields; only these
/// two are needed to build the registry.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    name: String,
    language: String,
}

pub struct WandboxBackend {
    client: Client,
    base_url: Url,
}

impl WandboxBackend {
    pub fn new(base_url: &str, connect_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = ClientBuilder::new();

        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        builder = builder.user_agent(concat!("compiler-bot/", env!("CARGO_PKG_VERSION")));

        let client = builder.build().map_err(TransportError::Client)?;
        Self::with_client(client, base_url)
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(name)?)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        trace!("Response body: {body}");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CompilationBackend for WandboxBackend {
    async fn fetch_catalog(&self) -> Result<Vec<CompilerEntry>> {
        let url = self.endpoint(LIST_ENDPOINT)?;
        debug!("Fetching compiler catalog from {url}");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()
            .await?;
        let records: Vec<CatalogRecord> = Self::read_json(response).await?;

        Ok(records
            .into_iter()
            .map(|record| CompilerEntry::new(record.language, record.name))
            .collect())
    }

    async fn compile(&self, request: &CompileRequest) -> Result<serde_json::Value> {
        let url = self.endpoint(COMPILE_ENDPOINT)?;
        let body = serde_json::to_string(request)?;
        debug!(
            "Submitting {} bytes of code to {} using {}",
            request.code().len(),
            url,
            request.compiler_id()
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        Self::read_json(response).await
    }

    fn backend_name(&self) -> &'static str {
        "wandbox.org"
    }
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn normalize_base(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
