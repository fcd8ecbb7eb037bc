//! Catalog loading.
//!
//! A load either yields a whole catalog or fails; there is no retry and no
//! partial payload. Individual malformed records are dropped with a warning.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use shopfront_products::{Catalog, Product};

use crate::config::CatalogLocation;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("catalog request failed with status {0}")]
    Status(u16),
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("malformed catalog: {0}")]
    Malformed(String),
}

/// External data source returning the raw JSON payload.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, LoadError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Fetches the catalog over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LoadError::Status(resp.status().as_u16()));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| LoadError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the catalog from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| LoadError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory payload (tests, demos, embedding).
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    payload: Result<String, LoadError>,
}

impl StaticCatalogSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            payload: Ok(json.into()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self::new(value.to_string())
    }

    /// A source whose fetch always fails with `error`.
    pub fn failing(error: LoadError) -> Self {
        Self { payload: Err(error) }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        let raw = self.payload.clone()?;
        serde_json::from_str(&raw).map_err(|e| LoadError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        "static payload".to_string()
    }
}

/// Pick the source implementation for a configured location.
pub fn source_for(location: &CatalogLocation) -> Box<dyn CatalogSource> {
    match location {
        CatalogLocation::Url(url) => Box::new(HttpCatalogSource::new(url.clone())),
        CatalogLocation::File(path) => Box::new(FileCatalogSource::new(path.clone())),
    }
}

/// Fetch and decode the catalog.
pub async fn load_catalog<S>(source: &S) -> Result<Catalog, LoadError>
where
    S: CatalogSource + ?Sized,
{
    tracing::info!(source = %source.describe(), "loading catalog");
    let payload = source.fetch().await?;
    decode_catalog(payload)
}

/// Decode a payload that must be a JSON array of product records.
pub fn decode_catalog(payload: Value) -> Result<Catalog, LoadError> {
    let Value::Array(entries) = payload else {
        return Err(LoadError::Malformed(format!(
            "expected a JSON array of products, found {}",
            json_kind(&payload)
        )));
    };

    let total = entries.len();
    let mut products = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        match Product::from_json(entry) {
            Ok(product) => products.push(product),
            Err(err) => tracing::warn!(index, error = %err, "skipping malformed product record"),
        }
    }

    tracing::info!(
        loaded = products.len(),
        skipped = total - products.len(),
        "catalog decoded"
    );
    Ok(Catalog::new(products))
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
