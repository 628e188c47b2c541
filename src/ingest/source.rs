// * Dataset sources
// * A source yields the raw NDJSON text; parsing happens in the loader.

use crate::config::constants::{DEFAULT_DATASET_URL, FETCH_TIMEOUT_MS};
use crate::ingest::errors::LoadError;
use reqwest::Client;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

/// Type alias for async fetch result
pub type FetchResult<'a> = Pin<Box<dyn Future<Output = Result<String, LoadError>> + Send + 'a>>;

/// Anything that can produce the dataset text
pub trait DatasetSource: Send + Sync {
    /// Fetches the complete UTF-8 payload
    fn fetch(&self) -> FetchResult<'_>;

    /// Short human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Where and how the HTTP source fetches the dataset
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Dataset file, resolved against the base URL
    pub dataset_resource: String,
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dataset_resource: DEFAULT_DATASET_URL.to_string(),
            timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
        }
    }
}

impl LoaderConfig {
    pub fn dataset_resource(mut self, resource: impl Into<String>) -> Self {
        self.dataset_resource = resource.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches the dataset over HTTP(S)
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self, LoadError> {
        Self::with_timeout(url, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let url = Url::parse(url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    /// Resolves a relative resource name (e.g. the default dataset file) against a base URL
    pub fn from_base(base_url: &str, resource: &str) -> Result<Self, LoadError> {
        Self::from_config(base_url, &LoaderConfig::default().dataset_resource(resource))
    }

    pub fn from_config(base_url: &str, config: &LoaderConfig) -> Result<Self, LoadError> {
        let url = Url::parse(base_url)?.join(&config.dataset_resource)?;
        Self::with_timeout(url.as_str(), config.timeout)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl DatasetSource for HttpSource {
    fn fetch(&self) -> FetchResult<'_> {
        Box::pin(async move {
            let resp = self.client.get(self.url.clone()).send().await?;
            let status = resp.status();

            if !status.is_success() {
                return Err(LoadError::HttpStatus(status.as_u16()));
            }

            let bytes = resp.bytes().await?;
            Ok(String::from_utf8(bytes.to_vec())?)
        })
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Reads the dataset from the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self) -> FetchResult<'_> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&self.path).await?;
            Ok(String::from_utf8(bytes)?)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves text already in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DatasetSource for StaticSource {
    fn fetch(&self) -> FetchResult<'_> {
        let text = self.text.clone();
        Box::pin(async move { Ok(text) })
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.text.len())
    }
}
