//! Release catalog loading
//!
//! The catalog service answers with `{"data": {...}}`, where `data` is either an
//! object keyed by version id or a plain array of release descriptors.

use indexmap::IndexMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::CatalogError;
use crate::release::ReleaseDescriptor;

pub const DEFAULT_CATALOG_URL: &str = "https://php.watch/api/v1/versions";

const DEFAULT_USER_AGENT: &str = concat!("phpver/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { data: CatalogData },
    Bare(Vec<ReleaseDescriptor>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogData {
    Keyed(IndexMap<String, ReleaseDescriptor>),
    List(Vec<ReleaseDescriptor>),
}

impl CatalogData {
    fn into_releases(self) -> Vec<ReleaseDescriptor> {
        match self {
            CatalogData::List(releases) => releases,
            CatalogData::Keyed(entries) => entries
                .into_iter()
                .map(|(key, mut release)| {
                    if release.name.is_empty() {
                        release.name = key;
                    }
                    release
                })
                .collect(),
        }
    }
}

/// Normalize a catalog JSON document into release descriptors, in document order
pub fn parse_catalog(json: &str) -> Result<Vec<ReleaseDescriptor>, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    let releases = match document {
        CatalogDocument::Wrapped { data } => data.into_releases(),
        CatalogDocument::Bare(releases) => releases,
    };
    log::debug!("Release catalog lists {} releases", releases.len());
    Ok(releases)
}

/// Load a catalog from a local JSON file
pub fn load_catalog_file(path: &Path) -> Result<Vec<ReleaseDescriptor>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content)
}

/// HTTP client for the release catalog service
pub struct CatalogClient {
    client: Client,
    url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl CatalogClient {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_url(DEFAULT_CATALOG_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .gzip(true)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Set the retry budget for server errors and rate limits
    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and normalize the catalog
    pub async fn fetch(&self) -> Result<Vec<ReleaseDescriptor>, CatalogError> {
        log::info!("Fetching release catalog from {}", self.url);
        let body = self.get_text().await?;
        parse_catalog(&body)
    }

    async fn get_text(&self) -> Result<String, CatalogError> {
        let mut attempt = 0;
        loop {
            let error = match self.client.get(&self.url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }
                    let error = CatalogError::HttpStatus {
                        status: status.as_u16(),
                        url: self.url.clone(),
                    };
                    // 4xx other than 429 will not get better on retry
                    if !status.is_server_error() && status != StatusCode::TOO_MANY_REQUESTS {
                        return Err(error);
                    }
                    error
                }
                Err(e) => CatalogError::Request(e),
            };

            if attempt >= self.max_retries {
                return Err(error);
            }

            let delay = backoff_delay(self.retry_delay, attempt);
            log::warn!("{}, retrying in {:?}", error, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Exponential backoff for the given retry attempt, capped at `MAX_RETRY_DELAY`
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    2_u32
        .checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyed_catalog() {
        let json = r#"{
            "data": {
                "80": {"name": "8.0", "isFutureVersion": false, "isEOLVersion": true, "isSecureVersion": false},
                "81": {"name": "8.1", "isFutureVersion": false, "isEOLVersion": false, "isSecureVersion": true},
                "85": {"name": "8.5", "isFutureVersion": true, "isEOLVersion": false, "isSecureVersion": false}
            }
        }"#;

        let releases = parse_catalog(json).unwrap();
        let names: Vec<&str> = releases.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["8.0", "8.1", "8.5"]);
        assert!(releases[0].is_end_of_life);
        assert!(releases[1].is_secure);
        assert!(releases[2].is_future);
    }

    #[test]
    fn test_keyed_catalog_keeps_document_order() {
        let json = r#"{"data": {"84": {"name": "8.4"}, "72": {"name": "7.2"}, "80": {"name": "8.0"}}}"#;
        let names: Vec<String> = parse_catalog(json).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["8.4", "7.2", "8.0"]);
    }

    #[test]
    fn test_keyed_catalog_falls_back_to_key() {
        let json = r#"{"data": {"8.3": {"isSecureVersion": true}}}"#;
        let releases = parse_catalog(json).unwrap();
        assert_eq!(releases[0].name, "8.3");
        assert!(releases[0].is_secure);
    }

    #[test]
    fn test_parse_array_catalog() {
        let json = r#"{"data": [{"name": "7.4", "isEOLVersion": true}, {"name": "8.2"}]}"#;
        let releases = parse_catalog(json).unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[1], ReleaseDescriptor::new("8.2"));
    }

    #[test]
    fn test_parse_bare_array() {
        let releases = parse_catalog(r#"[{"name": "8.3"}]"#).unwrap();
        assert_eq!(releases, vec![ReleaseDescriptor::new("8.3")]);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::JsonParse(_))));
        assert!(matches!(parse_catalog(r#"{"items": []}"#), Err(CatalogError::JsonParse(_))));
    }

    #[test]
    fn test_client_url() {
        let client = CatalogClient::new().unwrap();
        assert_eq!(client.url(), DEFAULT_CATALOG_URL);

        let client = CatalogClient::with_url("http://localhost:8080/versions").unwrap();
        assert_eq!(client.url(), "http://localhost:8080/versions");
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 0), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_is_capped() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 10), MAX_RETRY_DELAY);
        assert_eq!(backoff_delay(base, 32), MAX_RETRY_DELAY);
        assert_eq!(backoff_delay(base, u32::MAX), MAX_RETRY_DELAY);
        assert_eq!(backoff_delay(Duration::MAX, 1), MAX_RETRY_DELAY);
    }
}
