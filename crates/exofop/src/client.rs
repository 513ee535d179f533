//! HTTP client for ExoFOP target pages, wrapping reqwest.
//!
//! One request per call: no retries, no backoff. Every operation awaits its
//! requests sequentially.

use std::time::Duration;

use url::Url;

use crate::config::ExofopConfig;
use crate::document::Document;
use crate::links;
use crate::types::{ExofopError, ExofopResult};

/// Per-request timeout.
const REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Target page path under `<base_url><mission>/`.
const TARGET_PAGE: &str = "edit_target.php";

/// Client for one ExoFOP archive.
#[derive(Clone)]
pub struct ExofopClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ExofopConfig,
}

impl ExofopClient {
    /// Create a client for the configured archive.
    pub fn new(config: ExofopConfig) -> Self {
        let ua = concat!("exofop-rs/", env!("CARGO_PKG_VERSION"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { http, config }
    }

    pub fn config(&self) -> &ExofopConfig {
        &self.config
    }

    /// `<base_url><mission>/edit_target.php?id=<identifier>`.
    pub fn target_url(&self, identifier: &str, mission: &str) -> ExofopResult<Url> {
        let raw = format!("{}{mission}/{TARGET_PAGE}", self.config.base_url);
        let mut url = Url::parse(&raw).map_err(|e| ExofopError::InvalidUrl(format!("{raw}: {e}")))?;
        url.query_pairs_mut().append_pair("id", identifier);
        Ok(url)
    }

    /// Fetch and parse the target page.
    pub async fn fetch(&self, identifier: &str, mission: &str) -> ExofopResult<Document> {
        let url = self.target_url(identifier, mission)?;
        tracing::info!("fetching {url}");

        let body = self.get_text(url.as_str()).await?;
        Ok(Document::parse(url.as_str(), &body))
    }

    /// Fetch the target page afresh and collect every anchor `href`.
    pub async fn harvest_links(
        &self,
        identifier: &str,
        mission: &str,
    ) -> ExofopResult<Vec<Option<String>>> {
        let doc = self.fetch(identifier, mission).await?;
        links::links_in(&doc)
    }

    /// [`links::filter_by_extension`] against this client's base URL.
    pub fn filter_by_extension(
        &self,
        links: &[Option<String>],
        extension: &str,
        mission: &str,
    ) -> Option<Vec<String>> {
        links::filter_by_extension(links, extension, &self.config.base_url, mission)
    }

    async fn get_text(&self, url: &str) -> ExofopResult<String> {
        let fetch_err = |e: reqwest::Error| ExofopError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        resp.text().await.map_err(fetch_err)
    }

    /// GET a file body; the error is a human-readable reason.
    pub(crate) async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?;
        let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
        Ok(bytes.to_vec())
    }
}
