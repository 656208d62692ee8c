//! Remote API client
//!
//! Thin typed wrapper over the two authenticated endpoints the pipeline needs:
//!
//! - `GET {base}/files/{file_id}[?ids=..]`: the document tree
//! - `GET {base}/images/{file_id}?ids=..&format=svg&..`: render URLs for nodes
//!
//! Both send the access token in the `X-Figma-Token` header. Render URLs themselves
//! point at a CDN and are fetched without authentication by the downloader, using
//! the same underlying [`reqwest::Client`].

use crate::config::{Config, RenderOptions};
use crate::error::{Error, FetchError, Result};
use crate::types::{FileResponse, ImagesResponse};
use serde::de::DeserializeOwned;

/// Header carrying the personal access token
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Client for the document and image-render endpoints
#[derive(Clone, Debug)]
pub struct FigmaClient {
    http: reqwest::Client,
    base_url: url::Url,
    token: String,
}

impl FigmaClient {
    /// Create a client from a validated configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("figma-svg-dl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http(http, &config.api_base_url, &config.access_token)
    }

    /// Create a client around an existing HTTP client
    pub fn with_http(http: reqwest::Client, base_url: &str, token: &str) -> Result<Self> {
        let base_url = url::Url::parse(base_url).map_err(|e| {
            Error::config("apiBaseUrl", format!("invalid API base URL {base_url}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(
                "apiBaseUrl",
                format!("API base URL {base_url} is not a base URL"),
            ));
        }
        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
        })
    }

    /// The underlying HTTP client, shared with the downloader
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetch the document tree of a file, optionally restricted to `ids`
    pub async fn get_document(&self, file_id: &str, ids: &[String]) -> Result<FileResponse> {
        let url = self.endpoint(&["files", file_id]);
        let mut query = Vec::new();
        if !ids.is_empty() {
            query.push(("ids", ids.join(",")));
        }

        tracing::debug!(file_id, filter = ids.len(), "fetching document");
        self.get_json("fetch document", url, &query).await
    }

    /// Request SVG render URLs for one batch of node identifiers
    pub async fn get_image_urls(
        &self,
        file_id: &str,
        ids: &[String],
        options: &RenderOptions,
    ) -> Result<ImagesResponse> {
        let url = self.endpoint(&["images", file_id]);
        let mut query = vec![("ids", ids.join(",")), ("format", "svg".to_string())];
        query.extend(options.query_pairs());

        tracing::debug!(file_id, ids = ids.len(), "requesting render urls");
        self.get_json("render images", url, &query).await
    }

    fn endpoint(&self, segments: &[&str]) -> url::Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: url::Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Request {
            operation: operation.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            tracing::warn!(operation, status = status.as_u16(), "request rejected");
            return Err(FetchError::Http {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::Decode {
                operation: operation.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
