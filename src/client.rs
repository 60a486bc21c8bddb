//! Catalog HTTP Client
//! Mission: Query a running bookshelf service over its public endpoints

use crate::models::{Book, Review};
use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Async client for the read-only catalog and review routes
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Base URL cannot carry a path: {}", base_url);
        }
        Ok(Self { http, base_url })
    }

    pub async fn all_books(&self) -> Result<Vec<Book>> {
        self.get_json(&["books"]).await
    }

    pub async fn book_by_isbn(&self, isbn: &str) -> Result<Book> {
        self.get_json(&["books", "isbn", isbn]).await
    }

    pub async fn books_by_author(&self, author: &str) -> Result<Vec<Book>> {
        self.get_json(&["books", "author", author]).await
    }

    pub async fn books_by_title(&self, title: &str) -> Result<Vec<Book>> {
        self.get_json(&["books", "title", title]).await
    }

    pub async fn reviews(&self, isbn: &str) -> Result<Vec<Review>> {
        self.get_json(&["reviews", isbn]).await
    }

    /// Join path segments onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status_text(status));
            bail!("{} returned {}: {}", url.path(), status.as_u16(), message);
        }

        resp.json::<T>()
            .await
            .with_context(|| format!("Invalid response body from {}", url))
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string()
}
