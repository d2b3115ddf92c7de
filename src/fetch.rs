//! The fetch module loads a web page and extracts its text content.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::header::CONTENT_TYPE;
use scraper::Selector as ScraperSelector;
use url::Url;

use crate::{TextBy, config::Config, document::Document, parse::extract_document};

/// Something that can turn a URL into a [`Document`].
///
/// Loading fails softly: any problem is reported through the log and
/// yields `None`.
#[async_trait]
pub trait ContentSource {
    async fn load(&self, url: &Url) -> Option<Document>;
}

/// Loads pages over HTTP and extracts their readable text.
pub struct WebLoader {
    client: reqwest::Client,
    text_by: TextBy,
    selector: Option<ScraperSelector>,
}

impl WebLoader {
    /// Creates a loader sending the configured user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config, text_by: TextBy, selector: Option<ScraperSelector>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            text_by,
            selector,
        })
    }

    /// Fetches `url` and extracts its document, propagating every failure.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The request fails or the server answers with a non-success status
    /// * The body cannot be read
    /// * Text extraction fails
    pub async fn fetch(&self, url: &Url) -> Result<Document> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_none_or(|value| value.to_ascii_lowercase().contains("html"));
        let body = response.text().await?;

        if is_html {
            extract_document(url, &body, &self.text_by, self.selector.as_ref())
        } else {
            Ok(Document::new(url.clone(), None, body))
        }
    }
}

#[async_trait]
impl ContentSource for WebLoader {
    async fn load(&self, url: &Url) -> Option<Document> {
        info!("Loading content from: {url}...");

        match self.fetch(url).await {
            Ok(document) if document.is_blank() => {
                warn!("No data found at {url}.");
                None
            }
            Ok(document) => {
                info!("Content loaded successfully ({} characters).", document.char_count());
                Some(document)
            }
            Err(err) => {
                error!("Error loading content: {err:#}");
                None
            }
        }
    }
}
