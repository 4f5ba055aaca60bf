//! Firecrawl scrape API client.

use super::{ScrapedPage, Scraper};
use crate::config::FirecrawlSettings;
use crate::error::{BlogcastError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Scraper backed by the Firecrawl `/v1/scrape` endpoint.
pub struct FirecrawlScraper {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    metadata: Option<ScrapeMetadata>,
}

#[derive(Debug, Deserialize)]
struct ScrapeMetadata {
    title: Option<String>,
}

impl FirecrawlScraper {
    /// Create a scraper for the given API key.
    pub fn new(api_key: &str, settings: &FirecrawlSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/scrape", self.base_url)
    }
}

#[async_trait]
impl Scraper for FirecrawlScraper {
    #[instrument(skip(self))]
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        debug!("Scraping page");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "url": url,
                "formats": ["markdown"],
                "onlyMainContent": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlogcastError::Scrape(format!("{} ({})", status, body.trim())));
        }

        let parsed: ScrapeResponse = response.json().await?;
        parse_scrape_response(url, parsed)
    }
}

fn parse_scrape_response(url: &str, response: ScrapeResponse) -> Result<ScrapedPage> {
    if !response.success {
        return Err(BlogcastError::Scrape(
            response.error.unwrap_or_else(|| "service reported failure".to_string()),
        ));
    }

    let data = response
        .data
        .ok_or_else(|| BlogcastError::Scrape("response has no data".to_string()))?;

    let markdown = data.markdown.unwrap_or_default();
    if markdown.trim().is_empty() {
        return Err(BlogcastError::Scrape(format!("no content extracted from {}", url)));
    }

    debug!("Scraped {} characters", markdown.len());

    Ok(ScrapedPage {
        url: url.to_string(),
        title: data.metadata.and_then(|m| m.title),
        markdown,
    })
}
