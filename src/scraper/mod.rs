//! Web content extraction.
//!
//! Scraping is delegated to a hosted service; this module only defines the
//! seam and the client for it.

mod firecrawl;

pub use firecrawl::FirecrawlScraper;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text extracted from a web page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// URL that was scraped.
    pub url: String,
    /// Page title, if the service reported one.
    pub title: Option<String>,
    /// Page body as markdown.
    pub markdown: String,
}

impl ScrapedPage {
    /// Render the page for the model, cutting the body at `max_chars` characters.
    pub fn to_prompt_text(&self, max_chars: usize) -> String {
        let total = self.markdown.chars().count();
        let body: String = self.markdown.chars().take(max_chars).collect();

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&format!("# {}\n\n", title));
        }
        out.push_str(&body);
        if total > max_chars {
            out.push_str(&format!("\n\n[Content truncated: {} of {} characters shown]", max_chars, total));
        }
        out
    }
}

/// Trait for services that turn a URL into page text.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrape a single page.
    async fn scrape(&self, url: &str) -> Result<ScrapedPage>;
}
