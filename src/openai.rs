//! OpenAI client configuration.

use crate::config::OpenAISettings;
use crate::error::{BlogcastError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client for an explicit API key.
///
/// The key is never read from or written to the process environment.
pub fn create_client(api_key: &str, settings: &OpenAISettings) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .build()?;

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = settings.api_base.as_deref() {
        if base.is_empty() {
            return Err(BlogcastError::Config("openai.api_base is empty".to_string()));
        }
        config = config.with_api_base(base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}
