//! Tool definitions and implementations for the agent system.

use crate::error::{BlogcastError, Result};
use crate::scraper::Scraper;
use crate::speech::{AudioPayload, SpeechSynthesizer};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Scrape a web page and return its content as markdown.
    ScrapeWebsite { url: String },

    /// Convert text to speech.
    TextToSpeech { text: String },
}

/// Tool execution context with access to the external services.
///
/// Audio produced by `text_to_speech` is kept here rather than sent back to
/// the model, which only sees a short confirmation.
pub struct ToolContext {
    pub scraper: Arc<dyn Scraper>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    max_content_chars: usize,
    max_speech_chars: usize,
    audio: Mutex<Vec<AudioPayload>>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(scraper: Arc<dyn Scraper>, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            scraper,
            synthesizer,
            max_content_chars: 20_000,
            max_speech_chars: 2_000,
            audio: Mutex::new(Vec::new()),
        }
    }

    /// Set the maximum number of scraped characters shown to the model.
    pub fn with_max_content_chars(mut self, max: usize) -> Self {
        self.max_content_chars = max;
        self
    }

    /// Set the maximum text length accepted by `text_to_speech`.
    pub fn with_max_speech_chars(mut self, max: usize) -> Self {
        self.max_speech_chars = max;
        self
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::ScrapeWebsite { url } => self.execute_scrape(url).await,
            ToolCall::TextToSpeech { text } => self.execute_text_to_speech(text).await,
        }
    }

    /// Take all audio produced so far, in production order.
    pub fn take_audio(&self) -> Vec<AudioPayload> {
        let mut audio = self.audio.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *audio)
    }

    async fn execute_scrape(&self, url: &str) -> Result<String> {
        let page = self.scraper.scrape(url).await?;
        Ok(page.to_prompt_text(self.max_content_chars))
    }

    async fn execute_text_to_speech(&self, text: &str) -> Result<String> {
        let chars = text.chars().count();
        if chars > self.max_speech_chars {
            return Err(BlogcastError::Speech(format!(
                "text is {} characters but the limit is {}. Shorten the summary and try again.",
                chars, self.max_speech_chars
            )));
        }

        let payload = self.synthesizer.synthesize(text).await?;
        let id = payload.id.clone();
        self.audio
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(payload);

        Ok(format!("Audio generated successfully (id: {}).", id))
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "scrape_website".to_string(),
                description: Some(
                    "Scrape a web page and return its main content as markdown. \
                    Use this to read the blog post before summarizing it."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "The URL to scrape"
                        }
                    },
                    "required": ["url"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "text_to_speech".to_string(),
                description: Some(
                    "Convert text to spoken audio. \
                    Use this once with the final summary to produce the podcast."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "The text to speak"
                        }
                    },
                    "required": ["text"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| BlogcastError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "scrape_website" => {
            let url = args["url"]
                .as_str()
                .ok_or_else(|| BlogcastError::Agent("Missing 'url' argument".to_string()))?
                .to_string();
            Ok(ToolCall::ScrapeWebsite { url })
        }
        "text_to_speech" => {
            let text = args["text"]
                .as_str()
                .ok_or_else(|| BlogcastError::Agent("Missing 'text' argument".to_string()))?
                .to_string();
            Ok(ToolCall::TextToSpeech { text })
        }
        _ => Err(BlogcastError::Agent(format!("Unknown tool: {}", name))),
    }
}
