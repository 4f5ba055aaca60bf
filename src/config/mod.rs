//! Configuration module for Blogcast.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts};
pub use settings::{
    AgentSettings, ArtifactSettings, ElevenLabsSettings, FirecrawlSettings, GeneralSettings,
    OpenAISettings, PromptSettings, ServerSettings, Settings,
};
