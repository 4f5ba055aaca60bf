//! Configuration settings for Blogcast.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub openai: OpenAISettings,
    pub agent: AgentSettings,
    pub elevenlabs: ElevenLabsSettings,
    pub firecrawl: FirecrawlSettings,
    pub artifacts: ArtifactSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.blogcast".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// OpenAI chat model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Chat model driving the agent.
    pub model: String,
    /// Override for the API base URL (proxies, compatible servers).
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            api_base: None,
            timeout_seconds: 300,
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Maximum number of model calls per run.
    pub max_iterations: usize,
    /// Upper bound on summary length handed to speech synthesis.
    pub max_summary_chars: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_summary_chars: 2000,
        }
    }
}

/// ElevenLabs text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevenLabsSettings {
    /// API base URL.
    pub base_url: String,
    /// Voice used for every podcast.
    pub voice_id: String,
    /// Synthesis model.
    pub model_id: String,
    /// Output format requested from the API. Only `pcm_<rate>` (wrapped into WAV)
    /// and `wav_<rate>` are accepted.
    pub output_format: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ElevenLabsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            model_id: "eleven_monolingual_v1".to_string(),
            output_format: "pcm_24000".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Firecrawl scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirecrawlSettings {
    /// API base URL.
    pub base_url: String,
    /// Scraped markdown is cut to this many characters before reaching the model.
    pub max_content_chars: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FirecrawlSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.firecrawl.dev".to_string(),
            max_content_chars: 20_000,
            timeout_seconds: 120,
        }
    }
}

/// Generated audio retention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Directory holding generated podcasts.
    pub dir: String,
    /// Keep at most this many podcasts; older ones are deleted after each run.
    /// `None` keeps everything.
    pub max_files: Option<usize>,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: "~/.blogcast/audio_generations".to_string(),
            max_files: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::BlogcastError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blogcast")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded artifact directory path.
    pub fn artifact_dir(&self) -> PathBuf {
        Self::expand_path(&self.artifacts.dir)
    }
}
