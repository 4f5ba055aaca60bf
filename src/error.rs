//! Error types for Blogcast.

use serde::Serialize;
use thiserror::Error;

/// Library-level error type for Blogcast operations.
#[derive(Error, Debug)]
pub enum BlogcastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing API keys: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("Scraping failed: {0}")]
    Scrape(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("No audio was generated")]
    NoAudio,

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Result type alias for Blogcast operations.
pub type Result<T> = std::result::Result<T, BlogcastError>;

/// The closed set of failure kinds a user can see.
///
/// Every [`BlogcastError`] maps onto exactly one of these before it is
/// presented, so callers never show raw error type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// One or more required secrets are missing.
    Configuration,
    /// The submitted input failed validation.
    Input,
    /// The external orchestration call failed.
    Orchestration,
    /// The orchestration call succeeded but produced no audio.
    EmptyResult,
}

impl ErrorKind {
    /// Render the single message shown to the user for this kind.
    pub fn user_message(&self, detail: &str) -> String {
        match self {
            ErrorKind::Configuration => {
                format!("Please provide all three API keys ({}).", detail)
            }
            ErrorKind::Input => {
                "Please enter a valid URL that starts with http:// or https://".to_string()
            }
            ErrorKind::Orchestration => {
                format!("Podcast generation failed: {}", detail)
            }
            ErrorKind::EmptyResult => {
                "No audio was generated. Please try again later.".to_string()
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Input => write!(f, "input"),
            ErrorKind::Orchestration => write!(f, "orchestration"),
            ErrorKind::EmptyResult => write!(f, "empty_result"),
        }
    }
}

impl BlogcastError {
    /// Classify this error for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogcastError::Config(_) | BlogcastError::MissingCredentials(_) => {
                ErrorKind::Configuration
            }
            BlogcastError::InvalidUrl(_) | BlogcastError::ArtifactNotFound(_) => ErrorKind::Input,
            BlogcastError::NoAudio => ErrorKind::EmptyResult,
            _ => ErrorKind::Orchestration,
        }
    }

    /// The message shown to the user for this error.
    pub fn user_message(&self) -> String {
        let detail = match self {
            BlogcastError::MissingCredentials(names) => format!("missing: {}", names.join(", ")),
            other => other.to_string(),
        };
        self.kind().user_message(&detail)
    }
}
