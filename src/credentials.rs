//! API credentials for the three external services.
//!
//! Credentials are carried explicitly through each call instead of being
//! written into the process environment, so concurrent sessions never see
//! each other's keys.

use crate::error::{BlogcastError, Result};

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable holding the ElevenLabs API key.
pub const ELEVENLABS_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
/// Environment variable holding the Firecrawl API key.
pub const FIRECRAWL_API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

/// The three secrets needed to produce a podcast.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai: String,
    pub elevenlabs: String,
    pub firecrawl: String,
}

impl Credentials {
    /// Create credentials from the three keys.
    pub fn new(
        openai: impl Into<String>,
        elevenlabs: impl Into<String>,
        firecrawl: impl Into<String>,
    ) -> Self {
        Self {
            openai: openai.into(),
            elevenlabs: elevenlabs.into(),
            firecrawl: firecrawl.into(),
        }
    }

    /// Read whatever keys are present in the environment. Missing ones stay empty.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            openai: var(OPENAI_API_KEY_ENV),
            elevenlabs: var(ELEVENLABS_API_KEY_ENV),
            firecrawl: var(FIRECRAWL_API_KEY_ENV),
        }
    }

    /// True when all three keys are non-empty.
    pub fn is_ready(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the services whose key is empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai.is_empty() {
            missing.push("OpenAI");
        }
        if self.elevenlabs.is_empty() {
            missing.push("ElevenLabs");
        }
        if self.firecrawl.is_empty() {
            missing.push("Firecrawl");
        }
        missing
    }

    /// Fail with a configuration error unless every key is present.
    pub fn require_ready(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BlogcastError::MissingCredentials(missing))
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai", &mask(&self.openai))
            .field("elevenlabs", &mask(&self.elevenlabs))
            .field("firecrawl", &mask(&self.firecrawl))
            .finish()
    }
}

/// Mask a secret for display, keeping only enough to recognise it.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "<empty>".to_string(),
        n if n <= 8 => "****".to_string(),
        n => {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[n - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}
