//! Blogcast - Blog to Podcast
//!
//! Turns a blog post into a short spoken podcast.
//!
//! # Overview
//!
//! Given an article URL, Blogcast:
//! - Scrapes the article through Firecrawl
//! - Has an OpenAI tool-calling agent summarize it
//! - Reads the summary aloud with ElevenLabs
//! - Stores the audio and serves it through a small web page
//!
//! All heavy lifting happens in those hosted services. This crate validates
//! input, carries the user's keys to each service and persists the result.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `credentials` - The three API keys and the readiness gate
//! - `validation` - Source URL validation
//! - `scraper` - Web content extraction
//! - `speech` - Text-to-speech synthesis
//! - `agent` - Tool-calling agent loop
//! - `artifact` - Generated audio storage
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use blogcast::config::Settings;
//! use blogcast::credentials::Credentials;
//! use blogcast::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = Orchestrator::new(Settings::load()?)?;
//!     let credentials = Credentials::from_env();
//!
//!     let podcast = orchestrator
//!         .generate(&credentials, "https://blog.example.com/post")
//!         .await?;
//!     println!("Saved to {}", podcast.artifact.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod scraper;
pub mod speech;
pub mod validation;

pub use error::{BlogcastError, ErrorKind, Result};
