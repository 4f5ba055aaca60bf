//! CLI module for Blogcast.

pub mod commands;
mod output;

pub use output::Output;

use crate::credentials::{ELEVENLABS_API_KEY_ENV, FIRECRAWL_API_KEY_ENV, OPENAI_API_KEY_ENV};
use clap::{Parser, Subcommand};

/// Blogcast - turn blog posts into podcasts
///
/// Scrapes an article, summarizes it with an AI agent and reads the summary
/// aloud with a synthetic voice.
#[derive(Parser, Debug)]
#[command(name = "blogcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web interface
    Serve {
        /// Host to bind to (defaults to server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a podcast from a blog post URL
    Generate {
        /// URL of the article or blog post
        url: String,

        /// OpenAI API key
        #[arg(long, env = OPENAI_API_KEY_ENV, hide_env_values = true)]
        openai_key: Option<String>,

        /// ElevenLabs API key
        #[arg(long, env = ELEVENLABS_API_KEY_ENV, hide_env_values = true)]
        elevenlabs_key: Option<String>,

        /// Firecrawl API key
        #[arg(long, env = FIRECRAWL_API_KEY_ENV, hide_env_values = true)]
        firecrawl_key: Option<String>,

        /// Copy the podcast to this path as well
        #[arg(short, long)]
        output: Option<String>,

        /// Write the summary to this file
        #[arg(long)]
        summary_out: Option<String>,
    },

    /// Check API keys and configuration
    Doctor,

    /// Manage generated podcasts
    Artifacts {
        #[command(subcommand)]
        action: ArtifactAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ArtifactAction {
    /// List generated podcasts, newest first
    List,

    /// Delete old podcasts
    Prune {
        /// Number of most recent podcasts to keep
        #[arg(short, long, default_value = "10")]
        keep: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
