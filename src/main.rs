//! Blogcast CLI entry point.

use anyhow::Result;
use blogcast::cli::commands::{self, KeyArgs};
use blogcast::cli::{Cli, Commands};
use blogcast::config::Settings;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("blogcast={},tower_http={}", log_level, log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    match cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host, port, settings).await?;
        }

        Commands::Generate {
            url,
            openai_key,
            elevenlabs_key,
            firecrawl_key,
            output,
            summary_out,
        } => {
            let keys = KeyArgs {
                openai: openai_key,
                elevenlabs: elevenlabs_key,
                firecrawl: firecrawl_key,
            };
            if !commands::run_generate(&url, keys, output, summary_out, settings).await? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Artifacts { action } => {
            commands::run_artifacts(&action, &settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, config_path)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
