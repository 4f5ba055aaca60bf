//! Generate command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::credentials::Credentials;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Keys passed on the command line or picked up from the environment.
pub struct KeyArgs {
    pub openai: Option<String>,
    pub elevenlabs: Option<String>,
    pub firecrawl: Option<String>,
}

/// Run the generate command.
///
/// Returns `Ok(false)` when generation failed. The failure has already been
/// reported to the user by then, so the caller only sets the exit status.
pub async fn run_generate(
    url: &str,
    keys: KeyArgs,
    output: Option<String>,
    summary_out: Option<String>,
    settings: Settings,
) -> Result<bool> {
    let credentials = Credentials::new(
        keys.openai.unwrap_or_default(),
        keys.elevenlabs.unwrap_or_default(),
        keys.firecrawl.unwrap_or_default(),
    );

    let orchestrator = Orchestrator::new(settings)?;
    generate_with(&orchestrator, &credentials, url, output, summary_out).await
}

async fn generate_with(
    orchestrator: &Orchestrator,
    credentials: &Credentials,
    url: &str,
    output: Option<String>,
    summary_out: Option<String>,
) -> Result<bool> {
    let spinner = Output::spinner("Processing: scraping, summarizing, and generating audio...");
    let result = orchestrator.generate(credentials, url).await;
    spinner.finish_and_clear();

    let podcast = match result {
        Ok(podcast) => podcast,
        Err(e) => {
            Output::error(&e.user_message());
            return Ok(false);
        }
    };

    Output::success("Podcast generated successfully!");
    Output::kv("Source", podcast.source_url.as_str());
    Output::kv("Audio", &podcast.artifact.path.display().to_string());

    if let Some(path) = output {
        std::fs::copy(&podcast.artifact.path, &path)?;
        Output::kv("Copied to", &path);
    }

    if let Some(summary) = &podcast.summary {
        Output::header("Summary Used for Podcast");
        println!("{}\n", summary);

        if let Some(path) = summary_out {
            std::fs::write(&path, summary)?;
            Output::kv("Summary saved to", &path);
        }
    } else if summary_out.is_some() {
        Output::warning("The agent returned no summary text; nothing written.");
    }

    Ok(true)
}
