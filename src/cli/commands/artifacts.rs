//! Artifacts command implementation.

use crate::artifact::ArtifactStore;
use crate::cli::{ArtifactAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the artifacts command.
pub fn run_artifacts(action: &ArtifactAction, settings: &Settings) -> Result<()> {
    let store = ArtifactStore::new(settings.artifact_dir());

    match action {
        ArtifactAction::List => {
            let items = store.list()?;
            Output::header(&format!("Podcasts in {}", store.dir().display()));
            if items.is_empty() {
                Output::info("No podcasts generated yet.");
                return Ok(());
            }
            for item in &items {
                Output::artifact_line(
                    &item.id.to_string(),
                    &item.modified.format("%Y-%m-%d %H:%M:%S").to_string(),
                    item.size_bytes,
                );
            }
            println!();
            Output::info(&format!("{} podcast(s)", items.len()));
        }

        ArtifactAction::Prune { keep } => {
            let removed = store.prune(*keep)?;
            if removed == 0 {
                Output::info("Nothing to prune.");
            } else {
                Output::success(&format!("Removed {} old podcast(s), kept {}.", removed, keep));
            }
        }
    }

    Ok(())
}
