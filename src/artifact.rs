//! Storage for generated podcast audio.
//!
//! Each podcast is written once to `podcast_<uuid>.wav` in the artifact
//! directory. Files are kept until pruned, either explicitly or by the
//! `max_files` retention limit. Automatic pruning never removes files younger
//! than the grace period.

use crate::error::{BlogcastError, Result};
use crate::speech::AudioPayload;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const FILE_PREFIX: &str = "podcast_";
const FILE_EXTENSION: &str = "wav";
const DEFAULT_PRUNE_GRACE: Duration = Duration::from_secs(300);

/// A persisted podcast file.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub id: Uuid,
    pub path: PathBuf,
}

/// Listing entry for a stored podcast.
#[derive(Debug, Clone)]
pub struct ArtifactInfo {
    pub id: Uuid,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}

/// Directory-backed podcast store.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    max_files: Option<usize>,
    prune_grace: Duration,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_files: None,
            prune_grace: DEFAULT_PRUNE_GRACE,
        }
    }

    /// Keep at most `max` files, deleting the oldest after each write.
    ///
    /// Files younger than the grace period are never deleted this way, so the
    /// directory may briefly hold more than `max` files under load.
    pub fn with_max_files(mut self, max: Option<usize>) -> Self {
        self.max_files = max;
        self
    }

    /// Minimum age before a file can be removed by automatic retention.
    pub fn with_prune_grace(mut self, grace: Duration) -> Self {
        self.prune_grace = grace;
        self
    }

    /// The directory holding the podcasts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for a given id.
    pub fn file_name(id: &Uuid) -> String {
        format!("{}{}.{}", FILE_PREFIX, id, FILE_EXTENSION)
    }

    /// Persist the first audio payload.
    ///
    /// Fails with [`BlogcastError::NoAudio`] when `audio` is empty; in that
    /// case nothing is touched on disk.
    #[instrument(skip(self, audio), fields(payloads = audio.len()))]
    pub fn persist(&self, audio: &[AudioPayload]) -> Result<Artifact> {
        let first = audio.first().ok_or(BlogcastError::NoAudio)?;
        let bytes = first.decode()?;

        std::fs::create_dir_all(&self.dir)?;

        let id = Uuid::new_v4();
        let path = self.dir.join(Self::file_name(&id));

        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;

        info!("Saved podcast to {} ({} bytes)", path.display(), bytes.len());

        if let Some(max) = self.max_files {
            match self.prune_except(max, Some(&id), self.prune_grace) {
                Ok(removed) if removed > 0 => debug!("Pruned {} old podcasts", removed),
                Ok(_) => {}
                Err(e) => warn!("Failed to prune old podcasts: {}", e),
            }
        }

        Ok(Artifact { id, path })
    }

    /// Resolve the path of an existing podcast from its id string.
    ///
    /// Only well-formed UUIDs are accepted, so the id can never name a file
    /// outside the store.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        let id = Uuid::parse_str(id).map_err(|_| BlogcastError::ArtifactNotFound(id.to_string()))?;
        let path = self.dir.join(Self::file_name(&id));
        if path.is_file() {
            Ok(path)
        } else {
            Err(BlogcastError::ArtifactNotFound(id.to_string()))
        }
    }

    /// Read a podcast's bytes.
    pub fn read(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.path_for(id)?;
        Ok(std::fs::read(path)?)
    }

    /// List stored podcasts, newest first.
    pub fn list(&self) -> Result<Vec<ArtifactInfo>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(id) = parse_file_name(&path) else {
                continue;
            };
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map(DateTime::<Local>::from)
                .unwrap_or_else(|_| Local::now());
            items.push(ArtifactInfo {
                id,
                path,
                size_bytes: metadata.len(),
                modified,
            });
        }

        items.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(items)
    }

    /// Delete all but the `keep` newest podcasts. Returns how many were removed.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        self.prune_except(keep, None, Duration::ZERO)
    }

    fn prune_except(&self, keep: usize, protect: Option<&Uuid>, grace: Duration) -> Result<usize> {
        let items = self.list()?;
        let now = Local::now();
        let mut kept = 0;
        let mut removed = 0;

        // The protected file always counts towards the limit
        if let Some(id) = protect {
            if items.iter().any(|i| &i.id == id) {
                kept += 1;
            }
        }

        for item in items {
            if Some(&item.id) == protect {
                continue;
            }
            if kept < keep {
                kept += 1;
                continue;
            }
            let age = (now - item.modified).to_std().unwrap_or(Duration::ZERO);
            if age < grace {
                continue;
            }
            std::fs::remove_file(&item.path)?;
            removed += 1;
        }

        Ok(removed)
    }
}

/// Extract the id from a `podcast_<uuid>.wav` path.
fn parse_file_name(path: &Path) -> Option<Uuid> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_EXTENSION)?
        .strip_suffix('.')?;
    Uuid::parse_str(stem).ok()
}
