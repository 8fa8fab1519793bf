use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Selects whether only audio or full audio+video is fetched.
/// Chosen once per run and applied to the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Parses the interactive `V`/`A` selector, case-insensitive.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "a" => Some(MediaKind::Audio),
            "v" => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn subdir(self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
        }
    }

    /// Format selector handed to the downloader's `-f` flag.
    pub fn format_selector(self) -> &'static str {
        match self {
            MediaKind::Audio => "bestaudio",
            MediaKind::Video => "bestvideo+bestaudio/best",
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to create output directory {}: {}", path.display(), source)]
pub struct DirectoryCreateError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Ensures the kind-specific output directory exists and returns it.
/// Succeeds if it is already present.
pub async fn ensure_output_dir(
    base: &Path,
    kind: MediaKind,
) -> Result<PathBuf, DirectoryCreateError> {
    let dir = base.join(kind.subdir());
    fs::create_dir_all(&dir)
        .await
        .map_err(|source| DirectoryCreateError {
            path: dir.clone(),
            source,
        })?;
    Ok(dir)
}
