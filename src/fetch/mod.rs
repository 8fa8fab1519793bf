pub mod destination;
pub mod yt_dlp;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use crate::output::MediaKind;

/// A single download request as handed to the external downloader.
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub out_dir: &'a Path,
    pub kind: MediaKind,
}

/// Per-url download failures. None of these stop the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to start the downloader: {0}")]
    Spawn(std::io::Error),
    #[error("downloader exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    /// The tool reported success but its output had no destination line,
    /// so the artifact path could not be determined.
    #[error("downloader output did not contain a destination line")]
    DestinationNotFound,
}

/// External downloader capability.
///
/// Implementations run the tool to completion for one request and return its
/// captured standard output, or an error for a spawn failure / non-zero exit.
#[allow(async_fn_in_trait)]
pub trait Downloader {
    async fn download(&self, request: &DownloadRequest<'_>) -> Result<String, FetchError>;
}

/// Downloads a single url and resolves the artifact path from the tool's output.
pub async fn fetch<D: Downloader>(
    downloader: &D,
    request: &DownloadRequest<'_>,
) -> Result<PathBuf, FetchError> {
    let stdout = downloader.download(request).await?;
    destination::extract_destination(&stdout).ok_or(FetchError::DestinationNotFound)
}
