use std::path::{Path, PathBuf};

use tokio::{fs, process::Command};
use tracing::{debug, error, info, warn};

use crate::config::run_config::Ffmpeg;

/// Result of a single media-processor run.
#[derive(Debug)]
pub struct StripOutcome {
    pub success: bool,
    /// Tool stderr, for the log.
    pub detail: String,
}

/// External media processor capability: copy both streams verbatim into
/// `output` while discarding all metadata tags.
#[allow(async_fn_in_trait)]
pub trait MediaProcessor {
    async fn copy_without_metadata(
        &self,
        input: &Path,
        output: &Path,
    ) -> std::io::Result<StripOutcome>;
}

impl MediaProcessor for Ffmpeg {
    async fn copy_without_metadata(
        &self,
        input: &Path,
        output: &Path,
    ) -> std::io::Result<StripOutcome> {
        let mut cmd = Command::new(&self.path);
        cmd.arg("-hide_banner").arg("-i").arg(input);
        cmd.args([
            // Remove all metadata
            "-map_metadata",
            "-1",
            // Copy video and audio without re-encoding
            "-c:v",
            "copy",
            "-c:a",
            "copy",
            // Overwrite an existing file if needed
            "-y",
        ])
        .arg(output);

        debug!("ffmpeg params: {:?}", cmd);

        let out = cmd.output().await?;
        Ok(StripOutcome {
            success: out.status.success(),
            detail: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        })
    }
}

/// Sibling path the stripped copy is written to before the rename.
/// Same directory and extension, `_stripped` appended to the stem.
fn stripped_sibling(path: &Path) -> PathBuf {
    let mut file_name = match path.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => String::new(),
    };
    file_name.push_str("_stripped");
    if let Some(ext) = path.extension() {
        file_name.push('.');
        file_name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(file_name)
}

/// Strips all metadata from the fetched file, replacing it in place.
///
/// Best effort: every failure is logged and swallowed, the batch never stops
/// here and the fetched file is kept when the stripped copy cannot be made.
pub async fn strip_metadata<P: MediaProcessor>(processor: &P, file_path: &Path) {
    if fs::metadata(file_path).await.is_err() {
        error!(
            "File not found for metadata stripping: {}",
            file_path.display()
        );
        return;
    }

    let stripped_path = stripped_sibling(file_path);

    match processor.copy_without_metadata(file_path, &stripped_path).await {
        Ok(outcome) if outcome.success => {
            // Same directory, so the rename is atomic
            match fs::rename(&stripped_path, file_path).await {
                Ok(()) => info!("Metadata successfully stripped for: {}", file_path.display()),
                Err(e) => error!(
                    "Failed to replace {} with the stripped copy: {}",
                    file_path.display(),
                    e
                ),
            }
        }
        Ok(outcome) => {
            warn!(
                "Media processor encountered a non-critical issue while stripping metadata: {}",
                outcome.detail
            );
            // A non-zero exit does not mean nothing was written (e.g. no
            // metadata present), replace whenever the stripped copy exists
            if fs::metadata(&stripped_path).await.is_ok() {
                if let Err(e) = fs::rename(&stripped_path, file_path).await {
                    error!(
                        "Failed to replace {} with the stripped copy: {}",
                        file_path.display(),
                        e
                    );
                }
            }
        }
        Err(e) => error!(
            "Error stripping metadata for {}: {}",
            file_path.display(),
            e
        ),
    }
}
