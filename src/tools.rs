use std::path::Path;
use std::process::Stdio;

use anyhow::bail;
use tokio::process::Command;
use tracing::debug;

use crate::config::run_config::{Ffmpeg, YtDlp};
use crate::Result;

/// Checks that a tool answers its version query with a zero exit.
/// False when the process cannot be started at all.
pub async fn check_tool_available(path: &Path, version_arg: &str) -> bool {
    let status = Command::new(path)
        .arg(version_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("Tool {} could not be started: {}", path.display(), e);
            false
        }
    }
}

impl YtDlp {
    pub async fn is_available(&self) -> bool {
        check_tool_available(&self.path, "--version").await
    }
}

impl Ffmpeg {
    // ffmpeg uses a single dash for its version query
    pub async fn is_available(&self) -> bool {
        check_tool_available(&self.path, "-version").await
    }
}

/// Verifies both external tools. Runs before any prompt is shown, a missing
/// tool terminates the program.
pub async fn preflight(yt_dlp: &YtDlp, ffmpeg: &Ffmpeg) -> Result<()> {
    if !yt_dlp.is_available().await {
        bail!("yt-dlp not installed (looked for `{}`)", yt_dlp.path.display());
    }
    if !ffmpeg.is_available().await {
        bail!("FFmpeg not installed (looked for `{}`)", ffmpeg.path.display());
    }
    Ok(())
}
