use tokio::process::Command;

use indicatif::ProgressStyle;
use tracing::{debug, instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::*;

use crate::config::run_config::YtDlp;

impl Downloader for YtDlp {
    /// Downloads one url using yt-dlp.
    /// The output template roots the file at the request's directory and
    /// leaves title and extension to the tool.
    #[instrument(skip(self, request))]
    async fn download(&self, request: &DownloadRequest<'_>) -> Result<String, FetchError> {
        let output_template = request.out_dir.join("%(title)s.%(ext)s");

        let mut cmd = Command::new(&self.path);
        cmd.arg("-f")
            .arg(request.kind.format_selector())
            .arg("--output")
            .arg(&output_template)
            .args([
                // Sanitize filenames
                "--restrict-filenames",
                // Don't use original upload time for the file
                "--no-mtime",
                // Do not embed any remote metadata
                "--no-embed-metadata",
                // Progress would interleave with the destination lines we parse
                "--no-progress",
            ]);
        match request.kind {
            MediaKind::Audio => {
                cmd.args(["--extract-audio", "--audio-format"])
                    .arg(&self.audio_format);
            }
            MediaKind::Video => {
                cmd.arg("--merge-output-format").arg(&self.video_container);
            }
        }
        cmd.args(&self.params).arg(request.url);

        debug!("yt-dlp params: {:?}", cmd);

        let mut template = "{spinner:.green} [{elapsed_precise}] Downloading: ".to_string();
        template.push_str(request.url);
        if let Ok(style) = ProgressStyle::default_spinner().template(&template) {
            Span::current().pb_set_style(&style);
        }

        let output = cmd.output().await.map_err(FetchError::Spawn)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!("yt-dlp stdout: {}", stdout);
        debug!("yt-dlp stderr: {}", stderr);

        if !output.status.success() {
            return Err(FetchError::Failed {
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout)
    }
}
