use std::path::Path;

use tracing::info;

use crate::{
    fetch::{self, DownloadRequest, Downloader, FetchError},
    output::{self, MediaKind},
    status_bar::StatusBar,
    strip::{self, MediaProcessor},
    Result,
};

/// Sequential fetch + strip driver for one run.
///
/// Generic over the two tool capabilities so the pipeline can be exercised
/// without the real binaries.
pub struct Batch<D, P> {
    downloader: D,
    processor: P,
    pub status_bar: StatusBar,
}

impl<D: Downloader, P: MediaProcessor> Batch<D, P> {
    pub fn new(downloader: D, processor: P) -> Self {
        Self {
            downloader,
            processor,
            status_bar: StatusBar::default(),
        }
    }

    /// Processes every url strictly in order, one at a time.
    ///
    /// Per-url failures are reported and do not stop the batch; only a failure
    /// to create the output directory is fatal.
    pub async fn run(&mut self, urls: &[String], kind: MediaKind, base_dir: &Path) -> Result<()> {
        let out_dir = output::ensure_output_dir(base_dir, kind).await?;

        for url in urls {
            self.process_url(url, &out_dir, kind).await;
        }

        Ok(())
    }

    async fn process_url(&mut self, url: &str, out_dir: &Path, kind: MediaKind) {
        info!("Downloading started for URL: {} to {}", url, out_dir.display());

        let request = DownloadRequest { url, out_dir, kind };
        match fetch::fetch(&self.downloader, &request).await {
            Ok(file_path) => {
                // Stripping is advisory, the fetched file stays either way
                strip::strip_metadata(&self.processor, &file_path).await;
                let message = format!("{} from {}", file_path.display(), url);
                self.status_bar.register_completed(message.as_str());
                println!(
                    "Media downloaded and metadata stripped successfully for URL: {}",
                    url
                );
            }
            Err(FetchError::DestinationNotFound) => {
                let message = format!("could not locate final file for {}", url);
                self.status_bar.register_unlocated(message.as_str());
                println!(
                    "Failed to locate the final file for URL: {}. Check log for details.",
                    url
                );
            }
            Err(e) => {
                let message = format!("{}: {}", url, e);
                self.status_bar.register_err(message.as_str());
                println!(
                    "Error: Failed to download URL: {}. Check the log for more details.",
                    url
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::strip::StripOutcome;

    /// What the scripted downloader should do for one url.
    enum Step {
        /// Create the artifact and announce it in the output.
        Produce(PathBuf),
        /// Exit zero but never print a destination line.
        NoDestination,
        /// Simulate a non-zero tool exit.
        Fail,
    }

    struct ScriptedDownloader {
        script: Mutex<VecDeque<Step>>,
    }

    impl ScriptedDownloader {
        fn new(script: Vec<Step>) -> Self {
            Self {
                script: Mutex::new(script.into()),
            }
        }
    }

    impl Downloader for ScriptedDownloader {
        async fn download(&self, _request: &DownloadRequest<'_>) -> std::result::Result<String, FetchError> {
            let step = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted");
            match step {
                Step::Produce(path) => {
                    std::fs::write(&path, b"media").unwrap();
                    Ok(format!(
                        "[youtube] extracting\n[download] Destination: {}\n[Merger] done\n",
                        path.display()
                    ))
                }
                Step::NoDestination => Ok("[youtube] extracting\nall done\n".to_string()),
                Step::Fail => {
                    use std::os::unix::process::ExitStatusExt;
                    Err(FetchError::Failed {
                        status: std::process::ExitStatus::from_raw(256),
                        stderr: "simulated download failure".to_string(),
                    })
                }
            }
        }
    }

    #[derive(Default)]
    struct RecordingProcessor {
        calls: Mutex<Vec<PathBuf>>,
    }

    impl MediaProcessor for RecordingProcessor {
        async fn copy_without_metadata(
            &self,
            input: &Path,
            output: &Path,
        ) -> std::io::Result<StripOutcome> {
            self.calls.lock().unwrap().push(input.to_path_buf());
            std::fs::copy(input, output)?;
            Ok(StripOutcome {
                success: true,
                detail: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn video_url_ends_up_stripped_in_place() {
        let base = tempfile::tempdir().unwrap();
        let artifact = base.path().join("Video").join("example_video.mp4");

        let downloader = ScriptedDownloader::new(vec![Step::Produce(artifact.clone())]);
        let mut batch = Batch::new(downloader, RecordingProcessor::default());

        let urls = vec!["https://example.com/watch?v=1".to_string()];
        batch.run(&urls, MediaKind::Video, base.path()).await.unwrap();

        // The stripper ran on exactly the path parsed from the tool output
        assert_eq!(
            *batch.processor.calls.lock().unwrap(),
            vec![artifact.clone()]
        );
        // and the artifact is still at that path
        assert!(artifact.exists());
        assert_eq!(batch.status_bar.completed(), 1);
        assert_eq!(batch.status_bar.errors(), 0);
    }

    #[tokio::test]
    async fn one_failing_url_does_not_stop_the_batch() {
        let base = tempfile::tempdir().unwrap();
        let first = base.path().join("Video").join("first.mp4");
        let third = base.path().join("Video").join("third.mp4");

        let downloader = ScriptedDownloader::new(vec![
            Step::Produce(first.clone()),
            Step::Fail,
            Step::Produce(third.clone()),
        ]);
        let mut batch = Batch::new(downloader, RecordingProcessor::default());

        let urls = vec![
            "https://example.com/1".to_string(),
            "https://example.com/2".to_string(),
            "https://example.com/3".to_string(),
        ];
        let result = batch.run(&urls, MediaKind::Video, base.path()).await;

        // Batch level result is unaffected by per-url failures
        assert!(result.is_ok());
        assert!(first.exists());
        assert!(third.exists());
        assert_eq!(batch.status_bar.completed(), 2);
        assert_eq!(batch.status_bar.errors(), 1);
    }

    #[tokio::test]
    async fn unparseable_output_is_reported_separately() {
        let base = tempfile::tempdir().unwrap();

        let downloader = ScriptedDownloader::new(vec![Step::NoDestination]);
        let mut batch = Batch::new(downloader, RecordingProcessor::default());

        let urls = vec!["https://example.com/1".to_string()];
        batch.run(&urls, MediaKind::Audio, base.path()).await.unwrap();

        assert_eq!(batch.status_bar.unlocated(), 1);
        assert_eq!(batch.status_bar.errors(), 0);
        // Nothing was handed to the stripper
        assert!(batch.processor.calls.lock().unwrap().is_empty());
    }
}
