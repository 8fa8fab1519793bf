use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::Result;

/// Reads the config, falling back to defaults when the file does not exist.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                "No config file at {}, using defaults",
                path.as_ref().display()
            );
            return Ok(Config::default());
        }
        Err(e) => return Err(e).with_context(|| "Failed to read config file"),
    };
    let config: Config = serde_yml::from_str(&contents)
        .with_context(|| "Could not parse config (There is most likely an error in the config)")?;
    debug!("Read config: {:?}", config);
    Ok(config)
}

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub yt_dlp: YtDlp,
    pub ffmpeg: Ffmpeg,
    /// Base directory for downloads, defaults to YouTube_downloads next to the binary
    pub download_dir: Option<PathBuf>,
    /// Per-run summary log, appended after every run
    pub log_file: Option<PathBuf>,
}

/// External downloader settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct YtDlp {
    pub path: PathBuf,
    /// Extra parameters appended to every invocation
    pub params: Vec<String>,
    /// Post-extraction codec for audio-only downloads
    pub audio_format: String,
    /// Container for merged video downloads
    pub video_container: String,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self {
            path: PathBuf::from("yt-dlp"),
            params: Vec::new(),
            audio_format: "mp3".to_string(),
            video_container: "mp4".to_string(),
        }
    }
}

/// External media processor settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ffmpeg {
    pub path: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ffmpeg"),
        }
    }
}

/// Directory of the running executable.
pub fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

impl Config {
    /// Base directory downloads are sorted into.
    pub fn resolve_download_dir(&self) -> Result<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(program_dir()?.join("YouTube_downloads")),
        }
    }
}
