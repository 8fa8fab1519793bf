use std::path::PathBuf;

use indicatif::ProgressBar;
use tokio::fs;

use dialoguer::Input;

use crate::config::run_config::{Ffmpeg, YtDlp};
use crate::Result;

pub async fn generate_config() -> Result<()> {
    let downloader_path: String = Input::new()
        .with_prompt("Path to the yt-dlp executable")
        .default("yt-dlp".to_string())
        .interact_text()?;

    let processor_path: String = Input::new()
        .with_prompt("Path to the ffmpeg executable")
        .default("ffmpeg".to_string())
        .interact_text()?;

    let download_dir: String = Input::new()
        .with_prompt("Download directory (leave empty for YouTube_downloads next to the binary)")
        .allow_empty(true)
        .interact_text()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Checking tools...");

    let yt_dlp = YtDlp {
        path: PathBuf::from(&downloader_path),
        ..Default::default()
    };
    let ffmpeg = Ffmpeg {
        path: PathBuf::from(&processor_path),
    };
    let yt_dlp_found = yt_dlp.is_available().await;
    let ffmpeg_found = ffmpeg.is_available().await;

    spinner.finish_with_message("Tool check finished!");

    if !yt_dlp_found {
        println!(
            "Warning: `{}` did not answer its version query, double check the path!",
            downloader_path
        );
    }
    if !ffmpeg_found {
        println!(
            "Warning: `{}` did not answer its version query, double check the path!",
            processor_path
        );
    }

    // Config head
    let mut conf = format!(
        r#"# External downloader (yt-dlp)
yt_dlp:
  path: {}
  # Extra parameters appended to every invocation
  params: []
  # Post-extraction codec for audio-only downloads
  audio_format: mp3
  # Container for merged video downloads
  video_container: mp4

# External media processor (ffmpeg)
ffmpeg:
  path: {}
"#,
        downloader_path, processor_path
    );

    if download_dir.trim().is_empty() {
        conf.push_str(
            r#"
# Optional: base directory for downloads
# download_dir: /path/to/downloads
"#,
        );
    } else {
        conf.push_str(&format!(
            r#"
# Base directory for downloads
download_dir: {}
"#,
            download_dir.trim()
        ));
    }

    conf.push_str(
        r#"
# Optional: per-run summary log (appended after every run)
log_file: scrub-dl.log
"#,
    );

    let config_path = ".scrub-dl-config.yml";
    fs::write(config_path, conf).await?;

    println!("Successfully written config to: {}", config_path);
    println!("You may now modify it to you liking!");

    Ok(())
}
