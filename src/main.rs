mod batch;
mod config;
mod fetch;
mod generate_config;
mod input;
mod output;
mod status_bar;
mod strip;
mod tools;

use std::path::PathBuf;

use anyhow::Context;
use dialoguer::Input;

// Animations and logging
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::batch::Batch;
use crate::config::cli;
use crate::config::run_config;
use crate::output::MediaKind;

pub type Result<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> crate::Result<()> {
    let cli = <cli::Cli as clap::Parser>::parse();

    let no_animation = match &cli.command {
        cli::Commands::Run { no_animation, .. } => *no_animation,
        cli::Commands::Setup {} => false,
    };

    // Start logging (the guard flushes the rolling file on exit)
    let _guard = init_logging(no_animation)?;

    match cli.command {
        cli::Commands::Run { config_path, .. } => run(config_path).await,
        cli::Commands::Setup {} => generate_config::generate_config().await,
    }
}

/// Console logging plus a rotating file log under `<program_dir>/logs/`.
/// Rotates daily and keeps a bounded history.
fn init_logging(no_animation: bool) -> crate::Result<WorkerGuard> {
    let log_dir = run_config::program_dir()?.join("logs");
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("scrub-dl")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)
        .context("Failed to create the rolling log file")?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        );
    if no_animation {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_ansi(false).compact())
            .init();
    } else {
        let indicatif_layer = IndicatifLayer::new();
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(indicatif_layer.get_stderr_writer())
                    .compact(),
            )
            .with(indicatif_layer)
            .init();
    }

    Ok(guard)
}

async fn run(config_path: PathBuf) -> crate::Result<()> {
    let config = run_config::read_config(&config_path)?;

    // Check external tools before prompting for anything
    tools::preflight(&config.yt_dlp, &config.ffmpeg).await?;

    println!("Media downloader using yt-dlp");
    println!("Provide a single URL, or a .txt file containing a list of URLs. Example: `url_list.txt`");
    let raw_input: String = Input::new()
        .with_prompt("Enter the media URL or path to a .txt file")
        .interact_text()?;

    let urls = input::resolve_input(raw_input.trim()).await?;

    let choice: String = Input::new()
        .with_prompt("Do you want to download the full (V)ideo or (A)udio only? (V/A)")
        .interact_text()?;
    let Some(kind) = MediaKind::from_choice(&choice) else {
        println!("Invalid choice. Please enter 'V' for video or 'A' for audio.");
        std::process::exit(1);
    };

    let base_dir = config.resolve_download_dir()?;

    let mut batch = Batch::new(config.yt_dlp, config.ffmpeg);
    batch.run(&urls, kind, &base_dir).await?;

    println!("{}", batch.status_bar);
    if let Some(log_file) = &config.log_file {
        batch.status_bar.write_log_to_file(log_file).await?;
    }

    Ok(())
}
