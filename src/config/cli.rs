use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(author, version, about = "A metadata-scrubbing media downloader")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[clap(about = "Download media and strip its metadata")]
    Run {
        #[clap(long, help = "Path to config", default_value = ".scrub-dl-config.yml")]
        config_path: PathBuf,

        #[clap(long, help = "Disable animations")]
        no_animation: bool,
    },

    #[clap(about = "Create a config file")]
    Setup {},
}
