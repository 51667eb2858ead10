use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Capture options for the default run mode.
#[derive(clap::Args, Debug)]
pub struct CaptureOpts {
    /// Capture from an image file instead of the camera command.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Capture immediately on startup instead of waiting for a key.
    #[arg(long)]
    pub capture: bool,

    /// Override the configured prompt.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Override the configured generator command.
    #[arg(long)]
    pub generator: Option<String>,

    /// Override the configured lines-per-page.
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Parser, Debug)]
#[command(
    name = "glint",
    about = "A streaming vision client for wearable camera displays",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub capture_opts: CaptureOpts,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter `.glint/config.toml`.
    Init,
}
