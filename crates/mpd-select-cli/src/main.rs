//! MPD Select CLI - inspect DASH manifest selections
//!
//! Features:
//! - Content category listing
//! - Bandwidth listing per category
//! - Selection key validation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

/// MPD Select CLI - DASH manifest selection toolkit
#[derive(Parser)]
#[command(name = "mpd-select")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Inspect content categories and bandwidth variants of a DASH MPD", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// JSON selection config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the content categories of a manifest
    Categories {
        /// Path to the MPD file
        manifest: PathBuf,
    },

    /// List the bandwidths offered by one category
    Bandwidths {
        /// Path to the MPD file
        manifest: PathBuf,

        /// Category role [default: config default_role]
        #[arg(short, long)]
        role: Option<String>,

        /// Category mime type
        #[arg(short, long)]
        mime_type: String,
    },

    /// Build and validate the selection key handed to a URL resolver
    Key {
        /// Path to the MPD file
        manifest: PathBuf,

        /// Playback position
        #[arg(short, long)]
        position: u64,

        /// Category role [default: config default_role]
        #[arg(short, long)]
        role: Option<String>,

        /// Category mime type
        #[arg(short, long)]
        mime_type: String,

        /// Representation bandwidth
        #[arg(short, long)]
        bandwidth: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    mpd_select_core::init();

    let config = commands::load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Categories { manifest } => {
            commands::categories(&manifest, &config, &cli.format).await?;
        }
        Commands::Bandwidths { manifest, role, mime_type } => {
            commands::bandwidths(&manifest, role.as_deref(), &mime_type, &config, &cli.format).await?;
        }
        Commands::Key { manifest, position, role, mime_type, bandwidth } => {
            commands::key(&manifest, position, role.as_deref(), &mime_type, bandwidth, &config, &cli.format).await?;
        }
    }

    Ok(())
}
