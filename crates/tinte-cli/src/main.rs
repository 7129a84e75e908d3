//! Tinte CLI - saturation and bus compression for audio files.

mod commands;
mod preset;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinte")]
#[command(author, version, about = "Tinte audio color processors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Saturate an audio file through a tone shaper pair
    Saturate(commands::saturate::SaturateArgs),

    /// Compress an audio file through the bus compressor
    Compress(commands::compress::CompressArgs),

    /// Run the full mastering chain (saturation into bus compression)
    Master(commands::master::MasterArgs),

    /// Show WAV file information
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Saturate(args) => commands::saturate::run(args),
        Commands::Compress(args) => commands::compress::run(args),
        Commands::Master(args) => commands::master::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
