mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loupe", about = "Zoom, pan and compare photos at the pixel level")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and how they fit a display
    Info(commands::info::InfoArgs),
    /// Apply zoom/pan operations to one image and save the visible part
    View(commands::view::ViewArgs),
    /// Apply operations to two images in lockstep and save both views
    Compare(commands::compare::CompareArgs),
    /// Print or save the default viewer config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::View(args) => commands::view::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
