//! noughts CLI - Tic-Tac-Toe against a perfect minimax player
//!
//! This CLI provides:
//! - Interactive play against the engine
//! - The engine's choice for any reachable position
//! - Per-move minimax values
//! - Engine self-play

use anyhow::Result;
use clap::{Parser, Subcommand};
use noughts::cli::{commands, config::CommonConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Tic-Tac-Toe with a perfect minimax player", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play(commands::play::PlayArgs),

    /// Print the optimal move for a position
    Best(commands::best::BestArgs),

    /// Show the minimax value of every legal move
    Analyze(commands::analyze::AnalyzeArgs),

    /// Let the engine play itself
    SelfPlay(commands::self_play::SelfPlayArgs),
}

fn init_tracing(config: &CommonConfig) {
    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CommonConfig {
        verbose: cli.verbose,
    };
    init_tracing(&config);

    match cli.command {
        Commands::Play(args) => commands::play::execute(args),
        Commands::Best(args) => commands::best::execute(args),
        Commands::Analyze(args) => commands::analyze::execute(args),
        Commands::SelfPlay(args) => commands::self_play::execute(args),
    }
}
