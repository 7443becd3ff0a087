use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ConfigCommand, EntryCommand, FoodCommand, GoalCommand, HistoryCommand, LogCommand,
    StatusCommand,
};
use config::Config;
use kaltrack_core::{DocumentStore, Tracker};

#[derive(Parser)]
#[command(name = "kal")]
#[command(version)]
#[command(about = "A calorie tracking CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food entry
    Log(LogCommand),

    /// Delete or edit logged entries
    Entry(EntryCommand),

    /// Show logged entries grouped by day
    History(HistoryCommand),

    /// Show today's total against the daily goal
    Status(StatusCommand),

    /// Manage the food reference table
    Food(FoodCommand),

    /// Show or set the daily calorie goal
    Goal(GoalCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&config),
        Commands::Log(cmd) => {
            let mut tracker = load_tracker(&config);
            cmd.run(&mut tracker)
        }
        Commands::Entry(cmd) => {
            let mut tracker = load_tracker(&config);
            cmd.run(&mut tracker)
        }
        Commands::History(cmd) => {
            let tracker = load_tracker(&config);
            cmd.run(&tracker, &config)
        }
        Commands::Status(cmd) => {
            let tracker = load_tracker(&config);
            cmd.run(&tracker)
        }
        Commands::Food(cmd) => {
            let mut tracker = load_tracker(&config);
            cmd.run(&mut tracker)
        }
        Commands::Goal(cmd) => {
            let mut tracker = load_tracker(&config);
            cmd.run(&mut tracker)
        }
    }
}

fn load_tracker(config: &Config) -> Tracker {
    tracing::debug!(path = %config.data_path.value.display(), "loading data file");
    Tracker::load(DocumentStore::new(config.data_path.value.clone()))
}

/// Diagnostics are quiet unless RUST_LOG is set or the KAL_DEBUG development
/// toggle is on.
fn init_tracing() {
    let default_filter = if std::env::var("KAL_DEBUG").map(|v| v == "1").unwrap_or(false) {
        "kal=debug,kaltrack_core=debug"
    } else {
        "error"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
