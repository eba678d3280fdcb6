use std::path::PathBuf;

use botnen_core::{Config, CoreError};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "botnen", version, about = "Botnen countdown CLI")]
struct Cli {
    /// Countdown file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a countdown
    Add {
        /// Name or note
        name: String,
        /// Target time, "YYYY-MM-DD HH:MM:SS"
        date: String,
        /// Print the resulting event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update the countdown at INDEX
    Edit {
        /// Position in `list`
        index: usize,
        /// New name (keeps the current one if omitted)
        #[arg(long)]
        name: Option<String>,
        /// New target time (keeps the current one if omitted)
        #[arg(long)]
        date: Option<String>,
        /// Print the resulting event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the countdown at INDEX
    Delete {
        /// Position in `list`
        index: usize,
        /// Print the resulting event as JSON
        #[arg(long)]
        json: bool,
    },
    /// List countdowns with their positions
    List {
        #[arg(long)]
        json: bool,
    },
    /// Run one refresh pass and print the summary
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Refresh continuously until interrupted
    Watch {
        /// Stop after this many passes
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("botnen={level},botnen_core={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 2 for rejected input (bad date, missing index), 1 for everything else.
fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<CoreError>() {
        Some(core) if core.is_user_error() => 2,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config.log.level);
    if let Some(e) = config_err {
        tracing::warn!(error = %e, "using default configuration");
    }

    let ctx = commands::Context {
        config,
        file: cli.file,
    };
    let result = match cli.command {
        Commands::Add { name, date, json } => commands::countdown::add(&ctx, &name, &date, json),
        Commands::Edit {
            index,
            name,
            date,
            json,
        } => commands::countdown::edit(&ctx, index, name, date, json),
        Commands::Delete { index, json } => commands::countdown::delete(&ctx, index, json),
        Commands::List { json } => commands::countdown::list(&ctx, json),
        Commands::Status { json } => commands::refresh::status(&ctx, json),
        Commands::Watch { ticks } => commands::refresh::watch(&ctx, ticks),
        Commands::Config { action } => commands::config::run(ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(exit_code(e.as_ref()));
    }
}
