use std::path::PathBuf;

use astroschedule_core::Config;
use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod notifications;
mod repl;

#[derive(Parser)]
#[command(name = "astroschedule", version, about = "Astronaut daily schedule organizer")]
pub(crate) struct Cli {
    /// Config file (default: ~/.config/astroschedule/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print listings and add results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive organizer (default)
    Run,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = Config::load_from(&config_path)?;
            logging::init(&config.log, cli.verbose)?;
            commands::run::run(&config, cli.json)
        }
        Commands::Config { action } => commands::config::run(action, &config_path),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
