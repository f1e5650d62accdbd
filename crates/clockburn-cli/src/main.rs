use clap::{Parser, Subcommand};
use clockburn_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "clockburn", version, about = "Stopwatch, world clock and alarm list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive stopwatch with laps
    Stopwatch(commands::stopwatch::StopwatchArgs),
    /// Show the time in the configured timezones
    Clock(commands::clock::ClockArgs),
    /// List timezones offered when adding to the world clock
    Zones {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive alarm list editor
    Alarm,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

impl Commands {
    /// Whether the command reads the config file. Others leave it untouched.
    fn reads_config(&self) -> bool {
        matches!(self, Commands::Stopwatch(_) | Commands::Clock(_))
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, load_error) = if cli.command.reads_config() {
        match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    } else {
        (Config::default(), None)
    };
    logging::init(&config.logging.filter);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "using default configuration");
    }

    let result = match cli.command {
        Commands::Stopwatch(args) => commands::stopwatch::run(args, &config),
        Commands::Clock(args) => commands::clock::run(args, &config),
        Commands::Zones { json } => commands::clock::list_presets(json),
        Commands::Alarm => commands::alarm::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
