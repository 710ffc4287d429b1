//! Command-line runner for the production line simulator

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use production_line_sim_core::config::{ConfigError, SimulationConfig};
use production_line_sim_core::core::time::SECONDS_PER_HOUR;
use production_line_sim_core::petri::{demo_net, PetriNetError, DEMO_SEQUENCE};
use production_line_sim_core::{run_simulation, ProductionLine, SimulationError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a Monte Carlo study and print the aggregate statistics
    Run {
        /// JSON configuration file; defaults are used for anything omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of independent runs
        #[arg(short = 'n', long)]
        runs: Option<usize>,

        /// Simulated hours per run
        #[arg(long, conflicts_with = "duration")]
        hours: Option<f64>,

        /// Simulated seconds per run
        #[arg(long)]
        duration: Option<f64>,

        /// Base seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Replay the demo firing script against the demo network
    Selftest,

    /// Print a network in Graphviz DOT format
    Dot {
        /// Print the demo network instead of the production line
        #[arg(long)]
        demo: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Topology(#[from] PetriNetError),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(command: Command) -> Result<(), CliError> {
    match command {
        Command::Run {
            config,
            runs,
            hours,
            duration,
            seed,
            format,
        } => {
            let mut config = match config {
                Some(path) => {
                    let loaded = SimulationConfig::from_path(&path)?;
                    tracing::info!(path = %path.display(), "loaded configuration");
                    loaded
                }
                None => SimulationConfig::default(),
            };
            if let Some(runs) = runs {
                config.num_simulations = runs;
            }
            if let Some(hours) = hours {
                config.simulation_duration = hours * SECONDS_PER_HOUR;
            }
            if let Some(duration) = duration {
                config.simulation_duration = duration;
            }
            if seed.is_some() {
                config.rng_seed = seed;
            }

            let config_hash = config.config_hash()?;
            let result = run_simulation(&config)?;

            match format {
                OutputFormat::Text => print!("{}", report::render_text(&result, &config_hash)),
                OutputFormat::Json => {
                    let doc = report::render_json(&config, &config_hash, &result)?;
                    println!("{}", doc);
                }
            }
        }
        Command::Selftest => {
            let mut net = demo_net()?;
            for outcome in net.run(&DEMO_SEQUENCE)? {
                if outcome.fired {
                    println!("{} fired!", outcome.transition);
                } else {
                    println!("{} did not fire.", outcome.transition);
                }
            }
        }
        Command::Dot { demo } => {
            let dot = if demo {
                demo_net()?.to_dot()
            } else {
                ProductionLine::new()?.net().to_dot()
            };
            print!("{}", dot);
        }
    }
    Ok(())
}
