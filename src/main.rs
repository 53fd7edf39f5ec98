//! # Wildsim Main Entry Point
//!
//! Loads the encounter tables, validates the terrain and writes one total
//! EHD per encounter to stdout. Diagnostics go to stderr through the logger.

use clap::{CommandFactory, Parser};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use wildsim::{Simulation, SimulationConfig, WildError, WildResult, WildTables};

/// Exit status for usage errors, matching clap's own.
const USAGE_EXIT: u8 = 2;

/// Command line arguments for the wilderness encounter simulator.
#[derive(Parser, Debug)]
#[command(name = "wildsim")]
#[command(about = "OED wilderness encounter simulator: prints the total EHD of each rolled encounter")]
#[command(version)]
struct Args {
    /// Terrain to roll encounters for (a column of the main table)
    terrain: String,

    /// Number of encounters to roll
    #[arg(short = 'n', long)]
    encounters: Option<usize>,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory containing the table CSV files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the shape of the loaded tables instead of simulating
    #[arg(long)]
    describe: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes stderr logging; `RUST_LOG` takes precedence over the flag.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => "error",
        "warn" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "off" => "off",
        _ => "warn",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

/// Merges the configuration file with command line overrides.
fn build_config(args: &Args) -> WildResult<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::new(),
    };

    if let Some(encounters) = args.encounters {
        config.num_encounters = encounters;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }

    Ok(config)
}

fn run(args: &Args) -> WildResult<ExitCode> {
    let config = build_config(args)?;
    let tables = WildTables::load(&config)?;

    let simulation = match Simulation::new(&tables, &config, &args.terrain) {
        Ok(simulation) => simulation,
        Err(WildError::UnknownTerrain(terrain)) => {
            eprintln!("Unknown terrain: {}", terrain);
            print_usage(&tables);
            return Ok(ExitCode::from(USAGE_EXIT));
        }
        Err(err) => return Err(err),
    };

    if args.describe {
        print!("{}", tables.describe());
        return Ok(ExitCode::SUCCESS);
    }

    let mut rng = config.create_rng();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    simulation.run(&mut rng, &mut out)?;

    Ok(ExitCode::SUCCESS)
}

fn print_usage(tables: &WildTables) {
    println!("{}", Args::command().render_usage());
    println!();
    println!("Terrains: {}", tables.terrains().join(", "));
}
