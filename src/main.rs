//! Wildgrove CLI entry point.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use wildgrove::scenario::Scenario;
use wildgrove::{Config, World};

#[derive(Parser)]
#[command(name = "wildgrove")]
#[command(version)]
#[command(about = "Tick-based predator/prey ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Scenario file describing the starting population
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the stats history (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            scenario,
            ticks,
            seed,
            output,
            quiet,
        } => run_simulation(config, scenario, ticks, seed, output, quiet),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    scenario_path: Option<PathBuf>,
    ticks: u64,
    seed: Option<u64>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.log_level),
    )
    .init();

    let seed = seed.unwrap_or_else(rand::random);

    let mut world = match scenario_path {
        Some(path) => {
            println!("Loading scenario from: {:?}", path);
            let scenario = Scenario::from_file(&path)?;
            scenario.build(config, seed)?
        }
        None => World::new_with_seed(config, seed),
    };

    println!("Starting simulation");
    println!("  Seed: {}", world.seed());
    println!(
        "  Grid size: {}x{}",
        world.config.world.width, world.config.world.height
    );
    println!("  Initial population: {}", world.population());
    println!("  Ticks: {}", ticks);
    println!();

    let start = Instant::now();
    let stats_interval = world.config.logging.stats_interval;

    for i in 0..ticks {
        world.step();

        if !quiet && i % stats_interval == 0 {
            println!("{}", world.stats.summary());
        }

        if world.is_extinct() {
            println!("\nAll animals died at tick {}", world.current_tick());
            break;
        }
    }

    let elapsed = start.elapsed();
    let ticks_per_sec = world.current_tick() as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", world.current_tick());
    println!("Speed: {:.1} ticks/s", ticks_per_sec);
    println!("Final population: {}", world.population());
    println!("Births: {}", world.stats.total_births);
    println!("Deaths: {}", world.stats.total_deaths);

    if let Some(path) = output {
        world.stats_history.save(&path)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

const SAMPLE_SCENARIO: &str = "\
# wildgrove sample scenario
grid 40 40
day 30 20

rabbit 12
wolf 4-7
bear 1 at 10,10
grass 40
bush 8
";

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);

    let scenario_path = output.with_file_name("scenario.txt");
    if !scenario_path.exists() {
        std::fs::write(&scenario_path, SAMPLE_SCENARIO)?;
        println!("Sample scenario saved to: {:?}", scenario_path);
    }
    Ok(())
}
