//! fetchctl - headless fetch sessions.
//!
//! - `fetchctl run` - replay a scripted scenario and print a summary
//! - `fetchctl validate` - check a scenario file without running it
//! - `fetchctl default-config` - print the built-in scenario as YAML

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use fetch_agent::CrossfadeAnimator;
use fetch_sim::{HeadlessRig, RunSummary, Scenario};

#[derive(Parser)]
#[command(name = "fetchctl")]
#[command(about = "Run scripted fetch sessions headless", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario
    Run {
        /// Scenario file (YAML); the built-in scenario when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Stop after this many ticks
        #[arg(long, default_value_t = 3600)]
        max_ticks: u64,

        /// Override the scenario's fixed step, in seconds
        #[arg(long)]
        dt: Option<f32>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and validate a scenario file
    Validate {
        path: PathBuf,
    },

    /// Print the default scenario as YAML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let subscriber = fmt().with_env_filter(filter).with_target(false);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Run {
            scenario,
            max_ticks,
            dt,
            json,
        } => run(scenario.as_deref(), max_ticks, dt, json),
        Commands::Validate { path } => validate(&path),
        Commands::DefaultConfig => {
            print!("{}", Scenario::default().to_yaml()?);
            Ok(())
        }
    }
}

fn load_scenario(path: Option<&Path>) -> Result<Scenario> {
    match path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario from {}", path.display())),
        None => Ok(Scenario::default()),
    }
}

fn run(path: Option<&Path>, max_ticks: u64, dt: Option<f32>, json: bool) -> Result<()> {
    let mut scenario = load_scenario(path)?;
    if let Some(dt) = dt {
        scenario.dt = dt;
    }
    scenario.validate().context("Invalid scenario")?;

    tracing::info!(
        swipes = scenario.swipes.len(),
        taps = scenario.taps.len(),
        dt = scenario.dt,
        "Starting scenario"
    );

    let animator = CrossfadeAnimator::new(HeadlessRig::new(), &scenario.fetch.animation)
        .context("Failed to set up animator")?;
    let summary = scenario
        .run(max_ticks, Some(Box::new(animator)))
        .context("Scenario aborted")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    let scenario = load_scenario(Some(path))?;
    scenario
        .validate()
        .with_context(|| format!("Invalid scenario {}", path.display()))?;
    println!("{}: ok", path.display());
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("Fetch Session");
    println!("=============");
    println!();
    println!(
        "Ticks: {} ({:.2}s){}",
        summary.ticks,
        summary.seconds,
        if summary.finished { "" } else { " - tick limit reached" }
    );
    println!("Throws: {}", summary.throws);
    println!("Completed fetches: {}", summary.completed_cycles);
    println!("Head looks: {}", summary.head_looks);
    println!(
        "Contacts: {} ground, {} wall",
        summary.ground_contacts, summary.wall_contacts
    );
    println!();
    println!("Transitions:");
    for t in &summary.transitions {
        println!("  [{:>5}] {} -> {}", t.tick, t.from.name(), t.to.name());
    }
    println!();
    println!(
        "Final: agent {} at {:?}, ball {:?} at {:?}",
        summary.final_state.name(),
        summary.agent_position,
        summary.ball_phase,
        summary.ball_position
    );
    println!("Camera: {:?}", summary.camera_position);
}
