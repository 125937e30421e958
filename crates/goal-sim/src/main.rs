//! goal-sim - run scripted goal scenarios.
//!
//! - `goal-sim run` - simulate a scenario and print a per-agent summary
//! - `goal-sim catalog` - list the standard goal types and category flags

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ai_goal::{category_flags, goal_types};
use goal_sim::{ScenarioConfig, SimReport, Simulation};

#[derive(Parser)]
#[command(name = "goal-sim")]
#[command(about = "Scripted scenarios for the agent goal scheduler", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every trace event as it is recorded (implies TRACE level for goal events)
    #[arg(long, global = true)]
    live_trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a scenario
    Run {
        /// Scenario file (YAML); the built-in village scenario when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Override the scenario's tick count
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the scenario's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report, traces included, as JSON
        #[arg(long)]
        json: bool,
    },

    /// List goal types and category flags
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.live_trace {
        EnvFilter::new("debug,ai_tools=trace")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            seed,
            json,
        } => run_scenario(scenario, ticks, seed, json, cli.live_trace),
        Commands::Catalog => {
            show_catalog();
            Ok(())
        }
    }
}

fn run_scenario(
    path: Option<PathBuf>,
    ticks: Option<u64>,
    seed: Option<u64>,
    json: bool,
    live_trace: bool,
) -> Result<()> {
    let mut scenario = match &path {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::builtin()?,
    };
    if let Some(seed) = seed {
        scenario.seed = seed;
    }
    let ticks = ticks.unwrap_or(scenario.ticks);

    tracing::info!(
        scenario = %path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "builtin".into()),
        agents = scenario.agents.len(),
        ticks,
        seed = scenario.seed,
        "Running scenario"
    );

    let mut sim = Simulation::from_scenario(&scenario)?;
    if live_trace {
        sim = sim.with_live_trace();
    }
    let report = sim.run(ticks);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SimReport) {
    println!("Seed {} | {} ticks", report.seed, report.ticks);
    println!();
    println!(
        "{:>6}  {:>7}  {:>7}  {:>9}  {:>6}  {:>6}  running",
        "agent", "started", "stopped", "preempted", "ticked", "faults"
    );
    for agent in &report.agents {
        println!(
            "{:>6}  {:>7}  {:>7}  {:>9}  {:>6}  {:>6}  {}",
            agent.agent,
            agent.started,
            agent.stopped,
            agent.preempted,
            agent.ticked,
            agent.faults.len(),
            agent.running.join(", ")
        );
    }

    let faults: Vec<_> = report
        .agents
        .iter()
        .flat_map(|a| a.faults.iter().map(move |f| (a.agent, f)))
        .collect();
    if !faults.is_empty() {
        println!();
        println!("Faults:");
        for (agent, fault) in faults {
            println!("  agent {agent}: {fault}");
        }
    }
}

fn show_catalog() {
    println!("Goal types ({}):", goal_types::ALL.len());
    for goal_type in goal_types::ALL {
        println!("  {goal_type}");
    }
    println!();
    println!("Category flags ({}):", category_flags::ALL.len());
    for flag in category_flags::ALL {
        println!("  {flag}");
    }
}
