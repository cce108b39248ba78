//! `cascade`: run a failure-propagation simulation from files and query it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use cascade_core::config::CliOverrides;
use cascade_core::topology::load_service_definitions;
use cascade_core::{CascadeErrorCode, SimulationConfig};
use cascade_sim::graph::{build_graph, cycles};
use cascade_sim::Session;

#[derive(Parser)]
#[command(name = "cascade")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a topology and print the diagnostic log
    Run {
        /// JSON array of `{name, health, depends_on}` service definitions
        #[arg(long, short = 's')]
        services: PathBuf,

        /// Simulation config (.toml, .yaml or .yml)
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Override the configured tick count
        #[arg(long)]
        ticks: Option<u32>,

        /// Override the configured RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Diagnostic query to answer after the run (repeatable)
        #[arg(long, short = 'q')]
        query: Vec<String>,

        /// Write the tick history as JSON to this file
        #[arg(long)]
        history_out: Option<PathBuf>,

        /// Suppress the diagnostic log; print only query answers
        #[arg(long)]
        quiet: bool,
    },
    /// Validate a topology and report dependency cycles
    Check {
        /// JSON array of service definitions
        #[arg(long, short = 's')]
        services: PathBuf,
    },
}

fn main() {
    cascade_core::tracing::init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            services,
            config,
            ticks,
            seed,
            query,
            history_out,
            quiet,
        } => {
            let overrides = CliOverrides { ticks, seed };
            let config = SimulationConfig::load(&config, Some(&overrides))
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            let defs = load_service_definitions(&services)
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;

            let mut session = Session::new();
            let lines = session
                .run(&defs, &config)
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            if !quiet {
                for line in lines {
                    println!("{line}");
                }
            }

            for q in &query {
                let answer = session
                    .query(q)
                    .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
                println!("\n> {q}\n{answer}");
            }

            if let Some(path) = history_out {
                write_history(&session, &path)?;
            }
            Ok(())
        }
        Commands::Check { services } => {
            let defs = load_service_definitions(&services)
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            let graph = build_graph(&defs).map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            println!(
                "{} services, {} dependencies",
                graph.node_count(),
                graph.edge_count()
            );
            match cycles::detect_cycle(&graph) {
                Some(cycle) => println!(
                    "cycle: {} (root cause analysis will be approximate)",
                    cycle.join(" -> ")
                ),
                None => println!("no cycles"),
            }
            Ok(())
        }
    }
}

fn write_history(session: &Session, path: &Path) -> anyhow::Result<()> {
    let ticks = session
        .ticks()
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    let json = serde_json::to_string_pretty(&serde_json::json!({ "ticks": ticks }))
        .context("serializing tick history")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing tick history to {}", path.display()))?;
    tracing::info!(path = %path.display(), ticks = ticks.len(), "tick history written");
    Ok(())
}
