mod simulation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::warn;

use simulation::{PolicyTable, SimWorld};

#[derive(Parser)]
#[command(name = "signal_sim")]
#[command(about = "Adaptive traffic signal simulation")]
struct Cli {
    /// Path to the decision-table JSON file
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds between vehicle spawns
    #[arg(long, default_value = "1.0")]
    spawn_interval: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let policy = match &cli.policy {
        Some(path) => PolicyTable::load(path)?,
        None => {
            warn!("no decision table given; every state will explore");
            PolicyTable::empty()
        }
    };
    println!("Decision table entries: {}", policy.len());

    let mut world = match cli.seed {
        Some(seed) => SimWorld::with_seed(policy, seed),
        None => SimWorld::new(policy),
    };
    world.set_spawn_interval(cli.spawn_interval);

    println!(
        "Running {} ticks at {}s per tick ({:.1}s simulated)",
        cli.ticks,
        cli.delta,
        cli.ticks as f32 * cli.delta
    );
    println!();

    // Report once per simulated second.
    let ticks_per_second = (1.0 / cli.delta).ceil() as u32;

    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);
        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(cli.delta);
        }
        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * cli.delta
        );
        world.print_summary();
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
    Ok(())
}
