//! crew — a cleaning crew collecting dirt and carrying it to the dustbin.
//!
//! Runs the simulation headless at the configured tick rate.  Dirt can be
//! added while it runs by typing coordinates on stdin.

mod cli;
mod hud;
mod input;

use std::ops::ControlFlow;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cc_output::{CsvWriter, SimOutputObserver};
use cc_sim::{Sim, SimBuilder};

use cli::Cli;
use hud::Hud;
use input::Command;

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.crew_config()?;
    if cli.fast && config.total_ticks.is_none() {
        bail!("--fast needs --ticks (or total_ticks in the config file)");
    }
    tracing::info!(config = ?config, "crew starting");

    let output = match &cli.output {
        Some(dir) => Some(SimOutputObserver::new(CsvWriter::new(dir)?)),
        None => None,
    };
    let mut hud = Hud::new(output, u64::from(config.tick_rate_hz), config.agent_count);
    let mut sim = SimBuilder::new(config).build()?;

    let t0 = Instant::now();
    if cli.fast {
        sim.run(&mut hud);
    } else {
        let commands = input::spawn_stdin_reader();
        sim.run_paced(&mut hud, |sim| drain(&commands, sim));
    }
    let elapsed = t0.elapsed();

    if let Some(e) = hud.output.as_mut().and_then(|o| o.take_error()) {
        eprintln!("output error: {e}");
    }

    // Summary.
    let totals = sim.totals();
    println!();
    println!("Ran {} ticks in {:.3} s", sim.clock.current_tick.0, elapsed.as_secs_f64());
    println!(
        "  dirt: {} inserted, {} remaining, {} carried, {} in the dustbin",
        totals.inserted, totals.pending, totals.carried, totals.delivered
    );
    if let Some(dir) = &cli.output {
        println!("  {} snapshot rows written to {}", hud.snapshot_rows(), dir.display());
    }
    println!();

    // Final robot table.
    println!("{:<8} {:<10} {:>9} {:>9}", "Robot", "State", "X", "Y");
    println!("{}", "-".repeat(39));
    for agent in sim.agents() {
        let p = agent.position();
        println!("{:<8} {:<10} {:>9.2} {:>9.2}", agent.id().0, agent.state().as_str(), p.x, p.y);
    }

    Ok(())
}

/// Apply everything typed since the last tick.
fn drain(commands: &std::sync::mpsc::Receiver<Command>, sim: &mut Sim) -> ControlFlow<()> {
    loop {
        match commands.try_recv() {
            Ok(Command::Spawn(p)) => sim.queue_task(p),
            Ok(Command::Quit) => return ControlFlow::Break(()),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return ControlFlow::Continue(()),
        }
    }
}
