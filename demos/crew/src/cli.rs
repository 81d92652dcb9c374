use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cc_core::CrewConfig;

/// `crew` - a crew of cleaning robots sweeping dirt into a dustbin.
///
/// Dirt is scattered over the floor at startup.  While the simulation runs,
/// type `x y` on stdin to drop more dirt at that point, or `quit` to stop.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file with a `CrewConfig`.  Flags below override its values.
    #[arg(long, env = "CREW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of robots.
    #[arg(long, env = "CREW_AGENTS")]
    pub agents: Option<usize>,

    /// Dirt scattered at startup.
    #[arg(long, env = "CREW_TASKS")]
    pub tasks: Option<usize>,

    /// Robot speed in world units per tick.
    #[arg(long, env = "CREW_SPEED")]
    pub speed: Option<f64>,

    /// Ticks per second.
    #[arg(long, env = "CREW_TICK_RATE")]
    pub tick_rate: Option<u32>,

    /// World width; sets the spawn area and the dustbin position.
    #[arg(long)]
    pub width: Option<f64>,

    /// World height; sets the spawn area and the dustbin position.
    #[arg(long)]
    pub height: Option<f64>,

    /// RNG seed for the starting layout.
    #[arg(long, env = "CREW_SEED")]
    pub seed: Option<u64>,

    /// Stop after this many ticks.  Without it the run ends on `quit`.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Write `agent_snapshots.csv` and `tick_summaries.csv` here.
    #[arg(long, env = "CREW_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Snapshot every N ticks when writing output.
    #[arg(long)]
    pub output_interval: Option<u64>,

    /// Run as fast as possible without pacing or stdin input.  Needs `--ticks`.
    #[arg(long)]
    pub fast: bool,
}

impl Cli {
    /// Load the config file (if any) and apply flag overrides on top.
    pub fn crew_config(&self) -> Result<CrewConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => CrewConfig::default(),
        };

        if let Some(v) = self.agents          { config.agent_count = v; }
        if let Some(v) = self.tasks           { config.task_count = v; }
        if let Some(v) = self.speed           { config.speed = v; }
        if let Some(v) = self.tick_rate       { config.tick_rate_hz = v; }
        if let Some(v) = self.width           { config.world_width = v; }
        if let Some(v) = self.height          { config.world_height = v; }
        if let Some(v) = self.seed            { config.seed = v; }
        if let Some(v) = self.output_interval { config.output_interval_ticks = v; }
        if self.ticks.is_some() {
            config.total_ticks = self.ticks;
        }

        config.validate()?;
        Ok(config)
    }
}
