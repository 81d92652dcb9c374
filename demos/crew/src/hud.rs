//! Console heads-up display plus optional file output.

use cc_core::Tick;
use cc_output::{CsvWriter, SimOutputObserver};
use cc_sim::{SimObserver, Snapshot, TickOutcome, Totals};

/// Logs a status line every `interval` ticks and forwards everything to the
/// CSV observer when one is configured.
pub struct Hud {
    pub output:    Option<SimOutputObserver<CsvWriter>>,
    interval:      u64,
    robots:        usize,
    pickups:       usize,
    lost_races:    usize,
    snapshot_rows: usize,
}

impl Hud {
    pub fn new(output: Option<SimOutputObserver<CsvWriter>>, interval: u64, robots: usize) -> Self {
        Self { output, interval: interval.max(1), robots, pickups: 0, lost_races: 0, snapshot_rows: 0 }
    }

    pub fn snapshot_rows(&self) -> usize {
        self.snapshot_rows
    }
}

impl SimObserver for Hud {
    fn on_tick_end(&mut self, tick: Tick, outcome: &TickOutcome, totals: &Totals) {
        self.pickups += outcome.pickups;
        self.lost_races += outcome.lost_races;
        if tick.0 % self.interval == 0 {
            tracing::info!(
                %tick,
                dirt_remaining = totals.pending,
                robots         = self.robots,
                carrying       = totals.carried,
                delivered      = totals.delivered,
                "status"
            );
        }
        if let Some(out) = &mut self.output {
            out.on_tick_end(tick, outcome, totals);
        }
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) {
        if let Some(out) = &mut self.output {
            self.snapshot_rows += snapshot.agents.len();
            out.on_snapshot(snapshot);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, totals: &Totals) {
        tracing::info!(
            %final_tick,
            pickups    = self.pickups,
            lost_races = self.lost_races,
            delivered  = totals.delivered,
            "run finished"
        );
        if let Some(out) = &mut self.output {
            out.on_sim_end(final_tick, totals);
        }
    }
}
