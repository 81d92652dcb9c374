//! Simulation observer trait for rendering, progress reporting and output.

use cc_core::Tick;

use crate::{Snapshot, TickOutcome, Totals};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  None of them can reach mutable simulation
/// state; a renderer is just an observer whose `on_snapshot` draws.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, _outcome: &TickOutcome, totals: &Totals) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} pending, {} delivered", totals.pending, totals.delivered);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before queued tasks are applied.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the coordinator has finished the tick.
    fn on_tick_end(&mut self, _tick: Tick, _outcome: &TickOutcome, _totals: &Totals) {}

    /// Called every `config.output_interval_ticks` ticks with a read-only view
    /// of the whole world.
    fn on_snapshot(&mut self, _snapshot: &Snapshot<'_>) {}

    /// Called once when a run loop returns.
    fn on_sim_end(&mut self, _final_tick: Tick, _totals: &Totals) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
