//! The `Sim` driver and its tick loop.

use std::ops::ControlFlow;

use cc_agent::Agent;
use cc_core::{CrewConfig, Depot, Point, SimClock, TaskId, Tick};
use cc_tasks::TaskSet;

use crate::{Coordinator, SimObserver, Snapshot, TickOutcome, TickPacer, Totals};

/// The simulation driver.
///
/// `Sim` owns all simulation state and runs the tick loop:
///
/// 1. **Insert**: apply task insertions queued since the last tick.
/// 2. **Coordinate**: assign, move and resolve via the [`Coordinator`].
/// 3. **Report**: hand observers the outcome and, every
///    `config.output_interval_ticks`, a read-only [`Snapshot`].
///
/// Ticks never overlap: each completes before the next starts and before any
/// observer sees the world.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Configuration the run was built from.
    pub config: CrewConfig,

    /// Authoritative tick counter.
    pub clock: SimClock,

    /// Drop-off square.
    pub depot: Depot,

    pub(crate) coordinator: Coordinator,
    pub(crate) tasks:       TaskSet,
    pub(crate) agents:      Vec<Agent>,

    /// Insertions from the input layer, applied at the next tick start.
    pub(crate) queued:    Vec<Point>,
    pub(crate) delivered: u64,
}

impl Sim {
    // ── Input ─────────────────────────────────────────────────────────────

    /// Queue a task to be inserted at the start of the next tick.
    ///
    /// This is the entry point for user clicks: the input layer may call it
    /// at any time between ticks.
    pub fn queue_task(&mut self, location: Point) {
        self.queued.push(location);
    }

    /// Insert a task immediately and return its id.
    pub fn insert_task(&mut self, location: Point) -> TaskId {
        self.tasks.insert(location)
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Tasks delivered to the depot so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn totals(&self) -> Totals {
        Totals::count(&self.tasks, &self.agents, self.delivered)
    }

    /// Read-only view of the current world.  `tick` is the last completed
    /// tick, so it reads `T0` both before any tick and after the first one;
    /// use `clock.current_tick` (ticks completed so far) to tell them apart.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let tick = Tick(self.clock.current_tick.0.saturating_sub(1));
        self.snapshot_at(tick)
    }

    fn snapshot_at(&self, tick: Tick) -> Snapshot<'_> {
        Snapshot {
            tick,
            depot:     self.depot,
            tasks:     &self.tasks,
            agents:    &self.agents,
            delivered: self.delivered,
        }
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Run one complete tick.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> TickOutcome {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let inserted = self.apply_queued();
        let mut outcome = self.coordinator.step(&mut self.agents, &mut self.tasks);
        outcome.inserted = inserted;
        self.delivered += outcome.drop_offs as u64;

        let totals = self.totals();
        debug_assert!(totals.is_conserved(), "task count drifted at {now}: {totals:?}");
        observer.on_tick_end(now, &outcome, &totals);

        if now.0.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(&self.snapshot_at(now));
        }

        self.clock.advance();
        outcome
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Run as fast as possible until `config.total_ticks`.
    ///
    /// Without `total_ticks` this never returns; use
    /// [`run_paced`](Self::run_paced) with a stop condition instead.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while !self.finished() {
            self.tick(observer);
        }
        self.end(observer);
    }

    /// Run at `config.tick_rate_hz` in real time.
    ///
    /// `between_ticks` is called before every tick with mutable access to the
    /// driver; it is where the input layer queues new tasks.  Returning
    /// `ControlFlow::Break(())` stops the loop.  The loop also stops at
    /// `config.total_ticks` when set.
    pub fn run_paced<O, F>(&mut self, observer: &mut O, mut between_ticks: F)
    where
        O: SimObserver,
        F: FnMut(&mut Sim) -> ControlFlow<()>,
    {
        let mut pacer = TickPacer::new(self.clock.tick_period());
        while !self.finished() {
            if between_ticks(self).is_break() {
                break;
            }
            self.tick(observer);
            pacer.wait();
        }
        self.end(observer);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn finished(&self) -> bool {
        self.config
            .total_ticks
            .is_some_and(|end| self.clock.current_tick >= Tick(end))
    }

    fn apply_queued(&mut self) -> usize {
        let n = self.queued.len();
        for location in self.queued.drain(..) {
            let id = self.tasks.insert(location);
            tracing::debug!(task = %id, at = %location, "queued task inserted");
        }
        n
    }

    fn end<O: SimObserver>(&mut self, observer: &mut O) {
        let totals = self.totals();
        tracing::info!(
            clock     = %self.clock,
            inserted  = totals.inserted,
            pending   = totals.pending,
            carried   = totals.carried,
            delivered = totals.delivered,
            "simulation stopped"
        );
        observer.on_sim_end(self.clock.current_tick, &totals);
    }
}
