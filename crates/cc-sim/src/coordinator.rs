//! Per-tick task allocation and pickup/drop-off resolution.

use cc_agent::{Agent, Objective};
use cc_core::Point;
use cc_tasks::TaskSet;

/// Counters describing what one coordinator pass did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Externally queued tasks inserted at the start of the tick.
    pub inserted:   usize,
    /// Agents given a new task objective.
    pub assigned:   usize,
    /// Tasks removed from the set and now carried.
    pub pickups:    usize,
    /// Carried tasks delivered to the depot.
    pub drop_offs:  usize,
    /// Agents that reached a task another agent had already taken.
    pub lost_races: usize,
}

impl TickOutcome {
    /// `true` if the tick changed nothing but positions.
    pub fn is_quiet(&self) -> bool {
        *self == TickOutcome::default()
    }
}

/// Matches pending tasks to agents and applies arrival side effects.
///
/// One call to [`step`](Self::step) runs five phases over the whole crew,
/// each visiting agents in slice order (ascending `AgentId`):
///
/// 1. **Assign** — every non-carrying agent whose objective is absent or
///    whose task is no longer live gets the nearest pending task (or none).
/// 2. **Return** — every carrying agent is pointed at the depot.
/// 3. **Move** — every agent advances one bounded step (parallel with the
///    `parallel` feature; the task set is not touched here).
/// 4. **Resolve** — arrivals at a live task pick it up; arrivals at a task
///    that is already gone fall back to idle; arrivals at the depot drop off.
/// 5. **Settle** — agents still heading for a task removed in phase 4 drop
///    that objective, so between ticks every non-carrying objective names a
///    live task.
///
/// Two agents may be assigned the same task in phase 1.  Phase 4 settles the
/// race: the first to resolve removes the task, the other finds it gone.
#[derive(Clone, Debug)]
pub struct Coordinator {
    depot: Point,
    speed: f64,
}

impl Coordinator {
    /// Coordinator delivering to `depot` with agents moving `speed` per tick.
    pub fn new(depot: Point, speed: f64) -> Self {
        Self { depot, speed }
    }

    #[inline]
    pub fn depot(&self) -> Point {
        self.depot
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Run one full allocation pass.
    pub fn step(&self, agents: &mut [Agent], tasks: &mut TaskSet) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // ── Phases 1–2: objectives ────────────────────────────────────────
        self.assign(agents, tasks, &mut outcome);

        // ── Phase 3: movement ─────────────────────────────────────────────
        let arrived = self.advance_all(agents);

        // ── Phase 4: arrivals ─────────────────────────────────────────────
        for (agent, _) in agents.iter_mut().zip(arrived).filter(|(_, hit)| *hit) {
            self.resolve_arrival(agent, tasks, &mut outcome);
        }

        // ── Phase 5: stale objectives ─────────────────────────────────────
        if outcome.pickups > 0 {
            Self::drop_stale(agents, tasks);
        }

        outcome
    }

    fn assign(&self, agents: &mut [Agent], tasks: &TaskSet, outcome: &mut TickOutcome) {
        for agent in agents.iter_mut() {
            if agent.is_carrying() {
                agent.head_to_depot(self.depot);
                continue;
            }

            if agent.sought_task().is_some_and(|id| tasks.contains(id)) {
                continue;
            }

            match tasks.nearest_to(agent.position()) {
                Some(task) => {
                    agent.seek(task.id, task.location);
                    outcome.assigned += 1;
                    tracing::trace!(agent = %agent.id(), task = %task.id, at = %task.location, "assigned");
                }
                None => agent.clear_objective(),
            }
        }
    }

    fn drop_stale(agents: &mut [Agent], tasks: &TaskSet) {
        for agent in agents.iter_mut() {
            if let Some(id) = agent.sought_task().filter(|&id| !tasks.contains(id)) {
                agent.clear_objective();
                tracing::trace!(agent = %agent.id(), task = %id, "task collected by another agent");
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn advance_all(&self, agents: &mut [Agent]) -> Vec<bool> {
        agents.iter_mut().map(|a| a.advance(self.speed)).collect()
    }

    #[cfg(feature = "parallel")]
    fn advance_all(&self, agents: &mut [Agent]) -> Vec<bool> {
        use rayon::prelude::*;

        let speed = self.speed;
        agents.par_iter_mut().map(|a| a.advance(speed)).collect()
    }

    fn resolve_arrival(&self, agent: &mut Agent, tasks: &mut TaskSet, outcome: &mut TickOutcome) {
        match agent.objective() {
            Some(Objective::Depot(_)) => {
                agent.drop_off();
                outcome.drop_offs += 1;
                tracing::debug!(agent = %agent.id(), "dropped off at depot");
            }
            Some(Objective::Task { id, .. }) => {
                if tasks.remove(id) {
                    agent.pick_up(self.depot);
                    outcome.pickups += 1;
                    tracing::debug!(agent = %agent.id(), task = %id, remaining = tasks.len(), "picked up");
                } else {
                    agent.clear_objective();
                    outcome.lost_races += 1;
                    tracing::trace!(agent = %agent.id(), task = %id, "task already taken");
                }
            }
            // `advance` never reports arrival without an objective.
            None => {}
        }
    }
}
