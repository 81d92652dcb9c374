//! Read-only views handed to observers and renderers.

use cc_agent::Agent;
use cc_core::{Depot, Point, Tick};
use cc_tasks::TaskSet;

/// The state of the world at the end of one tick.
///
/// Everything is borrowed immutably from the driver, so a renderer holding a
/// snapshot cannot change the simulation.
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    pub tick:      Tick,
    pub depot:     Depot,
    pub tasks:     &'a TaskSet,
    pub agents:    &'a [Agent],
    pub delivered: u64,
}

impl Snapshot<'_> {
    /// Locations of pending tasks, in ascending id order.
    pub fn task_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.tasks.points()
    }

    pub fn totals(&self) -> Totals {
        Totals::count(self.tasks, self.agents, self.delivered)
    }
}

/// Where every task ever inserted currently is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    /// Tasks ever inserted (seeded + queued + direct).
    pub inserted:  u64,
    /// Tasks waiting in the task set.
    pub pending:   u64,
    /// Agents currently carrying a task.
    pub carried:   u64,
    /// Tasks delivered to the depot.
    pub delivered: u64,
}

impl Totals {
    pub fn count(tasks: &TaskSet, agents: &[Agent], delivered: u64) -> Self {
        Self {
            inserted:  tasks.inserted_total(),
            pending:   tasks.len() as u64,
            carried:   agents.iter().filter(|a| a.is_carrying()).count() as u64,
            delivered,
        }
    }

    /// `inserted == pending + carried + delivered`.
    pub fn is_conserved(&self) -> bool {
        self.inserted == self.pending + self.carried + self.delivered
    }
}
