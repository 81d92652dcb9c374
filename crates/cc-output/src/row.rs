//! Plain data row types written by output backends.

use cc_agent::{Agent, AgentState};
use cc_core::Tick;
use cc_sim::{TickOutcome, Totals};

/// One agent's position and state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:        u64,
    pub agent_id:    u32,
    pub x:           f64,
    pub y:           f64,
    pub state:       AgentState,
    pub carrying:    bool,
    /// Point being moved toward; `None` while idle.
    pub objective_x: Option<f64>,
    pub objective_y: Option<f64>,
}

impl AgentSnapshotRow {
    pub fn from_agent(tick: Tick, agent: &Agent) -> Self {
        let target = agent.objective().map(|o| o.point());
        let pos = agent.position();
        Self {
            tick:        tick.0,
            agent_id:    agent.id().0,
            x:           pos.x,
            y:           pos.y,
            state:       agent.state(),
            carrying:    agent.is_carrying(),
            objective_x: target.map(|p| p.x),
            objective_y: target.map(|p| p.y),
        }
    }
}

/// Task bookkeeping for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub inserted:   u64,
    pub pending:    u64,
    pub carried:    u64,
    pub delivered:  u64,
    pub pickups:    u64,
    pub drop_offs:  u64,
    pub lost_races: u64,
}

impl TickSummaryRow {
    pub fn new(tick: Tick, outcome: &TickOutcome, totals: &Totals) -> Self {
        Self {
            tick:       tick.0,
            inserted:   totals.inserted,
            pending:    totals.pending,
            carried:    totals.carried,
            delivered:  totals.delivered,
            pickups:    outcome.pickups as u64,
            drop_offs:  outcome.drop_offs as u64,
            lost_races: outcome.lost_races as u64,
        }
    }
}
