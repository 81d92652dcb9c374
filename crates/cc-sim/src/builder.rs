//! Fluent builder for constructing a [`Sim`].

use cc_agent::Agent;
use cc_core::{AgentId, CrewConfig, Point, SimClock, SimRng};
use cc_tasks::TaskSet;

use crate::seed::{scatter_agents, scatter_tasks};
use crate::{Coordinator, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                          |
/// |--------------------------|--------------------------------------------------|
/// | `.initial_positions(v)`  | `agent_count` random points from `config.seed`   |
/// | `.tasks(v)`              | `task_count` random points clear of the depot    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(CrewConfig::default())
///     .tasks(vec![Point::new(100.0, 100.0)])
///     .build()?;
/// sim.run_ticks(600, &mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:    CrewConfig,
    positions: Option<Vec<Point>>,
    tasks:     Option<Vec<Point>>,
}

impl SimBuilder {
    pub fn new(config: CrewConfig) -> Self {
        Self {
            config,
            positions: None,
            tasks:     None,
        }
    }

    /// Supply each agent's starting point (must be length `agent_count`).
    pub fn initial_positions(mut self, positions: Vec<Point>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Supply the initial task locations.  Replaces random seeding, so
    /// `config.task_count` is ignored.
    pub fn tasks(mut self, tasks: Vec<Point>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Validate the configuration, place agents and tasks, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let agent_count = self.config.agent_count;

        // Separate streams: changing the agent count must not move the dirt.
        let mut rng = SimRng::new(self.config.seed);
        let mut agent_rng = rng.child(0);
        let mut task_rng = rng.child(1);

        let positions = match self.positions {
            Some(p) => {
                if p.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                p
            }
            None => scatter_agents(&mut agent_rng, &self.config),
        };

        let task_points = match self.tasks {
            Some(t) => t,
            None => scatter_tasks(&mut task_rng, &self.config)?,
        };

        let agents: Vec<Agent> = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| Agent::new(AgentId(i as u32), p))
            .collect();
        let tasks = TaskSet::from_points(task_points);

        let depot = self.config.depot();
        tracing::info!(
            agents = agents.len(),
            tasks  = tasks.len(),
            depot  = %depot.centre(),
            speed  = self.config.speed,
            "simulation built"
        );

        Ok(Sim {
            clock:       SimClock::new(self.config.tick_rate_hz),
            coordinator: Coordinator::new(depot.centre(), self.config.speed),
            depot,
            tasks,
            agents,
            queued:      Vec::new(),
            delivered:   0,
            config:      self.config,
        })
    }
}
