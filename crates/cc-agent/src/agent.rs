//! One collector: position, carry flag and current objective.

use cc_core::{AgentId, Point, TaskId, step_toward};

// ── Objective ─────────────────────────────────────────────────────────────────

/// Where an agent is heading.
///
/// A task objective stores a *copy* of the task's location together with its
/// id.  The agent never holds a reference into the task set, so a task
/// collected by someone else simply becomes a stale id that the coordinator
/// detects by liveness, not by comparing coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Collect task `id` lying at `at`.
    Task { id: TaskId, at: Point },
    /// Deliver the carried task to the depot's drop-off point.
    Depot(Point),
}

impl Objective {
    /// The point being moved toward.
    #[inline]
    pub fn point(self) -> Point {
        match self {
            Objective::Task { at, .. } => at,
            Objective::Depot(p) => p,
        }
    }

    /// The targeted task, if this is a task objective.
    #[inline]
    pub fn task(self) -> Option<TaskId> {
        match self {
            Objective::Task { id, .. } => Some(id),
            Objective::Depot(_) => None,
        }
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// The three states of the collector state machine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// No objective, not carrying.  Waiting for an assignment.
    Idle,
    /// Moving toward a task, not carrying.
    Seeking,
    /// Carrying a task back to the depot.
    Returning,
}

impl AgentState {
    /// Lower-case label, used as a CSV column value.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle      => "idle",
            AgentState::Seeking   => "seeking",
            AgentState::Returning => "returning",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A collector agent.
///
/// The agent itself only moves ([`advance`](Self::advance)); every state
/// transition is driven by the coordinator through the transition methods
/// below, each of which keeps the invariant
/// `carrying ⇒ objective == Depot(..)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    id:        AgentId,
    position:  Point,
    carrying:  bool,
    objective: Option<Objective>,
}

impl Agent {
    /// A new idle agent at `position`.
    pub fn new(id: AgentId, position: Point) -> Self {
        Self {
            id,
            position,
            carrying:  false,
            objective: None,
        }
    }

    // ── Getters ───────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn is_carrying(&self) -> bool {
        self.carrying
    }

    #[inline]
    pub fn objective(&self) -> Option<Objective> {
        self.objective
    }

    /// The task currently sought, if any.
    #[inline]
    pub fn sought_task(&self) -> Option<TaskId> {
        self.objective.and_then(Objective::task)
    }

    pub fn state(&self) -> AgentState {
        match (self.carrying, self.objective) {
            (true, _)        => AgentState::Returning,
            (false, None)    => AgentState::Idle,
            (false, Some(_)) => AgentState::Seeking,
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move one bounded step toward the objective.
    ///
    /// Returns `true` if the objective point has been reached.  Without an
    /// objective this is a no-op returning `false`.
    pub fn advance(&mut self, max_speed: f64) -> bool {
        let Some(objective) = self.objective else {
            return false;
        };
        let (next, arrived) = step_toward(self.position, objective.point(), max_speed);
        self.position = next;
        arrived
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// IDLE/SEEKING → SEEKING: head for task `id` at `at`.
    pub fn seek(&mut self, id: TaskId, at: Point) {
        debug_assert!(!self.carrying, "{} cannot seek while carrying", self.id);
        self.objective = Some(Objective::Task { id, at });
    }

    /// SEEKING → IDLE: forget a task objective (stale or lost race).
    pub fn clear_objective(&mut self) {
        debug_assert!(!self.carrying, "{} cannot drop its depot objective", self.id);
        self.objective = None;
    }

    /// SEEKING → RETURNING: the task has been collected.
    pub fn pick_up(&mut self, depot: Point) {
        self.carrying = true;
        self.objective = Some(Objective::Depot(depot));
    }

    /// Re-point a carrying agent at the depot.  Idempotent.
    pub fn head_to_depot(&mut self, depot: Point) {
        if self.carrying {
            self.objective = Some(Objective::Depot(depot));
        }
    }

    /// RETURNING → IDLE: the task has been delivered.
    pub fn drop_off(&mut self) {
        self.carrying = false;
        self.objective = None;
    }
}
