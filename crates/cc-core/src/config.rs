//! Run configuration and the depot it implies.
//!
//! `CrewConfig` is read once at startup (CLI flags, JSON file, or code) and
//! validated before the simulation is built.  There is no hot reload.

use crate::{CoreError, CoreResult, Point};

/// Distance kept between the depot square and the world's right/bottom edges.
const DEPOT_EDGE_MARGIN: f64 = 30.0;

/// Seeded tasks are drawn from `[50, width-150] × [50, height-150]`.
pub const TASK_SPAWN_MIN: f64 = 50.0;
pub const TASK_SPAWN_EDGE: f64 = 150.0;

/// Agents start inside `[60, width-160] × [60, height-160]`.
pub const AGENT_SPAWN_MIN: f64 = 60.0;
pub const AGENT_SPAWN_EDGE: f64 = 160.0;

/// Seeded tasks keep at least this far from the depot square.
pub const DEPOT_CLEARANCE: f64 = 20.0;

// ── Depot ─────────────────────────────────────────────────────────────────────

/// The fixed drop-off location.
///
/// `corner` and `size` describe the axis-aligned square drawn by the
/// presentation layer; agents deliver to its [`centre`](Self::centre).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    /// Top-left corner of the square.
    pub corner: Point,
    /// Edge length of the square.
    pub size: f64,
}

impl Depot {
    pub fn new(corner: Point, size: f64) -> Self {
        Self { corner, size }
    }

    /// Depot of edge `size` tucked into the bottom-right of a
    /// `width × height` world.
    pub fn for_world(width: f64, height: f64, size: f64) -> Self {
        let inset = size + DEPOT_EDGE_MARGIN;
        Self::new(Point::new(width - inset, height - inset), size)
    }

    /// The drop-off point every carrying agent heads for.
    #[inline]
    pub fn centre(&self) -> Point {
        let half = self.size / 2.0;
        Point::new(self.corner.x + half, self.corner.y + half)
    }

    /// `true` if `p` lies strictly inside the square grown by `margin` on
    /// every side.
    pub fn near(&self, p: Point, margin: f64) -> bool {
        self.corner.x - margin < p.x
            && p.x < self.corner.x + self.size + margin
            && self.corner.y - margin < p.y
            && p.y < self.corner.y + self.size + margin
    }
}

// ── CrewConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrewConfig {
    /// Number of collector agents.  Default: 5.
    pub agent_count: usize,

    /// Tasks scattered over the floor at startup.  Default: 20.
    pub task_count: usize,

    /// Maximum distance an agent moves per tick.  Default: 2.0.
    pub speed: f64,

    /// Driver ticks per second.  Default: 60.
    pub tick_rate_hz: u32,

    /// World width, used only for initial placement and the depot position.
    pub world_width: f64,

    /// World height, used only for initial placement and the depot position.
    pub world_height: f64,

    /// Edge length of the depot square.  Default: 60.
    pub depot_size: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Stop after this many ticks.  `None` runs until the caller stops.
    pub total_ticks: Option<u64>,

    /// Deliver a snapshot to observers every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            agent_count:           5,
            task_count:            20,
            speed:                 2.0,
            tick_rate_hz:          60,
            world_width:           800.0,
            world_height:          600.0,
            depot_size:            60.0,
            seed:                  42,
            total_ticks:           None,
            output_interval_ticks: 1,
        }
    }
}

impl CrewConfig {
    /// The depot implied by the world bounds.
    pub fn depot(&self) -> Depot {
        Depot::for_world(self.world_width, self.world_height, self.depot_size)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.agent_count == 0 {
            return Err(CoreError::Config("agent_count must be at least 1".into()));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(CoreError::Config(format!(
                "speed must be a positive finite number, got {}",
                self.speed
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(CoreError::Config("tick_rate_hz must be at least 1".into()));
        }
        if !(self.depot_size.is_finite() && self.depot_size > 0.0) {
            return Err(CoreError::Config(format!(
                "depot_size must be a positive finite number, got {}",
                self.depot_size
            )));
        }
        // Both spawn rectangles must be non-empty.
        for (name, extent) in [("world_width", self.world_width), ("world_height", self.world_height)] {
            let min = AGENT_SPAWN_MIN + AGENT_SPAWN_EDGE;
            if !(extent.is_finite() && extent >= min) {
                return Err(CoreError::Config(format!(
                    "{name} must be at least {min}, got {extent}"
                )));
            }
            if extent < self.depot_size + DEPOT_EDGE_MARGIN {
                return Err(CoreError::Config(format!(
                    "{name} {extent} cannot fit a depot of size {}",
                    self.depot_size
                )));
            }
        }
        if self.output_interval_ticks == 0 {
            return Err(CoreError::Config("output_interval_ticks must be at least 1".into()));
        }
        Ok(())
    }
}
