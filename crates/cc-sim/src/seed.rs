//! Random initial placement of agents and tasks.
//!
//! Coordinates are whole numbers, drawn uniformly from fixed insets of the
//! world rectangle (see the spawn constants in [`cc_core::config`]).

use cc_core::config::{
    AGENT_SPAWN_EDGE, AGENT_SPAWN_MIN, DEPOT_CLEARANCE, TASK_SPAWN_EDGE, TASK_SPAWN_MIN,
};
use cc_core::{CrewConfig, Point, SimRng};

use crate::{SimError, SimResult};

/// Give up on a single task after this many rejected draws.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Uniform integer point in `[min, extent - edge]` on both axes.
fn draw(rng: &mut SimRng, min: f64, edge: f64, width: f64, height: f64) -> Point {
    let lo = min as i64;
    let x = rng.gen_range(lo..=(width - edge).floor() as i64);
    let y = rng.gen_range(lo..=(height - edge).floor() as i64);
    Point::new(x as f64, y as f64)
}

/// Starting positions for `config.agent_count` agents.
pub fn scatter_agents(rng: &mut SimRng, config: &CrewConfig) -> Vec<Point> {
    (0..config.agent_count)
        .map(|_| draw(rng, AGENT_SPAWN_MIN, AGENT_SPAWN_EDGE, config.world_width, config.world_height))
        .collect()
}

/// `config.task_count` task locations, none within [`DEPOT_CLEARANCE`] of
/// the depot square.
pub fn scatter_tasks(rng: &mut SimRng, config: &CrewConfig) -> SimResult<Vec<Point>> {
    let depot = config.depot();
    (0..config.task_count)
        .map(|_| {
            (0..MAX_PLACEMENT_ATTEMPTS)
                .map(|_| draw(rng, TASK_SPAWN_MIN, TASK_SPAWN_EDGE, config.world_width, config.world_height))
                .find(|&p| !depot.near(p, DEPOT_CLEARANCE))
                .ok_or(SimError::Placement { attempts: MAX_PLACEMENT_ATTEMPTS })
        })
        .collect()
}
