//! `cc-core` — foundational types for the cleaning-crew simulation.
//!
//! This crate is a dependency of every other `cc-*` crate.  It has no `cc-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TaskId`                                   |
//! | [`geo`]         | `Point`, `distance`, `step_toward`                    |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `CrewConfig`, `Depot`                                 |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CrewConfig, Depot};
pub use error::{CoreError, CoreResult};
pub use geo::{Point, distance, step_toward};
pub use ids::{AgentId, TaskId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
