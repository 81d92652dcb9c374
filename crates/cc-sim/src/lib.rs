//! `cc-sim` — coordinator and tick driver for the cleaning-crew simulation.
//!
//! # Tick loop
//!
//! ```text
//! every tick (fixed rate, default 60 Hz):
//!   ① Insert     — apply task insertions queued by the input layer.
//!   ② Assign     — idle agents, and agents whose task vanished, take the
//!                  nearest pending task; carriers head for the depot.
//!   ③ Move       — every agent advances one bounded step
//!                  (parallel with the `parallel` feature).
//!   ④ Resolve    — in ascending AgentId order:
//!                    at live task   → remove it, carry, head for depot
//!                    at taken task  → back to idle
//!                    at depot       → drop off, back to idle
//!                  then agents whose task was just taken go idle.
//!   ⑤ Report     — observers get the outcome and a read-only snapshot.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the movement phase on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cc_core::CrewConfig;
//! use cc_sim::{NoopObserver, SimBuilder};
//!
//! let config = CrewConfig { total_ticks: Some(3_600), ..Default::default() };
//! let mut sim = SimBuilder::new(config).build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod pacer;
pub mod seed;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use coordinator::{Coordinator, TickOutcome};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use pacer::TickPacer;
pub use sim::Sim;
pub use snapshot::{Snapshot, Totals};
