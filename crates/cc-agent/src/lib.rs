//! `cc-agent` — the collector agent for the cleaning-crew simulation.
//!
//! # State machine
//!
//! ```text
//!            task assigned                 arrived, task still live
//!   Idle ─────────────────────▶ Seeking ───────────────────────────▶ Returning
//!    ▲  ◀───────────────────────  │                                      │
//!    │   task gone / lost race                                           │
//!    └───────────────────────────────────────────────────────────────────┘
//!                               arrived at depot
//! ```
//!
//! The agent only knows how to move; the coordinator in `cc-sim` decides
//! when each transition fires.

pub mod agent;


pub use agent::{Agent, AgentState, Objective};
