//! `cc-tasks` — pending task storage for the cleaning-crew simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`task_set`]  | `Task`, `TaskSet` (id map + R-tree nearest index)      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Task`.                 |

pub mod task_set;


pub use task_set::{Task, TaskSet};
