//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `AgentId` doubles as an index into
//! the driver's agent `Vec`; `TaskId` is a monotonically issued identity and is
//! never reused, so it is 64-bit.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of a collector agent; also its index in the agent list.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identity of a pending task.  Issued in insertion order, so a lower id
    /// always means an earlier insertion.
    pub struct TaskId(u64);
}

impl TaskId {
    /// The id following `self` in issue order.
    #[inline]
    pub fn next(self) -> TaskId {
        TaskId(self.0 + 1)
    }
}
