//! The set of pending tasks and its spatial index.
//!
//! # Data layout
//!
//! Tasks live in a `BTreeMap<TaskId, Task>` so that iteration is in issue
//! order and liveness checks are O(log n).  An R-tree (via `rstar`) holds one
//! `[x, y]` entry per live task and answers nearest-task queries; both
//! structures are updated together on every insert and remove.

use std::collections::BTreeMap;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use cc_core::{Point, TaskId};

// ── Task ──────────────────────────────────────────────────────────────────────

/// One unit of uncollected dirt.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id:       TaskId,
    pub location: Point,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D point with the owning `TaskId`.
///
/// Equality includes the id so that removing one of several tasks sharing a
/// location removes exactly that task.
#[derive(Clone, Debug, PartialEq)]
struct TaskEntry {
    point: [f64; 2],
    id:    TaskId,
}

impl From<Task> for TaskEntry {
    fn from(task: Task) -> Self {
        Self { point: task.location.to_array(), id: task.id }
    }
}

impl RTreeObject for TaskEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for TaskEntry {
    /// Squared Euclidean distance, computed exactly as
    /// [`Point::distance_squared`] so that equal distances compare equal.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        Point::new(point[0], point[1]).distance_squared(Point::new(self.point[0], self.point[1]))
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// Owner of every pending task.
///
/// Ids are issued from a counter that only moves forward, so a removed id is
/// never handed out again.
pub struct TaskSet {
    tasks:   BTreeMap<TaskId, Task>,
    index:   RTree<TaskEntry>,
    next_id: TaskId,
}

impl TaskSet {
    pub fn new() -> Self {
        Self {
            tasks:   BTreeMap::new(),
            index:   RTree::new(),
            next_id: TaskId(0),
        }
    }

    /// Build a set from initial locations.  Ids are issued in iteration order
    /// starting at `TaskId(0)`; the R-tree is bulk-loaded.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut tasks = BTreeMap::new();
        let mut next_id = TaskId(0);
        for location in points {
            tasks.insert(next_id, Task { id: next_id, location });
            next_id = next_id.next();
        }
        let index = RTree::bulk_load(tasks.values().copied().map(TaskEntry::from).collect());
        Self { tasks, index, next_id }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add a task at `location` and return its fresh id.  Always succeeds;
    /// several tasks may share a location.
    pub fn insert(&mut self, location: Point) -> TaskId {
        let id = self.next_id;
        self.next_id = id.next();

        let task = Task { id, location };
        self.tasks.insert(id, task);
        self.index.insert(TaskEntry::from(task));
        tracing::trace!(task = %id, at = %location, "task inserted");
        id
    }

    /// Remove the task `id`.  Returns `false` (and changes nothing) if it is
    /// not live — e.g. another agent already collected it.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.remove(&id) else {
            return false;
        };
        let removed = self.index.remove(&TaskEntry::from(task));
        debug_assert!(removed.is_some(), "task {id} missing from spatial index");
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The live task closest to `point`, or `None` if the set is empty.
    ///
    /// Among equidistant tasks the lowest id (earliest inserted) wins.
    pub fn nearest_to(&self, point: Point) -> Option<Task> {
        let mut candidates = self.index.nearest_neighbor_iter_with_distance_2(&point.to_array());
        let (first, best) = candidates.next()?;

        let mut winner = first.id;
        for (entry, d2) in candidates {
            if d2 > best {
                break;
            }
            winner = winner.min(entry.id);
        }
        self.get(winner)
    }

    /// `true` while task `id` is pending.
    #[inline]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of ids ever issued — live tasks plus every task removed.
    pub fn inserted_total(&self) -> u64 {
        self.next_id.0
    }

    /// Live tasks in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.values()
    }

    /// Locations of live tasks in ascending id order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.tasks.values().map(|t| t.location)
    }
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point> for TaskSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, points: I) {
        for p in points {
            self.insert(p);
        }
    }
}
