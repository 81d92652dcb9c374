//! Planar coordinate type and movement primitives.
//!
//! The world is a flat 2-D plane measured in abstract distance units (the
//! presentation layer maps one unit to one pixel).  Coordinates are `f64` so
//! that repeated fixed-length steps accumulate negligible drift over a long
//! run.

use crate::CoreError;

/// An immutable point in the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Squared Euclidean distance — same ordering as [`distance`](Self::distance)
    /// without the square root.  Use for nearest-neighbour rankings.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl std::str::FromStr for Point {
    type Err = CoreError;

    /// Parse `"x y"` or `"x,y"` (surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::Parse(format!("expected two coordinates, got {s:?}")));
        };
        let coord = |v: &str| -> Result<f64, CoreError> {
            let n: f64 = v
                .parse()
                .map_err(|e| CoreError::Parse(format!("bad coordinate {v:?}: {e}")))?;
            if n.is_finite() {
                Ok(n)
            } else {
                Err(CoreError::Parse(format!("coordinate {v:?} is not finite")))
            }
        };
        Ok(Point::new(coord(x)?, coord(y)?))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Move from `current` toward `target` by at most `max_speed` units.
///
/// Returns the new position and whether `target` has been reached.
///
/// - `current == target` → `(current, true)`.
/// - Target within `max_speed` → snaps exactly onto `target`, so an agent
///   never overshoots and oscillates around its objective.
/// - Otherwise advances exactly `max_speed` along the straight line.
///
/// The two early returns guarantee the division below never sees a zero
/// length.
pub fn step_toward(current: Point, target: Point, max_speed: f64) -> (Point, bool) {
    if current == target {
        return (current, true);
    }

    let dist = current.distance(target);
    if dist <= max_speed {
        return (target, true);
    }

    let scale = max_speed / dist;
    let next = Point::new(
        current.x + (target.x - current.x) * scale,
        current.y + (target.y - current.y) * scale,
    );
    (next, false)
}
