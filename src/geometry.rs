//! Grid coordinates and distance arithmetic.

use serde::{Deserialize, Serialize};

/// A grid coordinate, also used as a lightweight vector for distance math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another location.
    #[inline]
    pub fn manhattan(&self, other: Location) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (square rings; 1 = the 8-neighborhood).
    #[inline]
    pub fn chebyshev(&self, other: Location) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True if `other` is in this location's 8-neighborhood (not itself).
    #[inline]
    pub fn is_adjacent(&self, other: Location) -> bool {
        *self != other && self.chebyshev(other) <= 1
    }
}

/// All locations within Chebyshev radius `r` of `center`, excluding the
/// center itself, in lexicographic (x, y) order. Lexicographic order is the
/// canonical tie-break for every distance comparison in the simulation, so
/// movement and target selection are reproducible.
pub fn tiles_within_radius(center: Location, r: i32) -> Vec<Location> {
    let mut tiles = Vec::with_capacity(((2 * r + 1) * (2 * r + 1) - 1).max(0) as usize);
    for x in (center.x - r)..=(center.x + r) {
        for y in (center.y - r)..=(center.y + r) {
            let loc = Location::new(x, y);
            if loc != center {
                tiles.push(loc);
            }
        }
    }
    tiles
}

/// Locations at exactly Chebyshev distance `r` from `center`, in
/// lexicographic (x, y) order. Used for expanding-ring searches.
pub fn ring_at_radius(center: Location, r: i32) -> Vec<Location> {
    let mut tiles = Vec::new();
    for x in (center.x - r)..=(center.x + r) {
        for y in (center.y - r)..=(center.y + r) {
            let loc = Location::new(x, y);
            if center.chebyshev(loc) == r {
                tiles.push(loc);
            }
        }
    }
    tiles
}
