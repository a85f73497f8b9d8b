//! Sparse symmetric shortest-path distance index.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::ShortestPath;

/// Distance lookup between two locations absent from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no known distance between locations {from} and {to}")]
pub struct UnknownDistance {
    /// Origin location.
    pub from: u32,
    /// Destination location.
    pub to: u32,
}

/// Shortest-path distances between location pairs.
///
/// Every entry is stored in both directions. The distance from a location to
/// itself is always 0; any other pair missing from the table is unknown.
///
/// # Examples
///
/// ```
/// use u_picking::distance::DistanceIndex;
/// use u_picking::models::ShortestPath;
///
/// let index = DistanceIndex::from_paths(&[ShortestPath { from: 1, to: 2, distance: 7 }]);
/// assert_eq!(index.distance(1, 2), Ok(7));
/// assert_eq!(index.distance(2, 1), Ok(7));
/// assert_eq!(index.distance(3, 3), Ok(0));
/// assert!(index.distance(1, 3).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistanceIndex {
    known: HashMap<(u32, u32), u64>,
}

impl DistanceIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from shortest-path table entries.
    ///
    /// When a pair is listed more than once, the last entry wins.
    pub fn from_paths(paths: &[ShortestPath]) -> Self {
        let mut index = Self::new();
        for p in paths {
            index.set(p.from, p.to, p.distance);
        }
        index
    }

    /// Stores `distance` for `(a, b)` and `(b, a)`.
    pub fn set(&mut self, a: u32, b: u32, distance: u64) {
        self.known.insert((a, b), distance);
        self.known.insert((b, a), distance);
    }

    /// Returns `true` if the distance between `a` and `b` is known.
    pub fn contains(&self, a: u32, b: u32) -> bool {
        a == b || self.known.contains_key(&(a, b))
    }

    /// Distance from `from` to `to`.
    pub fn distance(&self, from: u32, to: u32) -> Result<u64, UnknownDistance> {
        if from == to {
            return Ok(0);
        }
        self.known
            .get(&(from, to))
            .copied()
            .ok_or(UnknownDistance { from, to })
    }

    /// Number of stored ordered pairs.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Returns `true` if no pair is stored.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
