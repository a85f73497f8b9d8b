//! Fills gaps of the shortest-path table from the facility arcs.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use log::debug;

use super::DistanceIndex;
use crate::models::Arc;

/// Adds every pair of `targets` missing from `index` whose distance can be
/// derived from `arcs` (treated as undirected edges).
///
/// Pairs already present are left untouched and pairs not connected through
/// the arcs stay unknown. Returns the number of pairs added.
///
/// # Examples
///
/// ```
/// use u_picking::distance::{complete_from_arcs, DistanceIndex};
/// use u_picking::models::Arc;
///
/// let arcs = [Arc { from: 1, to: 2, distance: 3 }, Arc { from: 2, to: 3, distance: 4 }];
/// let mut index = DistanceIndex::new();
/// let added = complete_from_arcs(&mut index, &arcs, &[1, 3]);
/// assert_eq!(added, 1);
/// assert_eq!(index.distance(3, 1), Ok(7));
/// ```
pub fn complete_from_arcs(index: &mut DistanceIndex, arcs: &[Arc], targets: &[u32]) -> usize {
    let mut adjacency: HashMap<u32, Vec<(u32, u64)>> = HashMap::new();
    for arc in arcs {
        adjacency.entry(arc.from).or_default().push((arc.to, arc.distance));
        adjacency.entry(arc.to).or_default().push((arc.from, arc.distance));
    }

    let targets: BTreeSet<u32> = targets.iter().copied().collect();
    let mut added = 0;
    for &source in &targets {
        let missing: Vec<u32> = targets
            .iter()
            .copied()
            .filter(|&t| !index.contains(source, t))
            .collect();
        if missing.is_empty() {
            continue;
        }
        let reached = dijkstra(&adjacency, source);
        for target in missing {
            if let Some(&d) = reached.get(&target) {
                index.set(source, target, d);
                added += 1;
            }
        }
    }
    debug!("[DIST] {added} location pairs derived from {} arcs", arcs.len());
    added
}

fn dijkstra(adjacency: &HashMap<u32, Vec<(u32, u64)>>, source: u32) -> HashMap<u32, u64> {
    let mut best: HashMap<u32, u64> = HashMap::new();
    let mut heap = BinaryHeap::new();
    best.insert(source, 0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, node))) = heap.pop() {
        if best.get(&node).is_some_and(|&b| d > b) {
            continue;
        }
        let Some(edges) = adjacency.get(&node) else {
            continue;
        };
        for &(next, w) in edges {
            let nd = d.saturating_add(w);
            if best.get(&next).map_or(true, |&b| nd < b) {
                best.insert(next, nd);
                heap.push(Reverse((nd, next)));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShortestPath;

    fn arc(from: u32, to: u32, distance: u64) -> Arc {
        Arc { from, to, distance }
    }

    #[test]
    fn test_shortest_route_chosen() {
        let arcs = [arc(1, 2, 10), arc(1, 3, 2), arc(3, 2, 3)];
        let mut index = DistanceIndex::new();
        complete_from_arcs(&mut index, &arcs, &[1, 2]);
        assert_eq!(index.distance(1, 2), Ok(5));
    }

    #[test]
    fn test_existing_entries_kept() {
        let arcs = [arc(1, 2, 1)];
        let mut index = DistanceIndex::from_paths(&[ShortestPath {
            from: 1,
            to: 2,
            distance: 50,
        }]);
        let added = complete_from_arcs(&mut index, &arcs, &[1, 2]);
        assert_eq!(added, 0);
        assert_eq!(index.distance(1, 2), Ok(50));
    }

    #[test]
    fn test_disconnected_stays_unknown() {
        let arcs = [arc(1, 2, 1), arc(3, 4, 1)];
        let mut index = DistanceIndex::new();
        complete_from_arcs(&mut index, &arcs, &[1, 4]);
        assert!(index.distance(1, 4).is_err());
    }
}
