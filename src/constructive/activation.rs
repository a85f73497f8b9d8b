//! Selection of the orders picked during a tour.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{MixedActivation, SolverConfig};
use crate::distance::DistanceIndex;
use crate::models::Instance;
use crate::packing::DemandTracker;

/// Rule deciding which orders share the cart during one tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// One order per tour: the first unfinished order by ID.
    SingleOrder,
    /// Unfinished orders by ascending ID, until the cart is full.
    MixedByIdentifier,
    /// Unfinished orders ranked by the distance from the departing depot to
    /// their nearest needed product, until the cart is full.
    MixedByProximity,
}

impl ActivationPolicy {
    /// Policy implied by the instance's mixed flag and the configuration.
    pub fn for_instance(instance: &Instance, config: &SolverConfig) -> Self {
        match (instance.mixed_orders(), config.mixed_activation) {
            (false, _) => Self::SingleOrder,
            (true, MixedActivation::ByIdentifier) => Self::MixedByIdentifier,
            (true, MixedActivation::ByProximity) => Self::MixedByProximity,
        }
    }

    /// Returns the orders to activate, in activation order.
    ///
    /// Finished orders and orders in `stalled` are never activated. Mixed
    /// policies activate at most `instance.cart_limit()` orders, one initial
    /// carton each.
    pub fn select(
        &self,
        instance: &Instance,
        distances: &DistanceIndex,
        trackers: &BTreeMap<u32, DemandTracker>,
        stalled: &BTreeSet<u32>,
    ) -> Vec<u32> {
        let mut candidates = trackers
            .values()
            .filter(|t| !t.is_done() && !stalled.contains(&t.order_id()));

        match self {
            Self::SingleOrder => candidates.next().map(|t| t.order_id()).into_iter().collect(),
            Self::MixedByIdentifier => candidates
                .take(instance.cart_limit())
                .map(|t| t.order_id())
                .collect(),
            Self::MixedByProximity => {
                let depot = instance.departing_depot();
                let mut ranked: Vec<(Option<u64>, u32)> = candidates
                    .map(|t| {
                        let nearest = t
                            .needed_products()
                            .filter_map(|pid| instance.product(pid))
                            .filter_map(|p| distances.distance(depot, p.location()).ok())
                            .min();
                        (nearest, t.order_id())
                    })
                    .collect();
                ranked.sort_by_key(|&(d, id)| (d.is_none(), d, id));
                ranked
                    .into_iter()
                    .take(instance.cart_limit())
                    .map(|(_, id)| id)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartonCapacity, Order, Product, ShortestPath};

    fn setup(k: usize) -> (Instance, DistanceIndex, BTreeMap<u32, DemandTracker>) {
        let products = vec![
            Product::new(1, 10, 1, 1),
            Product::new(2, 20, 1, 1),
            Product::new(3, 30, 1, 1),
        ];
        let orders = vec![
            Order::new(1, 1, [(3, 1)]),
            Order::new(2, 1, [(1, 1)]),
            Order::new(3, 1, [(2, 1)]),
            Order::new(4, 1, [(9, 1)]),
        ];
        let paths = vec![
            ShortestPath { from: 0, to: 10, distance: 1 },
            ShortestPath { from: 0, to: 20, distance: 2 },
            ShortestPath { from: 0, to: 30, distance: 3 },
        ];
        let instance = Instance::new(products, orders, k, CartonCapacity::new(5, 5), 0, 0)
            .with_mixed_orders(true)
            .with_shortest_paths(paths.clone());
        let trackers = instance
            .orders()
            .iter()
            .map(|o| (o.id(), DemandTracker::new(o)))
            .collect();
        (instance, DistanceIndex::from_paths(&paths), trackers)
    }

    #[test]
    fn test_single_order_first_unfinished() {
        let (inst, dist, mut trackers) = setup(6);
        if let Some(t) = trackers.get_mut(&1) {
            t.decrement(3, 1);
        }
        let chosen = ActivationPolicy::SingleOrder.select(&inst, &dist, &trackers, &BTreeSet::new());
        assert_eq!(chosen, vec![2]);
    }

    #[test]
    fn test_stalled_orders_skipped() {
        let (inst, dist, trackers) = setup(6);
        let stalled = BTreeSet::from([1, 2]);
        let chosen = ActivationPolicy::SingleOrder.select(&inst, &dist, &trackers, &stalled);
        assert_eq!(chosen, vec![3]);
    }

    #[test]
    fn test_mixed_by_identifier_capped_by_cart() {
        let (inst, dist, trackers) = setup(2);
        let chosen =
            ActivationPolicy::MixedByIdentifier.select(&inst, &dist, &trackers, &BTreeSet::new());
        assert_eq!(chosen, vec![1, 2]);
    }

    #[test]
    fn test_mixed_by_proximity_ranks_unknown_last() {
        let (inst, dist, trackers) = setup(6);
        let chosen =
            ActivationPolicy::MixedByProximity.select(&inst, &dist, &trackers, &BTreeSet::new());
        assert_eq!(chosen, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_nothing_to_activate() {
        let (inst, dist, trackers) = setup(6);
        let stalled = BTreeSet::from([1, 2, 3, 4]);
        assert!(ActivationPolicy::MixedByIdentifier
            .select(&inst, &dist, &trackers, &stalled)
            .is_empty());
    }

    #[test]
    fn test_policy_from_flags() {
        let (inst, _, _) = setup(2);
        let config = SolverConfig {
            mixed_activation: MixedActivation::ByProximity,
            ..SolverConfig::default()
        };
        assert_eq!(
            ActivationPolicy::for_instance(&inst, &config),
            ActivationPolicy::MixedByProximity
        );
        let single = inst.with_mixed_orders(false);
        assert_eq!(
            ActivationPolicy::for_instance(&single, &config),
            ActivationPolicy::SingleOrder
        );
    }
}
