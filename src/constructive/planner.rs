//! Construction of a single picking tour.
//!
//! A tour activates orders, then repeatedly walks to the nearest product
//! that can still be packed for one of them, fills cartons there, and finally
//! returns to the arrival depot. Cartons left empty are dropped.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use super::ActivationPolicy;
use crate::distance::DistanceIndex;
use crate::models::{Carton, Instance, Product};
use crate::packing::{Cart, CartonIds, CartonPacker, DemandTracker};

/// Everything one tour produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourOutcome {
    /// Orders activated for the tour, in activation order. Empty when no
    /// order could be activated.
    pub active_orders: Vec<u32>,
    /// Cartons that received at least one product, in opening order.
    pub cartons: Vec<Carton>,
    /// Travelled distance including the return leg.
    pub distance: u64,
    /// Visited product locations, plus one for the return leg.
    pub crossed_locations: u64,
    /// Units packed over all active orders.
    pub units_placed: u64,
    /// Product locations in visiting order.
    pub route: Vec<u32>,
}

impl TourOutcome {
    /// Returns `true` if the tour left something to report.
    pub fn is_emitted(&self) -> bool {
        !self.cartons.is_empty()
    }
}

/// Builds one tour at a time against the shared demand state.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use u_picking::constructive::{ActivationPolicy, TourPlanner};
/// use u_picking::distance::DistanceIndex;
/// use u_picking::models::{CartonCapacity, Instance, Order, Product, ShortestPath};
/// use u_picking::packing::{CartonIds, DemandTracker};
///
/// let paths = vec![ShortestPath { from: 0, to: 5, distance: 4 }];
/// let instance = Instance::new(
///     vec![Product::new(1, 5, 1, 1)],
///     vec![Order::new(1, 1, [(1, 3)])],
///     2,
///     CartonCapacity::new(10, 10),
///     0,
///     0,
/// );
/// let distances = DistanceIndex::from_paths(&paths);
/// let planner = TourPlanner::new(&instance, &distances, ActivationPolicy::SingleOrder);
///
/// let mut trackers: BTreeMap<u32, DemandTracker> =
///     instance.orders().iter().map(|o| (o.id(), DemandTracker::new(o))).collect();
/// let outcome = planner.plan(&mut trackers, &BTreeSet::new(), &mut CartonIds::new());
///
/// assert_eq!(outcome.units_placed, 3);
/// assert_eq!(outcome.distance, 8);
/// assert_eq!(outcome.crossed_locations, 2);
/// assert!(trackers[&1].is_done());
/// ```
pub struct TourPlanner<'a> {
    instance: &'a Instance,
    distances: &'a DistanceIndex,
    packer: CartonPacker,
    policy: ActivationPolicy,
}

impl<'a> TourPlanner<'a> {
    /// Creates a planner for the given instance and distances.
    pub fn new(
        instance: &'a Instance,
        distances: &'a DistanceIndex,
        policy: ActivationPolicy,
    ) -> Self {
        Self {
            instance,
            distances,
            packer: CartonPacker::new(instance.capacity()),
            policy,
        }
    }

    /// Activation policy in use.
    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    /// Runs one tour, updating `trackers` with everything packed.
    ///
    /// Orders in `stalled` are not activated. Carton IDs are drawn from `ids`,
    /// also for cartons that end up empty and are dropped.
    pub fn plan(
        &self,
        trackers: &mut BTreeMap<u32, DemandTracker>,
        stalled: &BTreeSet<u32>,
        ids: &mut CartonIds,
    ) -> TourOutcome {
        let active = self
            .policy
            .select(self.instance, self.distances, trackers, stalled);
        if active.is_empty() {
            return TourOutcome::default();
        }

        let mut cart = Cart::new(self.instance.cart_limit());
        for &order_id in &active {
            cart.open(order_id, ids);
        }

        let mut outcome = TourOutcome {
            active_orders: active,
            ..TourOutcome::default()
        };
        let mut current = self.instance.departing_depot();

        loop {
            let needed = self.needed_products(&outcome.active_orders, trackers);
            let placeable: Vec<&Product> = needed
                .into_iter()
                .filter_map(|pid| self.instance.product(pid))
                .filter(|p| self.is_placeable(p, &outcome.active_orders, trackers, &cart))
                .collect();
            if placeable.is_empty() {
                break;
            }

            let Some((product, step)) = self.nearest(current, &placeable) else {
                trace!("[TOUR] no known distance from location {current} to any candidate");
                break;
            };
            outcome.distance += step;
            outcome.crossed_locations += 1;
            current = product.location();
            outcome.route.push(current);

            let mut progress = 0;
            for &order_id in &outcome.active_orders {
                let Some(tracker) = trackers.get_mut(&order_id) else {
                    continue;
                };
                let need = tracker.remaining(product.id());
                if need == 0 {
                    continue;
                }
                let placed = self.packer.pack(&mut cart, ids, order_id, product, need);
                if placed > 0 {
                    tracker.decrement(product.id(), placed);
                    progress += placed;
                }
            }
            trace!(
                "[TOUR] product {} at location {current}: {progress} units packed",
                product.id()
            );
            outcome.units_placed += progress;
            if progress == 0 {
                break;
            }
        }

        let arrival = self.instance.arrival_depot();
        if current != arrival {
            match self.distances.distance(current, arrival) {
                Ok(d) => {
                    outcome.distance += d;
                    outcome.crossed_locations += 1;
                }
                Err(e) => debug!("[TOUR] return leg skipped: {e}"),
            }
        }

        outcome.cartons = cart.into_filled();
        debug!(
            "[TOUR] orders {:?}: {} units in {} cartons, distance {}",
            outcome.active_orders,
            outcome.units_placed,
            outcome.cartons.len(),
            outcome.distance
        );
        outcome
    }

    /// Products with remaining demand in any unfinished active order.
    fn needed_products(
        &self,
        active: &[u32],
        trackers: &BTreeMap<u32, DemandTracker>,
    ) -> BTreeSet<u32> {
        active
            .iter()
            .filter_map(|id| trackers.get(id))
            .filter(|t| !t.is_done())
            .flat_map(|t| t.needed_products())
            .collect()
    }

    fn is_placeable(
        &self,
        product: &Product,
        active: &[u32],
        trackers: &BTreeMap<u32, DemandTracker>,
        cart: &Cart,
    ) -> bool {
        active.iter().any(|&order_id| {
            trackers
                .get(&order_id)
                .is_some_and(|t| t.remaining(product.id()) > 0)
                && self.packer.placeable_units(cart, order_id, product) > 0
        })
    }

    /// Nearest candidate from `from`; the first candidate wins ties.
    fn nearest<'p>(&self, from: u32, candidates: &[&'p Product]) -> Option<(&'p Product, u64)> {
        let mut best: Option<(&Product, u64)> = None;
        for &p in candidates {
            let Ok(d) = self.distances.distance(from, p.location()) else {
                continue;
            };
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((p, d));
            }
        }
        best
    }
}
