//! Outer loop: tours until every order is picked or no order can progress.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};

use super::{ActivationPolicy, TourPlanner};
use crate::config::SolverConfig;
use crate::distance::{complete_from_arcs, DistanceIndex};
use crate::models::{
    CartonCapacity, Instance, OrderBoxes, RunResult, Termination, Tour,
};
use crate::packing::{CartonIds, DemandTracker};

/// Repeats tour construction over one instance and assembles the result.
///
/// A tour that packs nothing marks its orders as stalled; stalled orders are
/// not activated again. The run stops once all orders are done or no order
/// can be activated.
///
/// # Examples
///
/// ```
/// use u_picking::config::SolverConfig;
/// use u_picking::constructive::RunController;
/// use u_picking::models::{CartonCapacity, Instance, Order, Product, ShortestPath};
///
/// let instance = Instance::new(
///     vec![Product::new(1, 5, 1, 1)],
///     vec![Order::new(1, 1, [(1, 20)])],
///     1,
///     CartonCapacity::new(5, 100),
///     0,
///     0,
/// )
/// .with_shortest_paths(vec![ShortestPath { from: 0, to: 5, distance: 2 }]);
///
/// let result = RunController::new(&instance, &SolverConfig::default()).run();
/// assert!(result.is_complete());
/// assert_eq!(result.num_tours(), 4);
/// assert_eq!(result.travelled_distance(), 16);
/// assert_eq!(result.avg_weight(), 100);
/// ```
pub struct RunController<'a> {
    instance: &'a Instance,
    distances: DistanceIndex,
    policy: ActivationPolicy,
}

impl<'a> RunController<'a> {
    /// Prepares a run: builds the distance index and picks the activation policy.
    pub fn new(instance: &'a Instance, config: &SolverConfig) -> Self {
        let mut distances = DistanceIndex::from_paths(instance.shortest_paths());
        if config.complete_distances_from_arcs {
            let mut targets: Vec<u32> = instance.products().iter().map(|p| p.location()).collect();
            targets.push(instance.departing_depot());
            targets.push(instance.arrival_depot());
            complete_from_arcs(&mut distances, instance.arcs(), &targets);
        }
        Self {
            instance,
            distances,
            policy: ActivationPolicy::for_instance(instance, config),
        }
    }

    /// Distance index used by the run.
    pub fn distances(&self) -> &DistanceIndex {
        &self.distances
    }

    /// Runs tours until completion or until no order can be activated.
    pub fn run(&self) -> RunResult {
        let planner = TourPlanner::new(self.instance, &self.distances, self.policy);
        debug!("[RUN] activation policy {:?}", planner.policy());
        let mut trackers: BTreeMap<u32, DemandTracker> = self
            .instance
            .orders()
            .iter()
            .map(|o| (o.id(), DemandTracker::new(o)))
            .collect();
        let mut stalled = BTreeSet::new();
        let mut ids = CartonIds::new();

        let mut tours: Vec<Tour> = Vec::new();
        let mut boxes_per_order: BTreeMap<u32, usize> = BTreeMap::new();
        let mut travelled = 0;
        let mut crossed = 0;

        let termination = loop {
            if trackers.values().all(DemandTracker::is_done) {
                break Termination::Completed;
            }

            let outcome = planner.plan(&mut trackers, &stalled, &mut ids);
            if outcome.active_orders.is_empty() {
                break Termination::NoActivatableOrder;
            }
            if outcome.units_placed == 0 {
                debug!("[RUN] orders {:?} stalled", outcome.active_orders);
                stalled.extend(outcome.active_orders.iter().copied());
            }
            if !outcome.is_emitted() {
                continue;
            }

            for carton in &outcome.cartons {
                *boxes_per_order.entry(carton.order_id()).or_insert(0) += 1;
            }
            travelled += outcome.distance;
            crossed += outcome.crossed_locations;
            let id = tours.len() as u32 + 1;
            tours.push(Tour::new(
                id,
                outcome.cartons,
                outcome.distance,
                outcome.crossed_locations,
            ));
        };

        let incomplete: Vec<u32> = trackers
            .values()
            .filter(|t| !t.is_done())
            .map(|t| t.order_id())
            .collect();
        if termination == Termination::NoActivatableOrder {
            warn!(
                "[RUN] stopped with {} incomplete orders: {:?}",
                incomplete.len(),
                incomplete
            );
        }

        let fill = average_fill(&tours, self.instance.capacity());
        let orders = boxes_per_order
            .into_iter()
            .map(|(order_id, boxes)| OrderBoxes { order_id, boxes })
            .collect();
        let result = RunResult::new(
            tours,
            orders,
            travelled,
            crossed,
            fill,
            termination,
            incomplete,
        );
        info!(
            "[RUN] {} tours, {} cartons, distance {}, {} crossed locations, fill {}% weight / {}% volume",
            result.num_tours(),
            result.num_cartons(),
            result.travelled_distance(),
            result.crossed_locations(),
            result.avg_weight(),
            result.avg_volume()
        );
        result
    }
}

/// Solves an instance with the given configuration.
pub fn solve(instance: &Instance, config: &SolverConfig) -> RunResult {
    RunController::new(instance, config).run()
}

/// Average weight and volume fill of all cartons, in whole percent of the
/// capacity (half-way values round to even). `(0, 0)` without cartons.
pub fn average_fill(tours: &[Tour], capacity: CartonCapacity) -> (u32, u32) {
    let cartons: Vec<_> = tours.iter().flat_map(|t| t.cartons()).collect();
    if cartons.is_empty() {
        return (0, 0);
    }
    let n = cartons.len() as f64;
    let weight: u64 = cartons.iter().map(|c| c.weight()).sum();
    let volume: u64 = cartons.iter().map(|c| c.volume()).sum();
    let pct = |sum: u64, cap: u64| {
        (sum as f64 * 100.0 / (n * cap.max(1) as f64)).round_ties_even() as u32
    };
    (pct(weight, capacity.weight), pct(volume, capacity.volume))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MixedActivation;
    use crate::models::{Arc, Carton, Order, Product, ShortestPath};

    fn sp(from: u32, to: u32, distance: u64) -> ShortestPath {
        ShortestPath { from, to, distance }
    }

    #[test]
    fn test_single_box_scenario() {
        let inst = Instance::new(
            vec![Product::new(1, 1, 1, 1), Product::new(2, 2, 5, 5)],
            vec![Order::new(1, 1, [(1, 3), (2, 1)])],
            6,
            CartonCapacity::new(10, 10),
            0,
            0,
        )
        .with_shortest_paths(vec![sp(0, 1, 1), sp(0, 2, 2), sp(1, 2, 1)]);
        let result = solve(&inst, &SolverConfig::default());
        assert_eq!(result.num_tours(), 1);
        assert_eq!(result.num_cartons(), 1);
        let carton = &result.tours()[0].cartons()[0];
        assert_eq!(carton.quantity(1), 3);
        assert_eq!(carton.quantity(2), 1);
        assert_eq!((carton.weight(), carton.volume()), (8, 8));
        assert_eq!((result.avg_weight(), result.avg_volume()), (80, 80));
    }

    #[test]
    fn test_one_order_per_tour_without_mixing() {
        let inst = Instance::new(
            vec![Product::new(1, 1, 1, 1)],
            vec![Order::new(2, 1, [(1, 1)]), Order::new(1, 1, [(1, 1)])],
            6,
            CartonCapacity::new(10, 10),
            0,
            0,
        )
        .with_shortest_paths(vec![sp(0, 1, 1)]);
        let result = solve(&inst, &SolverConfig::default());
        assert_eq!(result.num_tours(), 2);
        assert_eq!(result.tours()[0].cartons()[0].order_id(), 1);
        assert_eq!(result.tours()[1].cartons()[0].order_id(), 2);
        assert_eq!(result.tours()[1].id(), 2);
        assert_eq!(result.travelled_distance(), 4);
        assert_eq!(result.crossed_locations(), 4);
    }

    #[test]
    fn test_mixing_packs_orders_together() {
        let inst = Instance::new(
            vec![Product::new(1, 1, 1, 1)],
            vec![Order::new(2, 1, [(1, 1)]), Order::new(1, 1, [(1, 1)])],
            6,
            CartonCapacity::new(10, 10),
            0,
            0,
        )
        .with_mixed_orders(true)
        .with_shortest_paths(vec![sp(0, 1, 1)]);
        let result = solve(&inst, &SolverConfig::default());
        assert_eq!(result.num_tours(), 1);
        assert_eq!(result.num_cartons(), 2);
        assert_eq!(
            result.orders(),
            &[
                OrderBoxes { order_id: 1, boxes: 1 },
                OrderBoxes { order_id: 2, boxes: 1 }
            ]
        );
    }

    #[test]
    fn test_oversized_product_terminates() {
        let inst = Instance::new(
            vec![Product::new(1, 1, 11, 1), Product::new(2, 1, 1, 1)],
            vec![Order::new(1, 1, [(1, 1)]), Order::new(2, 1, [(2, 1)])],
            2,
            CartonCapacity::new(10, 10),
            0,
            0,
        )
        .with_shortest_paths(vec![sp(0, 1, 1)]);
        let result = solve(&inst, &SolverConfig::default());
        assert_eq!(result.termination(), Termination::NoActivatableOrder);
        assert_eq!(result.incomplete_orders(), &[1]);
        // order 2 is still served after order 1 stalls
        assert_eq!(result.num_tours(), 1);
        assert_eq!(result.tours()[0].cartons()[0].order_id(), 2);
        // the stalled tour consumed carton ID 1
        assert_eq!(result.tours()[0].cartons()[0].id(), 2);
    }

    #[test]
    fn test_all_zero_demand_produces_nothing() {
        let inst = Instance::new(
            vec![Product::new(1, 1, 1, 1)],
            vec![Order::new(1, 1, [(1, 0)])],
            2,
            CartonCapacity::new(10, 10),
            0,
            0,
        );
        let result = solve(&inst, &SolverConfig::default());
        assert!(result.is_complete());
        assert_eq!(result.num_tours(), 0);
        assert!(result.orders().is_empty());
        assert_eq!((result.avg_weight(), result.avg_volume()), (0, 0));
    }

    #[test]
    fn test_arc_completion_reaches_product() {
        let inst = Instance::new(
            vec![Product::new(1, 2, 1, 1)],
            vec![Order::new(1, 1, [(1, 1)])],
            1,
            CartonCapacity::new(10, 10),
            0,
            0,
        )
        .with_arcs(vec![
            Arc { from: 0, to: 1, distance: 2 },
            Arc { from: 1, to: 2, distance: 3 },
        ]);
        let plain = solve(&inst, &SolverConfig::default());
        assert!(!plain.is_complete());
        let config = SolverConfig {
            complete_distances_from_arcs: true,
            ..SolverConfig::default()
        };
        let controller = RunController::new(&inst, &config);
        assert_eq!(controller.distances().distance(0, 2), Ok(5));
        assert!(!RunController::new(&inst, &SolverConfig::default())
            .distances()
            .contains(0, 2));
        let completed = controller.run();
        assert!(completed.is_complete());
        assert_eq!(completed.travelled_distance(), 10);
    }

    #[test]
    fn test_proximity_activation_changes_order() {
        let inst = Instance::new(
            vec![Product::new(1, 1, 6, 1), Product::new(2, 2, 6, 1)],
            vec![Order::new(1, 1, [(2, 1)]), Order::new(2, 1, [(1, 1)])],
            1,
            CartonCapacity::new(10, 10),
            0,
            0,
        )
        .with_mixed_orders(true)
        .with_shortest_paths(vec![sp(0, 1, 1), sp(0, 2, 5), sp(1, 2, 4)]);
        let config = SolverConfig {
            mixed_activation: MixedActivation::ByProximity,
            ..SolverConfig::default()
        };
        let result = solve(&inst, &config);
        assert_eq!(result.tours()[0].cartons()[0].order_id(), 2);
        let by_id = solve(&inst, &SolverConfig::default());
        assert_eq!(by_id.tours()[0].cartons()[0].order_id(), 1);
    }

    #[test]
    fn test_average_fill_rounds_half_to_even() {
        let p = Product::new(1, 1, 1, 1);
        let mut a = Carton::new(1, 1);
        a.add(&p, 1);
        // 1 * 100 / (1 * 8) = 12.5 -> 12
        let tours = vec![Tour::new(1, vec![a.clone()], 0, 0)];
        assert_eq!(average_fill(&tours, CartonCapacity::new(8, 8)), (12, 12));
        let mut b = Carton::new(2, 1);
        b.add(&p, 2);
        // 3 * 100 / (2 * 8) = 18.75 -> 19
        let tours = vec![Tour::new(1, vec![a, b], 0, 0)];
        assert_eq!(average_fill(&tours, CartonCapacity::new(8, 8)), (19, 19));
    }
}
