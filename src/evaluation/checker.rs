//! In-process validation of a run result against its instance.

use std::collections::BTreeMap;

use crate::models::{Carton, Instance, RunResult, Violation, ViolationType};

/// Checks a run result for capacity, cart, demand and bookkeeping violations.
///
/// Under-picking is only reported for completed runs; an incomplete run is
/// expected to leave demand behind.
///
/// # Examples
///
/// ```
/// use u_picking::config::SolverConfig;
/// use u_picking::constructive::solve;
/// use u_picking::evaluation::SolutionChecker;
/// use u_picking::models::{CartonCapacity, Instance, Order, Product, ShortestPath};
///
/// let instance = Instance::new(
///     vec![Product::new(1, 5, 2, 3)],
///     vec![Order::new(1, 1, [(1, 7)])],
///     2,
///     CartonCapacity::new(10, 10),
///     0,
///     0,
/// )
/// .with_shortest_paths(vec![ShortestPath { from: 0, to: 5, distance: 2 }]);
///
/// let result = solve(&instance, &SolverConfig::default());
/// let checker = SolutionChecker::new(&instance);
/// assert!(checker.check(&result).is_empty());
/// ```
pub struct SolutionChecker<'a> {
    instance: &'a Instance,
}

impl<'a> SolutionChecker<'a> {
    /// Creates a checker for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Returns `true` if the result has no violation.
    pub fn is_feasible(&self, result: &RunResult) -> bool {
        self.check(result).is_empty()
    }

    /// Lists every violation found in `result`.
    pub fn check(&self, result: &RunResult) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut picked: BTreeMap<(u32, u32), u64> = BTreeMap::new();
        let mut boxes: BTreeMap<u32, usize> = BTreeMap::new();

        for (position, tour) in result.tours().iter().enumerate() {
            if tour.id() as usize != position + 1 {
                violations.push(Violation::new(ViolationType::NonSequentialTourId {
                    position,
                    tour_id: tour.id(),
                }));
            }
            if tour.cartons().len() > self.instance.cart_limit() {
                violations.push(Violation::new(ViolationType::CartLimitExceeded {
                    tour_id: tour.id(),
                    cartons: tour.cartons().len(),
                    limit: self.instance.cart_limit(),
                }));
            }
            for carton in tour.cartons() {
                *boxes.entry(carton.order_id()).or_insert(0) += 1;
                self.check_carton(carton, &mut violations);
                for line in carton.lines() {
                    *picked
                        .entry((carton.order_id(), line.product_id))
                        .or_insert(0) += line.quantity;
                }
            }
        }

        for order in self.instance.orders() {
            for (&product_id, &required) in order.demand() {
                let got = picked.get(&(order.id(), product_id)).copied().unwrap_or(0);
                if got > required {
                    violations.push(Violation::new(ViolationType::OverPicked {
                        order_id: order.id(),
                        product_id,
                        picked: got,
                        required,
                    }));
                } else if got < required && result.is_complete() {
                    violations.push(Violation::new(ViolationType::UnderPicked {
                        order_id: order.id(),
                        product_id,
                        picked: got,
                        required,
                    }));
                }
            }
        }

        let reported: BTreeMap<u32, usize> = result
            .orders()
            .iter()
            .map(|o| (o.order_id, o.boxes))
            .collect();
        let mut order_ids: Vec<u32> = reported.keys().chain(boxes.keys()).copied().collect();
        order_ids.sort_unstable();
        order_ids.dedup();
        for order_id in order_ids {
            let r = reported.get(&order_id).copied().unwrap_or(0);
            let a = boxes.get(&order_id).copied().unwrap_or(0);
            if r != a {
                violations.push(Violation::new(ViolationType::BoxCountMismatch {
                    order_id,
                    reported: r,
                    actual: a,
                }));
            }
        }

        violations
    }

    fn check_carton(&self, carton: &Carton, violations: &mut Vec<Violation>) {
        let carton_id = carton.id();
        if carton.is_empty() {
            violations.push(Violation::new(ViolationType::EmptyCarton { carton_id }));
        }
        if !carton.fits(&self.instance.capacity()) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                carton_id,
                weight: carton.weight(),
                volume: carton.volume(),
            }));
        }

        let Some(order) = self.instance.order(carton.order_id()) else {
            violations.push(Violation::new(ViolationType::UnknownOrder {
                carton_id,
                order_id: carton.order_id(),
            }));
            return;
        };

        let mut weight = 0;
        let mut volume = 0;
        let mut all_known = true;
        for line in carton.lines() {
            match self.instance.product(line.product_id) {
                Some(p) => {
                    weight += p.unit_weight() * line.quantity;
                    volume += p.unit_volume() * line.quantity;
                }
                None => {
                    all_known = false;
                    violations.push(Violation::new(ViolationType::UnknownProduct {
                        carton_id,
                        product_id: line.product_id,
                    }));
                }
            }
            if order.quantity(line.product_id) == 0 {
                violations.push(Violation::new(ViolationType::ProductNotInOrder {
                    carton_id,
                    product_id: line.product_id,
                }));
            }
        }
        if all_known && (weight != carton.weight() || volume != carton.volume()) {
            violations.push(Violation::new(ViolationType::CartonLoadMismatch { carton_id }));
        }
    }
}
