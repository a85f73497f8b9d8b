//! Tour, run result and violation types.

use serde::{Deserialize, Serialize};

use super::Carton;

/// A type of constraint violation found in a run result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Carton weight or volume exceeds the carton capacity.
    CapacityExceeded {
        /// Carton ID.
        carton_id: u32,
        /// Accumulated weight.
        weight: u64,
        /// Accumulated volume.
        volume: u64,
    },
    /// Stored weight or volume disagrees with the packed lines.
    CartonLoadMismatch {
        /// Carton ID.
        carton_id: u32,
    },
    /// A tour carries more cartons than the cart holds.
    CartLimitExceeded {
        /// Tour ID.
        tour_id: u32,
        /// Cartons in the tour.
        cartons: usize,
        /// Cart limit K.
        limit: usize,
    },
    /// A carton was emitted without any product.
    EmptyCarton {
        /// Carton ID.
        carton_id: u32,
    },
    /// A carton belongs to an order the instance does not define.
    UnknownOrder {
        /// Carton ID.
        carton_id: u32,
        /// Order ID referenced by the carton.
        order_id: u32,
    },
    /// A carton holds a product the instance does not define.
    UnknownProduct {
        /// Carton ID.
        carton_id: u32,
        /// Product ID.
        product_id: u32,
    },
    /// A carton holds a product its order does not require.
    ProductNotInOrder {
        /// Carton ID.
        carton_id: u32,
        /// Product ID.
        product_id: u32,
    },
    /// More units were picked than the order requires.
    OverPicked {
        /// Order ID.
        order_id: u32,
        /// Product ID.
        product_id: u32,
        /// Units picked across all cartons.
        picked: u64,
        /// Units required.
        required: u64,
    },
    /// Fewer units were picked than the order requires.
    UnderPicked {
        /// Order ID.
        order_id: u32,
        /// Product ID.
        product_id: u32,
        /// Units picked across all cartons.
        picked: u64,
        /// Units required.
        required: u64,
    },
    /// Reported carton count of an order disagrees with the tours.
    BoxCountMismatch {
        /// Order ID.
        order_id: u32,
        /// Count reported in the result.
        reported: usize,
        /// Count found in the tours.
        actual: usize,
    },
    /// Tour IDs are not 1, 2, 3, ...
    NonSequentialTourId {
        /// Position of the tour in the result.
        position: usize,
        /// Tour ID found.
        tour_id: u32,
    },
}

/// A constraint violation in a run result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// One picking tour: the cartons filled between the two depots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    id: u32,
    cartons: Vec<Carton>,
    distance: u64,
    crossed_locations: u64,
}

impl Tour {
    /// Creates a tour.
    pub fn new(id: u32, cartons: Vec<Carton>, distance: u64, crossed_locations: u64) -> Self {
        Self {
            id,
            cartons,
            distance,
            crossed_locations,
        }
    }

    /// Tour ID (sequential from 1 over emitted tours).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Cartons filled during the tour, in opening order.
    pub fn cartons(&self) -> &[Carton] {
        &self.cartons
    }

    /// Travelled distance of the tour.
    pub fn distance(&self) -> u64 {
        self.distance
    }

    /// Locations crossed during the tour.
    pub fn crossed_locations(&self) -> u64 {
        self.crossed_locations
    }
}

/// Total number of cartons used by one order over the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBoxes {
    /// Order ID.
    pub order_id: u32,
    /// Cartons emitted for the order.
    pub boxes: usize,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Every order's demand was picked.
    Completed,
    /// Some demand remained but no order could make progress.
    NoActivatableOrder,
}

/// Result of a complete run.
///
/// # Examples
///
/// ```
/// use u_picking::models::{RunResult, Termination};
///
/// let result = RunResult::new(vec![], vec![], 0, 0, (0, 0), Termination::Completed, vec![]);
/// assert!(result.is_complete());
/// assert_eq!(result.num_tours(), 0);
/// assert_eq!(result.num_cartons(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    travelled_distance: u64,
    crossed_locations: u64,
    avg_weight: u32,
    avg_volume: u32,
    tours: Vec<Tour>,
    orders: Vec<OrderBoxes>,
    termination: Termination,
    incomplete_orders: Vec<u32>,
}

impl RunResult {
    /// Assembles a run result. `fill` is the `(weight, volume)` average fill
    /// percentage pair.
    pub fn new(
        tours: Vec<Tour>,
        orders: Vec<OrderBoxes>,
        travelled_distance: u64,
        crossed_locations: u64,
        fill: (u32, u32),
        termination: Termination,
        incomplete_orders: Vec<u32>,
    ) -> Self {
        Self {
            travelled_distance,
            crossed_locations,
            avg_weight: fill.0,
            avg_volume: fill.1,
            tours,
            orders,
            termination,
            incomplete_orders,
        }
    }

    /// Total travelled distance over all tours.
    pub fn travelled_distance(&self) -> u64 {
        self.travelled_distance
    }

    /// Total crossed locations over all tours.
    pub fn crossed_locations(&self) -> u64 {
        self.crossed_locations
    }

    /// Average carton weight fill, in percent of capacity.
    pub fn avg_weight(&self) -> u32 {
        self.avg_weight
    }

    /// Average carton volume fill, in percent of capacity.
    pub fn avg_volume(&self) -> u32 {
        self.avg_volume
    }

    /// Emitted tours.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Per-order carton totals, ascending by order ID.
    pub fn orders(&self) -> &[OrderBoxes] {
        &self.orders
    }

    /// Why the run stopped.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Orders with demand left when the run stopped.
    pub fn incomplete_orders(&self) -> &[u32] {
        &self.incomplete_orders
    }

    /// Returns `true` if every order was fully picked.
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }

    /// Number of emitted tours.
    pub fn num_tours(&self) -> usize {
        self.tours.len()
    }

    /// Number of emitted cartons over all tours.
    pub fn num_cartons(&self) -> usize {
        self.tours.iter().map(|t| t.cartons().len()).sum()
    }

    /// Iterates over every emitted carton, tour by tour.
    pub fn cartons(&self) -> impl Iterator<Item = &Carton> {
        self.tours.iter().flat_map(|t| t.cartons().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    #[test]
    fn test_result_counts() {
        let p = Product::new(1, 1, 1, 1);
        let mut a = Carton::new(1, 1);
        a.add(&p, 2);
        let mut b = Carton::new(3, 1);
        b.add(&p, 1);
        let tours = vec![
            Tour::new(1, vec![a], 10, 3),
            Tour::new(2, vec![b], 12, 2),
        ];
        let result = RunResult::new(
            tours,
            vec![OrderBoxes {
                order_id: 1,
                boxes: 2,
            }],
            22,
            5,
            (30, 30),
            Termination::Completed,
            vec![],
        );
        assert_eq!(result.num_tours(), 2);
        assert_eq!(result.num_cartons(), 2);
        assert_eq!(result.cartons().map(Carton::id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(result.travelled_distance(), 22);
        assert!(result.is_complete());
    }

    #[test]
    fn test_incomplete_result() {
        let result = RunResult::new(
            vec![],
            vec![],
            0,
            0,
            (0, 0),
            Termination::NoActivatableOrder,
            vec![4],
        );
        assert!(!result.is_complete());
        assert_eq!(result.incomplete_orders(), &[4]);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::EmptyCarton { carton_id: 2 });
        assert_eq!(v.kind, ViolationType::EmptyCarton { carton_id: 2 });
    }
}
