//! Remaining demand of one order.

use std::collections::BTreeMap;

use crate::models::Order;

/// Remaining quantity per product for one order.
///
/// Initialized from the order and only ever decreased by successful
/// placements. An order is done once nothing remains.
///
/// # Examples
///
/// ```
/// use u_picking::models::Order;
/// use u_picking::packing::DemandTracker;
///
/// let mut tracker = DemandTracker::new(&Order::new(1, 1, [(5, 3)]));
/// assert!(!tracker.is_done());
/// tracker.decrement(5, 3);
/// assert_eq!(tracker.remaining(5), 0);
/// assert!(tracker.is_done());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandTracker {
    order_id: u32,
    remaining: BTreeMap<u32, u64>,
}

impl DemandTracker {
    /// Starts tracking the full demand of `order`.
    pub fn new(order: &Order) -> Self {
        Self {
            order_id: order.id(),
            remaining: order.demand().clone(),
        }
    }

    /// Tracked order ID.
    pub fn order_id(&self) -> u32 {
        self.order_id
    }

    /// Remaining quantity of a product (0 if the order does not contain it).
    pub fn remaining(&self, product_id: u32) -> u64 {
        self.remaining.get(&product_id).copied().unwrap_or(0)
    }

    /// Removes `quantity` units of a product from the remaining demand.
    ///
    /// `quantity` must not exceed the remaining quantity.
    pub fn decrement(&mut self, product_id: u32, quantity: u64) {
        let left = self.remaining.entry(product_id).or_insert(0);
        debug_assert!(
            quantity <= *left,
            "order {}: placed {quantity} units of product {product_id} with only {left} remaining",
            self.order_id
        );
        *left = left.saturating_sub(quantity);
    }

    /// Returns `true` if no product has remaining quantity.
    pub fn is_done(&self) -> bool {
        self.remaining.values().all(|&q| q == 0)
    }

    /// Products with positive remaining quantity, ascending by ID.
    pub fn needed_products(&self) -> impl Iterator<Item = u32> + '_ {
        self.remaining
            .iter()
            .filter(|(_, &q)| q > 0)
            .map(|(&pid, _)| pid)
    }

    /// Sum of all remaining quantities.
    pub fn remaining_units(&self) -> u64 {
        self.remaining.values().sum()
    }
}
