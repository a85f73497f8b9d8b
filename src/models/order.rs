//! Customer order type.

use std::collections::BTreeMap;

/// A customer order: the quantity required for each product.
///
/// Duplicate product lines are summed on construction.
///
/// # Examples
///
/// ```
/// use u_picking::models::Order;
///
/// let order = Order::new(7, 2, [(1, 3), (4, 1), (1, 2)]);
/// assert_eq!(order.id(), 7);
/// assert_eq!(order.quantity(1), 5);
/// assert_eq!(order.quantity(4), 1);
/// assert_eq!(order.quantity(9), 0);
/// assert_eq!(order.total_units(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: u32,
    max_boxes: u32,
    demand: BTreeMap<u32, u64>,
}

impl Order {
    /// Creates an order from `(product_id, quantity)` lines.
    ///
    /// `max_boxes` is the bound declared by the instance file. It is kept for
    /// reporting only; the tour builder does not enforce it.
    pub fn new(id: u32, max_boxes: u32, lines: impl IntoIterator<Item = (u32, u64)>) -> Self {
        let mut demand = BTreeMap::new();
        for (product_id, quantity) in lines {
            *demand.entry(product_id).or_insert(0) += quantity;
        }
        Self {
            id,
            max_boxes,
            demand,
        }
    }

    /// Order ID.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Box bound declared in the instance file.
    pub fn max_boxes(&self) -> u32 {
        self.max_boxes
    }

    /// Required quantity per product, in ascending product ID order.
    pub fn demand(&self) -> &BTreeMap<u32, u64> {
        &self.demand
    }

    /// Required quantity of a product (0 if the order does not contain it).
    pub fn quantity(&self, product_id: u32) -> u64 {
        self.demand.get(&product_id).copied().unwrap_or(0)
    }

    /// Sum of all required quantities.
    pub fn total_units(&self) -> u64 {
        self.demand.values().sum()
    }
}
