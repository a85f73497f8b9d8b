//! Picking problem instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{CartonCapacity, Order, Product};

/// A named point of the facility with planar coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location ID.
    pub id: u32,
    /// X-coordinate.
    pub x: i64,
    /// Y-coordinate.
    pub y: i64,
    /// Display name.
    pub name: String,
}

/// A direct, undirected connection between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arc {
    /// First endpoint.
    pub from: u32,
    /// Second endpoint.
    pub to: u32,
    /// Length of the arc.
    pub distance: u64,
}

/// One entry of the all-pairs shortest-path table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// First location.
    pub from: u32,
    /// Second location.
    pub to: u32,
    /// Shortest-path distance between them.
    pub distance: u64,
}

/// Counts declared in the instance header, as opposed to parsed rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclaredCounts {
    /// `//NbLocations`.
    pub locations: Option<u32>,
    /// `//NbProducts`.
    pub products: Option<u32>,
    /// `//NbOrders`.
    pub orders: Option<u32>,
    /// `//NbDimensionsCapacity`.
    pub dimensions: Option<u32>,
    /// `//NbVerticesIntersections`.
    pub intersections: Option<u32>,
}

/// A complete picking instance: products, orders, cart and carton limits,
/// depots and the facility graph.
///
/// # Examples
///
/// ```
/// use u_picking::models::{CartonCapacity, Instance, Order, Product, ShortestPath};
///
/// let instance = Instance::new(
///     vec![Product::new(1, 10, 1, 1)],
///     vec![Order::new(1, 1, [(1, 2)])],
///     6,
///     CartonCapacity::new(10, 10),
///     0,
///     0,
/// )
/// .with_shortest_paths(vec![ShortestPath { from: 0, to: 10, distance: 4 }]);
///
/// assert_eq!(instance.cart_limit(), 6);
/// assert_eq!(instance.product(1).map(|p| p.location()), Some(10));
/// assert!(instance.product(2).is_none());
/// assert!(!instance.mixed_orders());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    products: Vec<Product>,
    product_index: HashMap<u32, usize>,
    orders: Vec<Order>,
    order_index: HashMap<u32, usize>,
    cart_limit: usize,
    capacity: CartonCapacity,
    mixed_orders: bool,
    departing_depot: u32,
    arrival_depot: u32,
    arcs: Vec<Arc>,
    shortest_paths: Vec<ShortestPath>,
    locations: Vec<Location>,
    declared: DeclaredCounts,
}

impl Instance {
    /// Creates an instance without graph data and with mixed orders disabled.
    pub fn new(
        products: Vec<Product>,
        orders: Vec<Order>,
        cart_limit: usize,
        capacity: CartonCapacity,
        departing_depot: u32,
        arrival_depot: u32,
    ) -> Self {
        let product_index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id(), i))
            .collect();
        let mut order_index = HashMap::new();
        for (i, o) in orders.iter().enumerate() {
            order_index.entry(o.id()).or_insert(i);
        }
        Self {
            products,
            product_index,
            orders,
            order_index,
            cart_limit,
            capacity,
            mixed_orders: false,
            departing_depot,
            arrival_depot,
            arcs: Vec::new(),
            shortest_paths: Vec::new(),
            locations: Vec::new(),
            declared: DeclaredCounts::default(),
        }
    }

    /// Allows orders to share one cart during a tour.
    pub fn with_mixed_orders(mut self, mixed: bool) -> Self {
        self.mixed_orders = mixed;
        self
    }

    /// Sets the shortest-path table.
    pub fn with_shortest_paths(mut self, paths: Vec<ShortestPath>) -> Self {
        self.shortest_paths = paths;
        self
    }

    /// Sets the facility arcs.
    pub fn with_arcs(mut self, arcs: Vec<Arc>) -> Self {
        self.arcs = arcs;
        self
    }

    /// Sets the location coordinates.
    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    /// Records the header counts.
    pub fn with_declared(mut self, declared: DeclaredCounts) -> Self {
        self.declared = declared;
        self
    }

    /// All products in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by ID.
    pub fn product(&self, id: u32) -> Option<&Product> {
        self.product_index.get(&id).map(|&i| &self.products[i])
    }

    /// All orders in file order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Looks up an order by ID.
    pub fn order(&self, id: u32) -> Option<&Order> {
        self.order_index.get(&id).map(|&i| &self.orders[i])
    }

    /// Maximum number of cartons carried during one tour (K).
    pub fn cart_limit(&self) -> usize {
        self.cart_limit
    }

    /// Capacity of every carton.
    pub fn capacity(&self) -> CartonCapacity {
        self.capacity
    }

    /// Whether several orders may be picked in the same tour.
    pub fn mixed_orders(&self) -> bool {
        self.mixed_orders
    }

    /// Location where every tour starts.
    pub fn departing_depot(&self) -> u32 {
        self.departing_depot
    }

    /// Location where every tour ends.
    pub fn arrival_depot(&self) -> u32 {
        self.arrival_depot
    }

    /// Facility arcs.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Shortest-path table entries.
    pub fn shortest_paths(&self) -> &[ShortestPath] {
        &self.shortest_paths
    }

    /// Location coordinates.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Header counts as declared in the source file.
    pub fn declared(&self) -> &DeclaredCounts {
        &self.declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instance {
        Instance::new(
            vec![Product::new(4, 1, 1, 1), Product::new(2, 2, 1, 1)],
            vec![Order::new(10, 1, [(4, 1)]), Order::new(3, 1, [(2, 1)])],
            2,
            CartonCapacity::new(5, 5),
            0,
            9,
        )
    }

    #[test]
    fn test_product_lookup() {
        let inst = sample();
        assert_eq!(inst.product(2).map(Product::location), Some(2));
        assert_eq!(inst.product(4).map(Product::location), Some(1));
        assert!(inst.product(1).is_none());
    }

    #[test]
    fn test_order_lookup() {
        let inst = sample();
        assert_eq!(inst.order(3).map(Order::total_units), Some(1));
        assert!(inst.order(7).is_none());
    }

    #[test]
    fn test_order_lookup_first_duplicate_wins() {
        let inst = Instance::new(
            vec![],
            vec![
                Order::new(5, 1, [(1, 2)]),
                Order::new(6, 1, [(1, 1)]),
                Order::new(5, 3, [(2, 9)]),
            ],
            1,
            CartonCapacity::new(1, 1),
            0,
            0,
        );
        assert_eq!(inst.order(5).map(Order::max_boxes), Some(1));
        assert_eq!(inst.order(6).map(Order::total_units), Some(1));
    }

    #[test]
    fn test_builder() {
        let inst = sample()
            .with_mixed_orders(true)
            .with_arcs(vec![Arc { from: 0, to: 1, distance: 3 }]);
        assert!(inst.mixed_orders());
        assert_eq!(inst.arcs().len(), 1);
        assert_eq!(inst.departing_depot(), 0);
        assert_eq!(inst.arrival_depot(), 9);
    }
}
