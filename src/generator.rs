//! Seeded random instances.
//!
//! Locations are scattered on a grid and the shortest-path table holds the
//! Manhattan distance of every pair, so generated instances are always
//! fully connected.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{
    Arc, CartonCapacity, DeclaredCounts, Instance, Location, Order, Product, ShortestPath,
};

/// Parameters of a generated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of orders.
    pub orders: usize,
    /// Number of products.
    pub products: usize,
    /// Number of locations, depots included (at least 3).
    pub locations: usize,
    /// Cartons per cart.
    pub cart_limit: usize,
    /// Carton capacity.
    pub capacity: CartonCapacity,
    /// Allow orders to share a cart.
    pub mixed: bool,
    /// Side of the square grid locations are drawn from.
    pub grid: i64,
    /// Most product lines per order.
    pub max_lines: usize,
    /// Largest quantity per product line.
    pub max_quantity: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            orders: 10,
            products: 20,
            locations: 30,
            cart_limit: 6,
            capacity: CartonCapacity::new(500, 1000),
            mixed: false,
            grid: 50,
            max_lines: 4,
            max_quantity: 10,
        }
    }
}

/// Random instance generator, reproducible for a given seed.
///
/// # Examples
///
/// ```
/// use u_picking::generator::{GeneratorConfig, InstanceGenerator};
///
/// let config = GeneratorConfig { orders: 5, ..GeneratorConfig::default() };
/// let a = InstanceGenerator::new(config, 7).generate();
/// let b = InstanceGenerator::new(config, 7).generate();
/// assert_eq!(a.orders(), b.orders());
/// assert_eq!(a.orders().len(), 5);
/// ```
pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: SmallRng,
}

impl InstanceGenerator {
    /// Creates a generator seeded with `seed`.
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws a new instance. Departing depot is location 0, arrival depot is
    /// location 1; products sit on the remaining locations.
    pub fn generate(&mut self) -> Instance {
        let n_locations = self.config.locations.max(3) as u32;
        let n_products = self.config.products.max(1) as u32;
        let grid = self.config.grid.max(1);
        let capacity = self.config.capacity;

        let locations: Vec<Location> = (0..n_locations)
            .map(|id| Location {
                id,
                x: self.rng.random_range(0..=grid),
                y: self.rng.random_range(0..=grid),
                name: match id {
                    0 => "departure".to_string(),
                    1 => "arrival".to_string(),
                    _ => format!("L{id}"),
                },
            })
            .collect();

        let max_weight = (capacity.weight / 10).max(1);
        let max_volume = (capacity.volume / 10).max(1);
        let products: Vec<Product> = (1..=n_products)
            .map(|id| {
                Product::new(
                    id,
                    self.rng.random_range(2..n_locations),
                    self.rng.random_range(1..=max_weight),
                    self.rng.random_range(1..=max_volume),
                )
            })
            .collect();

        let orders: Vec<Order> = (1..=self.config.orders as u32)
            .map(|id| {
                let lines = self.rng.random_range(1..=self.config.max_lines.max(1));
                let demand: Vec<(u32, u64)> = (0..lines)
                    .map(|_| {
                        (
                            self.rng.random_range(1..=n_products),
                            self.rng.random_range(1..=self.config.max_quantity.max(1)),
                        )
                    })
                    .collect();
                let max_boxes = self.rng.random_range(1..=self.config.cart_limit.max(1)) as u32;
                Order::new(id, max_boxes, demand)
            })
            .collect();

        let mut paths = Vec::new();
        for a in &locations {
            for b in locations.iter().filter(|b| b.id > a.id) {
                paths.push(ShortestPath {
                    from: a.id,
                    to: b.id,
                    distance: manhattan(a, b),
                });
            }
        }
        let arcs: Vec<Arc> = locations
            .windows(2)
            .map(|w| Arc {
                from: w[0].id,
                to: w[1].id,
                distance: manhattan(&w[0], &w[1]),
            })
            .collect();

        let declared = DeclaredCounts {
            locations: Some(n_locations),
            products: Some(n_products),
            orders: Some(orders.len() as u32),
            dimensions: Some(2),
            intersections: Some(0),
        };

        Instance::new(products, orders, self.config.cart_limit.max(1), capacity, 0, 1)
            .with_mixed_orders(self.config.mixed)
            .with_arcs(arcs)
            .with_shortest_paths(paths)
            .with_locations(locations)
            .with_declared(declared)
    }
}

fn manhattan(a: &Location, b: &Location) -> u64 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
