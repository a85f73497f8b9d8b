//! Domain model types for warehouse order picking.
//!
//! Provides the reference data of an instance (products, orders, carton
//! capacity, facility graph), the cartons filled during picking, and the
//! tours and run result produced by the tour builder.

mod carton;
mod instance;
mod order;
mod product;
mod solution;

pub use carton::{Carton, CartonCapacity, CartonLine};
pub use instance::{Arc, DeclaredCounts, Instance, Location, ShortestPath};
pub use order::Order;
pub use product::Product;
pub use solution::{OrderBoxes, RunResult, Termination, Tour, Violation, ViolationType};
