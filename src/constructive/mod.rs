//! Greedy tour construction for order picking.
//!
//! - [`ActivationPolicy`]: which orders share the cart during a tour
//! - [`TourPlanner`]: one tour: nearest placeable product first, first-fit packing
//! - [`RunController`] / [`solve`]: tours until every order is picked

mod activation;
mod controller;
mod planner;

pub use activation::ActivationPolicy;
pub use controller::{average_fill, solve, RunController};
pub use planner::{TourOutcome, TourPlanner};
