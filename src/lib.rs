//! # u-picking
//!
//! Warehouse order picking: builds picker tours that collect every order's
//! products into capacity-limited cartons carried on a cart.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (Product, Order, Instance, Carton, Tour, RunResult)
//! - [`distance`]: Shortest-path lookup and completion from facility arcs
//! - [`packing`]: Remaining demand, cart budget and carton filling
//! - [`constructive`]: Greedy tour construction (order activation, nearest product)
//! - [`evaluation`]: Solution validation
//! - [`io`]: Instance and solution text formats, CLI, logging
//! - [`batch`]: Multi-instance runs with the external checker
//! - [`generator`]: Seeded random instances

use std::time::Instant;

use once_cell::sync::Lazy;

pub mod batch;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod io;
pub mod models;
pub mod packing;

pub static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
