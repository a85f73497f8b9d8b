//! Demand tracking and carton packing.
//!
//! - [`DemandTracker`]: remaining quantity per product of one order
//! - [`Cart`]: cartons open during one tour, bounded by the cart limit K
//! - [`CartonPacker`]: first-fit placement under weight and volume capacity

mod cart;
mod demand;
mod packer;

pub use cart::{Cart, CartonIds};
pub use demand::DemandTracker;
pub use packer::CartonPacker;
