//! Shortest-path distances between facility locations.
//!
//! Provides a sparse, symmetric distance index built from the instance's
//! shortest-path table, and an optional completion step over the facility
//! arcs for pairs the table leaves out.

mod completion;
mod index;

pub use completion::complete_from_arcs;
pub use index::{DistanceIndex, UnknownDistance};
