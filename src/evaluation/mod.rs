//! Validation of run results.
//!
//! Mirrors the checks of the external validator in-process: carton capacity,
//! cart limit, demand coverage and per-order carton counts.

mod checker;

pub use checker::SolutionChecker;
