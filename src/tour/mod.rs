//! Closed-tour evaluation and permutation moves.
//!
//! A tour is a permutation of location indices visited between two stops
//! at a shared origin: `origin -> tour[0] -> ... -> tour[n-1] -> origin`.
//!
//! - [`TourEvaluator`]: round-trip distance and fitness of a tour
//! - [`operators`]: random tours, the 3-cycle neighbor move, validity check

mod evaluator;
pub mod operators;

pub use evaluator::{fitness_from_distance, TourEvaluator, MIN_DISTANCE, SENTINEL_DISTANCE};
