//! Artificial Bee Colony optimizer for closed geographic tours.
//!
//! Given a fixed origin and a set of destination locations, finds a short
//! round trip that leaves the origin, visits every location exactly once
//! and returns. Distances are great-circle (haversine) kilometers.
//!
//! - **Geo** ([`geo`]): coordinates, locations, bounding boxes, haversine
//!   distance.
//! - **Tour** ([`tour`]): round-trip distance and fitness of a visiting
//!   order, plus permutation moves.
//! - **Bee colony** ([`abc`]): colony initialization, the per-generation
//!   employed/onlooker/scout phases, and a driver with iteration budget and
//!   stagnation window.
//!
//! # Architecture
//!
//! The colony is a plain value. [`abc::initialize`] builds one and
//! [`abc::step`] maps a colony to the next generation without touching its
//! input, so callers can drive the search from a timer, a loop, or a UI
//! tick. All randomness comes from an `Rng` passed in by the caller.
//!
//! # Features
//!
//! - `serde`: serialization of locations and colony state
//! - `parallel`: multi-start runs on the rayon thread pool
//! - `wasm`: a `wasm-bindgen` facade for browser front-ends

pub mod abc;
pub mod error;
pub mod geo;
pub mod random;
pub mod tour;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{AbcError, Result};
