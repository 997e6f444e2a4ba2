//! Geographic primitives.
//!
//! - [`Coordinate`]: a latitude/longitude pair in degrees
//! - [`Location`]: a named destination
//! - [`BoundingBox`]: min/max extent of a coordinate set
//! - [`haversine_km`]: great-circle distance in kilometers

mod distance;
mod types;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use types::{BoundingBox, Coordinate, Location};
