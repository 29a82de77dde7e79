//! Domain types and pure functions for the station finder.
//!
//! Everything here is synchronous and free of I/O, so it can run on any
//! thread against the latest catalog snapshot.

mod distance;
mod error;
mod normalize;
mod station;

pub use distance::{EARTH_RADIUS_KM, distance_km, haversine_km};
pub use error::DistanceError;
pub use normalize::normalize;
pub use station::{Station, StationKeyword};
