//! Reference data sources.

mod us_geo;

pub use us_geo::{Location, PLACES, Place, random_location};
