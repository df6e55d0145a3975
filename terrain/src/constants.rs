//! Physical constants and unit factors.
//!
//! Lengths are carried in feet and distances in statute miles
//! throughout the workspace.

/// Feet per statute mile.
pub const FEET_PER_MILE: f64 = 5_280.0;

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1_609.344;

/// Mean earth radius in meters, matching `geo`'s haversine routines.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Mean earth radius in miles.
pub const MEAN_EARTH_RADIUS_MI: f64 = MEAN_EARTH_RADIUS_M / METERS_PER_MILE;

/// Default earth radius, in feet, for line-of-sight geometry.
pub const EARTH_RADIUS_FT: f64 = 20_902_230.97;
