use crate::constants::METERS_PER_MILE;
use geo::{
    algorithm::{Bearing, HaversineDistance},
    geometry::{Coord, Point},
};

/// A named radio site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Display name.
    pub name: String,

    /// Location, where `x` is longitude and `y` is latitude (decimal
    /// degrees, east and north positive).
    pub coord: Coord<f64>,

    /// Antenna height above local terrain (feet).
    pub alt_ft: f64,
}

impl Site {
    pub fn new(name: impl Into<String>, coord: Coord<f64>, alt_ft: f64) -> Self {
        Self {
            name: name.into(),
            coord,
            alt_ft,
        }
    }

    /// Returns an unnamed site `alt_ft` feet above the ground at `coord`.
    pub fn point(coord: Coord<f64>, alt_ft: f64) -> Self {
        Self::new(String::new(), coord, alt_ft)
    }

    /// Great circle distance (miles) from this site to `coord`.
    pub fn distance_mi(&self, coord: Coord<f64>) -> f64 {
        Point::from(self.coord).haversine_distance(&Point::from(coord)) / METERS_PER_MILE
    }

    /// Initial great circle bearing (degrees clockwise from true
    /// north, within `[0, 360)`) from this site to `coord`.
    pub fn azimuth(&self, coord: Coord<f64>) -> f64 {
        Point::from(self.coord)
            .bearing(Point::from(coord))
            .rem_euclid(360.0)
    }
}
