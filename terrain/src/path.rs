use crate::{ElevationSource, TerrainError};
use geo::{
    algorithm::HaversineDistance,
    geometry::{Coord, Point},
};

/// One terrain sample along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSample {
    /// Distance from the start of the path (miles).
    pub distance_mi: f64,

    /// Ground elevation (feet above sea level).
    pub elevation_ft: f64,

    pub lat: f64,

    pub lon: f64,
}

impl PathSample {
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Terrain samples ordered by distance from the start of a path.
///
/// A `Path` always holds at least two samples and its distances never
/// decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    samples: Box<[PathSample]>,
}

impl Path {
    pub fn new(samples: Vec<PathSample>) -> Result<Self, TerrainError> {
        if samples.len() < 2 {
            return Err(TerrainError::PathTooShort(samples.len()));
        }
        if !samples[0].distance_mi.is_finite() {
            return Err(TerrainError::PathOrder(0));
        }
        // `!(b >= a)` also catches NaN.
        if let Some(idx) = samples
            .windows(2)
            .position(|pair| !(pair[1].distance_mi >= pair[0].distance_mi))
        {
            return Err(TerrainError::PathOrder(idx + 1));
        }
        if !samples[samples.len() - 1].distance_mi.is_finite() {
            return Err(TerrainError::PathOrder(samples.len() - 1));
        }
        Ok(Self {
            samples: samples.into_boxed_slice(),
        })
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    pub fn first(&self) -> &PathSample {
        &self.samples[0]
    }

    pub fn last(&self) -> &PathSample {
        &self.samples[self.samples.len() - 1]
    }

    /// Total path distance (miles).
    pub fn distance_mi(&self) -> f64 {
        self.last().distance_mi
    }
}

/// Looks up the elevation of the sample nearest to `coord`.
impl ElevationSource for Path {
    fn elevation(&self, coord: Coord<f64>) -> Result<f64, TerrainError> {
        let target = Point::from(coord);
        let distance = |sample: &PathSample| {
            Point::from(sample.coord()).haversine_distance(&target)
        };
        let first = self.first();
        let (_, nearest) = self.samples[1..].iter().fold(
            (distance(first), first),
            |(best_m, best), sample| {
                let meters = distance(sample);
                if meters < best_m {
                    (meters, sample)
                } else {
                    (best_m, best)
                }
            },
        );
        Ok(nearest.elevation_ft)
    }
}
