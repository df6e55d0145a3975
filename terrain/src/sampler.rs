use crate::{math::HaversineIter, Path, PathSample, Site, TerrainError};
use geo::geometry::{Coord, Point};
use log::debug;

/// Ground elevation lookup.
pub trait ElevationSource {
    /// Returns the ground elevation (feet above sea level) at `coord`.
    fn elevation(&self, coord: Coord<f64>) -> Result<f64, TerrainError>;
}

impl<E: ElevationSource + ?Sized> ElevationSource for &E {
    fn elevation(&self, coord: Coord<f64>) -> Result<f64, TerrainError> {
        (**self).elevation(coord)
    }
}

/// Terrain of constant elevation (feet above sea level).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Flat(pub f64);

impl ElevationSource for Flat {
    fn elevation(&self, _coord: Coord<f64>) -> Result<f64, TerrainError> {
        Ok(self.0)
    }
}

/// Produces terrain paths between two sites.
pub trait PathSampler {
    /// Returns the path starting at `from` and ending at `to`.
    fn read_path(&self, from: &Site, to: &Site) -> Result<Path, TerrainError>;
}

/// Samples terrain along the great circle between two sites.
#[derive(Debug, Clone)]
pub struct GreatCircleSampler<E> {
    source: E,

    /// Maximum distance between samples (miles).
    max_step_mi: f64,
}

impl<E> GreatCircleSampler<E> {
    pub fn new(source: E, max_step_mi: f64) -> Result<Self, TerrainError> {
        if max_step_mi > 0.0 && max_step_mi.is_finite() {
            Ok(Self {
                source,
                max_step_mi,
            })
        } else {
            Err(TerrainError::Step(max_step_mi))
        }
    }

    pub fn source(&self) -> &E {
        &self.source
    }
}

impl<E: ElevationSource> PathSampler for GreatCircleSampler<E> {
    fn read_path(&self, from: &Site, to: &Site) -> Result<Path, TerrainError> {
        if from.distance_mi(to.coord) == 0.0 {
            return Err(TerrainError::Coincident);
        }

        let now = std::time::Instant::now();
        let great_circle = HaversineIter::new(
            Point::from(from.coord),
            self.max_step_mi,
            Point::from(to.coord),
        );
        let step_size_mi = great_circle.step_size_mi();
        let mut samples = Vec::with_capacity(great_circle.len());
        for (idx, point) in great_circle.enumerate() {
            let coord = point.0;
            #[allow(clippy::cast_precision_loss)]
            samples.push(PathSample {
                distance_mi: step_size_mi * idx as f64,
                elevation_ft: self.source.elevation(coord)?,
                lat: coord.y,
                lon: coord.x,
            });
        }

        debug!(
            "path; len: {}, step: {step_size_mi} mi, exec: {:?}",
            samples.len(),
            now.elapsed()
        );

        Path::new(samples)
    }
}
