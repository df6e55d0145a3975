use crate::{constants::FEET_PER_MILE, math::elevation_angle, ElevationSource, Site, TerrainError};
use geo::geometry::Coord;

/// Line-of-sight elevation angle between two sites.
pub trait ElevationAngle {
    /// Returns the angle (degrees) of `target` as seen from
    /// `observer`, positive above and negative below the observer's
    /// local horizontal.
    fn elevation_angle(&self, observer: &Site, target: &Site) -> Result<f64, TerrainError>;
}

/// A smooth sphere of radius `radius_ft` with terrain from `source`
/// on top of it.
#[derive(Debug, Clone)]
pub struct SphericalEarth<E> {
    source: E,
    radius_ft: f64,
}

impl<E> SphericalEarth<E> {
    pub fn new(source: E, radius_ft: f64) -> Self {
        Self { source, radius_ft }
    }

    pub fn radius_ft(&self) -> f64 {
        self.radius_ft
    }
}

impl<E: ElevationSource> ElevationSource for SphericalEarth<E> {
    fn elevation(&self, coord: Coord<f64>) -> Result<f64, TerrainError> {
        self.source.elevation(coord)
    }
}

impl<E: ElevationSource> ElevationAngle for SphericalEarth<E> {
    fn elevation_angle(&self, observer: &Site, target: &Site) -> Result<f64, TerrainError> {
        let observer_ft = self.source.elevation(observer.coord)? + observer.alt_ft;
        let target_ft = self.source.elevation(target.coord)? + target.alt_ft;
        let distance_ft = FEET_PER_MILE * observer.distance_mi(target.coord);
        Ok(elevation_angle(observer_ft, distance_ft, target_ft, self.radius_ft).to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::{ElevationAngle, SphericalEarth};
    use crate::{
        constants::{EARTH_RADIUS_FT, FEET_PER_MILE},
        Flat, Site,
    };
    use approx::assert_relative_eq;
    use geo::coord;

    #[test]
    fn test_raised_target_looks_up() {
        let earth = SphericalEarth::new(Flat(100.0), EARTH_RADIUS_FT);
        let rx = Site::new("rx", coord!(x: 0.0, y: 0.0), 0.0);
        let tx = Site::new("tx", coord!(x: 0.0, y: 0.01), 1000.0);
        let up = earth.elevation_angle(&rx, &tx).unwrap();
        let down = earth.elevation_angle(&tx, &rx).unwrap();
        assert!(up > 0.0);
        assert!(down < 0.0);

        // The arc length stands in for the straight line between the
        // antennas.
        let a = rx.distance_mi(tx.coord) * FEET_PER_MILE;
        let b = EARTH_RADIUS_FT + 100.0;
        let c = EARTH_RADIUS_FT + 1100.0;
        let law_of_cosines = |near: f64, far: f64| {
            ((a * a + near * near - far * far) / (2.0 * a * near))
                .acos()
                .to_degrees()
                - 90.0
        };
        assert_relative_eq!(up, law_of_cosines(b, c), max_relative = 1e-9);
        assert_relative_eq!(down, law_of_cosines(c, b), max_relative = 1e-9);
        assert_relative_eq!(up, 15.904_344_199_301_448, max_relative = 1e-9);

        // The two nearly differ by the angle the path subtends at the
        // earth's center.
        let subtended = (a / EARTH_RADIUS_FT).to_degrees();
        assert_relative_eq!(up + down, -subtended, max_relative = 0.05);
    }
}
