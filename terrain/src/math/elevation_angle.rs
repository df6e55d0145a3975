use num_traits::{Float, FloatConst};

/// Returns the up/down angle (in radians) from a to b.
///
/// Elevations and distance share the unit of `earth_radius`.
pub fn elevation_angle<T>(start_elev: T, distance: T, end_elev: T, earth_radius: T) -> T
where
    T: Float + FloatConst,
{
    let a = distance;
    let b = start_elev + earth_radius;
    let c = end_elev + earth_radius;
    let inner = {
        let inner = (a.powi(2) + b.powi(2) - c.powi(2)) / ((T::one() + T::one()) * a * b);
        if inner < -T::one() {
            -T::one()
        } else if inner > T::one() {
            T::one()
        } else {
            inner
        }
    };
    inner.acos() - T::FRAC_PI_2()
}

#[cfg(test)]
mod tests {
    use super::elevation_angle;
    use crate::constants::{EARTH_RADIUS_FT, FEET_PER_MILE};
    use approx::assert_relative_eq;

    #[test]
    fn test_elevation_angle() {
        assert_relative_eq!(
            0.100_167_399_668_548_82,
            elevation_angle(1.0, 1.0, 1.1, EARTH_RADIUS_FT),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_level_sites_look_down() {
        // Over a smooth sphere a site at equal height sits below the
        // local horizontal by half the subtended angle.
        let distance = 10.0 * FEET_PER_MILE;
        let angle = elevation_angle(0.0, distance, 0.0, EARTH_RADIUS_FT);
        assert_relative_eq!(
            -(distance / (2.0 * EARTH_RADIUS_FT)),
            angle,
            max_relative = 1e-6
        );
    }
}
