use crate::ProfileSample;

/// Linear trend removed from height profiles.
///
/// The ramp runs from the receiver's antenna (ground elevation plus
/// antenna height) at distance 0 to the transmitter's antenna at the
/// far end of the path. Adding it to a height profile referenced to the
/// line of sight expresses the profile relative to a detrended
/// baseline instead of the raw chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// Feet per mile.
    pub slope: f64,

    /// Feet.
    pub intercept: f64,
}

impl Ramp {
    pub fn new(
        rx_ground_ft: f64,
        rx_alt_ft: f64,
        tx_ground_ft: f64,
        tx_alt_ft: f64,
        distance_mi: f64,
    ) -> Self {
        let intercept = -rx_alt_ft - rx_ground_ft;
        let slope = if distance_mi > 0.0 {
            (-tx_alt_ft - tx_ground_ft - intercept) / distance_mi
        } else {
            0.0
        };
        Self { slope, intercept }
    }

    /// Ramp value (feet) at `distance_mi` along the path.
    pub fn at(&self, distance_mi: f64) -> f64 {
        -(self.slope * distance_mi) - self.intercept
    }

    /// Adds the ramp to every height-like value of `sample` and
    /// returns the amount added.
    pub fn apply(&self, sample: &mut ProfileSample) -> f64 {
        let r = self.at(sample.distance_mi);
        shift(sample, r);
        r
    }

    /// Undoes [`Ramp::apply`].
    pub fn remove(&self, sample: &mut ProfileSample) -> f64 {
        let r = self.at(sample.distance_mi);
        shift(sample, -r);
        r
    }
}

fn shift(sample: &mut ProfileSample, by: f64) {
    for value in [
        &mut sample.height_ft,
        &mut sample.fresnel_ft,
        &mut sample.fresnel_clearance_ft,
    ]
    .into_iter()
    .flatten()
    {
        *value += by;
    }
}

#[cfg(test)]
mod tests {
    use super::Ramp;
    use crate::ProfileSample;
    use approx::assert_relative_eq;

    #[test]
    fn test_ramp_spans_antennas() {
        let ramp = Ramp::new(1200.0, 30.0, 800.0, 100.0, 12.5);
        assert_relative_eq!(ramp.at(0.0), 1230.0);
        assert_relative_eq!(ramp.at(12.5), 900.0, epsilon = 1e-9);
        assert_relative_eq!(ramp.at(6.25), 1065.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_length_path() {
        let ramp = Ramp::new(10.0, 5.0, 20.0, 5.0, 0.0);
        assert_eq!(ramp.slope, 0.0);
        assert_relative_eq!(ramp.at(0.0), 15.0);
    }

    #[test]
    fn test_apply_then_remove() {
        let ramp = Ramp::new(350.0, 40.0, 120.0, 60.0, 8.0);
        let original = ProfileSample {
            distance_mi: 3.0,
            height_ft: Some(-12.5),
            fresnel_ft: Some(-40.0),
            fresnel_clearance_ft: Some(-24.0),
            curvature_ft: Some(-300.0),
            ..Default::default()
        };

        let mut sample = original.clone();
        let r = ramp.apply(&mut sample);
        assert_relative_eq!(r, ramp.at(3.0));
        assert_relative_eq!(sample.height_ft.unwrap(), -12.5 + r);
        assert_relative_eq!(sample.fresnel_ft.unwrap(), -40.0 + r);
        assert_relative_eq!(sample.fresnel_clearance_ft.unwrap(), -24.0 + r);
        // Curvature and unset values are left alone.
        assert_eq!(sample.curvature_ft, Some(-300.0));
        assert_eq!(sample.angle_deg, None);

        ramp.remove(&mut sample);
        assert_relative_eq!(sample.height_ft.unwrap(), -12.5, epsilon = 1e-9);
        assert_relative_eq!(sample.fresnel_ft.unwrap(), -40.0, epsilon = 1e-9);
        assert_relative_eq!(sample.fresnel_clearance_ft.unwrap(), -24.0, epsilon = 1e-9);
    }
}
