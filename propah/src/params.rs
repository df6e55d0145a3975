use crate::{fresnel, units::Units, PropahError};
use terrain::constants::EARTH_RADIUS_FT;

/// Link and run configuration for one profile computation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkParameters {
    /// Transmitter frequency (MHz), if known.
    pub frequency_mhz: Option<f64>,

    /// Fraction of the first Fresnel zone that must stay clear.
    pub fresnel_clearance: f64,

    /// Ground clutter height (feet).
    pub clutter_ft: f64,

    /// Earth radius (feet).
    pub earth_radius_ft: f64,

    /// Unit system of emitted series and ranges.
    pub units: Units,

    /// Detrend height profiles so the line of sight is level.
    pub normalize: bool,

    /// Plot the first Fresnel zone along height profiles.
    pub fresnel_plot: bool,
}

impl LinkParameters {
    pub fn builder() -> LinkParametersBuilder {
        LinkParametersBuilder {
            params: Self::default(),
        }
    }

    /// Returns `true` if Fresnel zones are requested and the frequency
    /// is inside the band they are computed for.
    pub fn fresnel_enabled(&self) -> bool {
        self.fresnel_plot && self.frequency_mhz.is_some_and(fresnel::in_band)
    }

    pub fn has_clutter(&self) -> bool {
        self.clutter_ft > 0.0
    }
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self {
            frequency_mhz: None,
            fresnel_clearance: 0.6,
            clutter_ft: 0.0,
            earth_radius_ft: EARTH_RADIUS_FT,
            units: Units::Imperial,
            normalize: false,
            fresnel_plot: false,
        }
    }
}

pub struct LinkParametersBuilder {
    params: LinkParameters,
}

impl LinkParametersBuilder {
    /// Transmitter frequency (MHz, defaults to none).
    #[must_use]
    pub fn frequency(mut self, mhz: f64) -> Self {
        self.params.frequency_mhz = Some(mhz);
        self
    }

    /// Fresnel zone clearance fraction (defaults to 0.6).
    #[must_use]
    pub fn fresnel_clearance(mut self, fraction: f64) -> Self {
        self.params.fresnel_clearance = fraction;
        self
    }

    /// Ground clutter height (feet, defaults to 0).
    #[must_use]
    pub fn clutter(mut self, feet: f64) -> Self {
        self.params.clutter_ft = feet;
        self
    }

    /// Earth radius (feet, defaults to [`EARTH_RADIUS_FT`]).
    #[must_use]
    pub fn earth_radius(mut self, feet: f64) -> Self {
        self.params.earth_radius_ft = feet;
        self
    }

    /// Unit system of emitted values (defaults to imperial).
    #[must_use]
    pub fn units(mut self, units: Units) -> Self {
        self.params.units = units;
        self
    }

    /// Detrend height profiles (defaults to false).
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.params.normalize = normalize;
        self
    }

    /// Plot the first Fresnel zone (defaults to false; has no effect
    /// when the frequency is unknown or outside 20 to 20,000 MHz).
    #[must_use]
    pub fn fresnel_plot(mut self, plot: bool) -> Self {
        self.params.fresnel_plot = plot;
        self
    }

    pub fn build(self) -> Result<LinkParameters, PropahError> {
        let params = self.params;
        if !(params.earth_radius_ft > 0.0 && params.earth_radius_ft.is_finite()) {
            return Err(PropahError::Param("earth_radius"));
        }
        if !(params.fresnel_clearance > 0.0 && params.fresnel_clearance <= 1.0) {
            return Err(PropahError::Param("fresnel_clearance"));
        }
        if !(params.clutter_ft >= 0.0 && params.clutter_ft.is_finite()) {
            return Err(PropahError::Param("clutter"));
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::LinkParameters;
    use crate::{units::Units, PropahError};

    #[test]
    fn test_defaults() {
        let params = LinkParameters::builder().build().unwrap();
        assert_eq!(params, LinkParameters::default());
        assert_eq!(params.fresnel_clearance, 0.6);
        assert_eq!(params.units, Units::Imperial);
        assert!(!params.has_clutter());
        assert!(!params.fresnel_enabled());
    }

    #[test]
    fn test_fresnel_gating() {
        let enabled = |mhz: f64, plot: bool| {
            LinkParameters::builder()
                .frequency(mhz)
                .fresnel_plot(plot)
                .build()
                .unwrap()
                .fresnel_enabled()
        };
        assert!(enabled(900.0, true));
        assert!(enabled(20.0, true));
        assert!(enabled(20_000.0, true));
        assert!(!enabled(19.9, true));
        assert!(!enabled(24_000.0, true));
        assert!(!enabled(900.0, false));

        // Frequencies outside the band only switch the zone off.
        for mhz in [0.0, -900.0, f64::NAN] {
            assert!(!enabled(mhz, true));
        }

        let unknown = LinkParameters::builder().fresnel_plot(true).build().unwrap();
        assert!(!unknown.fresnel_enabled());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            LinkParameters::builder().earth_radius(0.0).build(),
            Err(PropahError::Param("earth_radius"))
        ));
        assert!(matches!(
            LinkParameters::builder().fresnel_clearance(1.5).build(),
            Err(PropahError::Param("fresnel_clearance"))
        ));
        assert!(matches!(
            LinkParameters::builder().clutter(-3.0).build(),
            Err(PropahError::Param("clutter"))
        ));
    }
}
