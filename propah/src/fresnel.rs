//! Fresnel zone geometry.
//!
//! Per Fink and Christiansen, Electronics Engineers' Handbook, the
//! distance from the line of sight to the nth Fresnel zone boundary is
//!
//! ```text
//! H = sqrt(n * λ * d1 * (d - d1) / d)
//! ```

use num_traits::{AsPrimitive, Float};
use std::ops::RangeInclusive;

/// Wavelength (feet) of a 1 Hz signal.
const WAVELENGTH_FT_HZ: f64 = 9.8425e8;

/// Frequencies (MHz) for which Fresnel zones are plotted.
pub const FRESNEL_BAND_MHZ: RangeInclusive<f64> = 20.0..=20_000.0;

/// Returns `true` if Fresnel zones are plotted at `freq_mhz`.
pub fn in_band(freq_mhz: f64) -> bool {
    FRESNEL_BAND_MHZ.contains(&freq_mhz)
}

/// Returns the wavelength (feet) of a signal at `freq_mhz`.
pub fn wavelength_ft<T>(freq_mhz: T) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    WAVELENGTH_FT_HZ.as_() / (freq_mhz * 1e6_f64.as_())
}

/// Represents the lower nth fresnel zone of a radio link.
#[derive(Debug, Clone, Copy)]
pub struct FresnelZone<T> {
    /// Which fresnel zone we're interested in.
    zone: T,
    wavelength_ft: T,
    distance_ft: T,
}

impl<T> FresnelZone<T>
where
    T: Float + 'static,
    u8: AsPrimitive<T>,
    f64: AsPrimitive<T>,
{
    /// Returns the nth zone of a `distance_ft` long link at `freq_mhz`.
    pub fn new(zone: u8, freq_mhz: T, distance_ft: T) -> Self {
        Self {
            zone: zone.as_(),
            wavelength_ft: wavelength_ft(freq_mhz),
            distance_ft,
        }
    }

    /// Returns the zone boundary `d1_ft` feet along the link.
    ///
    /// The boundary lies below the line of sight, so the result is
    /// never positive.
    pub fn radius(&self, d1_ft: T) -> T {
        if self.distance_ft <= T::zero() {
            return T::zero();
        }
        let d2_ft = self.distance_ft - d1_ft;
        -(self.zone * self.wavelength_ft * d1_ft * d2_ft / self.distance_ft).sqrt()
    }
}
