//! Imperial to metric conversion.
//!
//! Profiles are computed in feet and miles; metric values are derived
//! only when series and ranges are emitted.

pub const METERS_PER_FOOT: f64 = 0.3048;

pub const KM_PER_MILE: f64 = 1.609_344;

/// Converts a length or height from feet to meters.
pub fn to_metric_length(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

/// Converts a distance from miles to kilometers.
pub fn to_metric_distance(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Unit system of emitted values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Units {
    /// Feet and miles.
    #[default]
    Imperial,

    /// Meters and kilometers.
    Metric,
}

impl Units {
    pub fn from_metric(metric: bool) -> Self {
        if metric {
            Self::Metric
        } else {
            Self::Imperial
        }
    }

    /// Returns `feet` in this unit system's length unit.
    pub fn length(self, feet: f64) -> f64 {
        match self {
            Self::Imperial => feet,
            Self::Metric => to_metric_length(feet),
        }
    }

    /// Returns `miles` in this unit system's distance unit.
    pub fn distance(self, miles: f64) -> f64 {
        match self {
            Self::Imperial => miles,
            Self::Metric => to_metric_distance(miles),
        }
    }

    pub fn length_name(self) -> &'static str {
        match self {
            Self::Imperial => "feet",
            Self::Metric => "meters",
        }
    }

    pub fn distance_name(self) -> &'static str {
        match self {
            Self::Imperial => "miles",
            Self::Metric => "kilometers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{to_metric_distance, to_metric_length, Units, KM_PER_MILE, METERS_PER_FOOT};
    use approx::assert_relative_eq;

    #[test]
    fn test_metric_length_recovers_feet() {
        for feet in [-1_312.5, -1.0, 0.0, 0.3, 1.0, 5_280.0, 29_031.7, 20_902_230.97] {
            assert_relative_eq!(to_metric_length(feet) / METERS_PER_FOOT, feet);
        }
    }

    #[test]
    fn test_metric_distance() {
        assert_relative_eq!(to_metric_distance(10.0), 16.093_44);
        assert_relative_eq!(to_metric_distance(1.0) / KM_PER_MILE, 1.0);
    }

    #[test]
    fn test_imperial_is_identity() {
        let units = Units::from_metric(false);
        assert_eq!(units, Units::Imperial);
        assert_eq!(units.length(12.5), 12.5);
        assert_eq!(units.distance(3.25), 3.25);
        assert_eq!(units.length_name(), "feet");
        assert_eq!(Units::Metric.distance_name(), "kilometers");
    }
}
