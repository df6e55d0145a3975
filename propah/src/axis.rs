use crate::{ProfileMode, Units};

/// Smallest terrain maximum (feet) that still gets a data-driven
/// range. Anything lower is treated as a sea-level path.
const SEA_LEVEL_FT: f64 = 1.0;

/// Paths longer than this (miles) pad elevation angles by a fixed
/// amount instead of relative to the reference angle.
const LONG_PATH_MI: f64 = 2.0;

const ANGLE_PAD_DEG: f64 = 0.25;

/// Lowest upper bound (feet) of a height profile's primary axis.
const MIN_HEIGHT_CEILING_FT: f64 = 20.0;

/// Inclusive plot range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns this range with both bounds mapped through `f`.
    #[must_use]
    pub fn scale(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            min: f(self.min),
            max: f(self.max),
        }
    }
}

/// Plot ranges of a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AxisRanges {
    /// Primary y axis.
    pub y: AxisRange,

    /// Secondary y axis (height profiles only).
    pub y2: Option<AxisRange>,

    /// x axis (height profiles only; other profiles let the renderer
    /// fit the data).
    pub x: Option<AxisRange>,
}

impl AxisRanges {
    /// Converts ranges computed in feet and miles to `units`.
    ///
    /// Angles are never converted, and the fixed left margin of the
    /// x axis stays as is.
    #[must_use]
    pub fn to_units(self, mode: ProfileMode, units: Units) -> Self {
        if units == Units::Imperial {
            return self;
        }
        let mut y = match mode {
            ProfileMode::Elevation => self.y,
            ProfileMode::Terrain | ProfileMode::Height => self.y.scale(|ft| units.length(ft)),
        };
        let y2 = self.y2.map(|range| {
            let (scaled_y, y2) = congruent(y, units.length(range.min));
            y = scaled_y;
            y2
        });
        Self {
            y,
            y2,
            x: self
                .x
                .map(|range| AxisRange::new(range.min, units.distance(range.max))),
        }
    }
}

/// Running minimum and maximum.
#[derive(Debug, Clone, Copy)]
struct Extremes {
    min: f64,
    max: f64,
}

impl Default for Extremes {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Extremes {
    fn min(&mut self, value: f64) {
        self.min = self.min.min(value);
    }

    fn max(&mut self, value: f64) {
        self.max = self.max.max(value);
    }

    fn both(&mut self, value: f64) {
        self.min(value);
        self.max(value);
    }

    fn min_or(&self, fallback: f64) -> f64 {
        if self.min.is_finite() {
            self.min
        } else {
            fallback
        }
    }

    fn max_or(&self, fallback: f64) -> f64 {
        if self.max.is_finite() {
            self.max
        } else {
            fallback
        }
    }
}

/// Accumulates the extrema of a profile while it is walked and derives
/// its plot ranges afterwards.
///
/// Everything is tracked in feet, miles and degrees.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RangeTracker {
    values: Extremes,
    terrain: Extremes,
    earth: Extremes,
}

impl RangeTracker {
    pub(crate) fn observe_terrain(&mut self, elevation_ft: f64, clutter_ft: f64) {
        self.values.max(elevation_ft + clutter_ft);
        self.values.min(elevation_ft);
    }

    /// `clutter_angle_deg` is `None` when there is no clutter, in which
    /// case the horizon stands in for it.
    pub(crate) fn observe_angle(&mut self, angle_deg: f64, clutter_angle_deg: Option<f64>) {
        self.values.max(angle_deg);
        self.values.max(clutter_angle_deg.unwrap_or(0.0));
        self.values.min(angle_deg);
    }

    pub(crate) fn observe_height(
        &mut self,
        height_ft: f64,
        clutter_ft: f64,
        terrain_ft: f64,
        fresnel_ft: Option<f64>,
        los_ft: f64,
    ) {
        if let Some(fresnel_ft) = fresnel_ft {
            self.values.min(fresnel_ft);
        }
        self.values.max(height_ft + clutter_ft);
        self.values.min(height_ft);
        self.values.max(los_ft);
        self.terrain.min(terrain_ft);
        self.earth.min(height_ft - terrain_ft);
    }

    /// Records the line of sight where the profile ends on it.
    pub(crate) fn observe_los(&mut self, los_ft: f64) {
        self.values.both(los_ft);
    }

    pub(crate) fn terrain_range(&self) -> AxisRanges {
        let max = self.values.max_or(0.0);
        let y = if max < SEA_LEVEL_FT {
            // A completely sea-level path.
            AxisRange::new(-1.0, 1.0)
        } else {
            AxisRange::new(self.values.min_or(0.0) - 0.01 * max, max)
        };
        AxisRanges { y, y2: None, x: None }
    }

    pub(crate) fn angle_range(&self, reference_deg: f64, distance_mi: f64) -> AxisRanges {
        let min = self.values.min_or(reference_deg);
        let max = self.values.max_or(reference_deg);
        let y = if distance_mi > LONG_PATH_MI {
            AxisRange::new(-reference_deg.abs() - ANGLE_PAD_DEG, max + ANGLE_PAD_DEG)
        } else {
            AxisRange::new(min, reference_deg - min / 8.0)
        };
        AxisRanges { y, y2: None, x: None }
    }

    /// Primary axis for heights referenced to the line of sight, and a
    /// secondary axis of equal span for the earth's curvature contour.
    pub(crate) fn height_ranges(&self, distance_mi: f64) -> AxisRanges {
        let max = self.values.max_or(0.0);
        let min = self.values.min_or(0.0);
        let min_terrain = self.terrain.min_or(0.0);
        let min_earth = self.earth.min_or(0.0);

        let dh = max - min;
        let mut miny = min - 0.15 * dh;
        let maxy = (max + 0.05 * dh).max(MIN_HEIGHT_CEILING_FT);
        let mut min2y = miny - min_terrain + 0.05 * dh;
        if min_earth < min2y {
            miny -= min2y - min_earth + 0.05 * dh;
            min2y = min_earth - 0.05 * dh;
        }
        let (y, y2) = congruent(AxisRange::new(miny, maxy), min2y);

        AxisRanges {
            y,
            y2: Some(y2),
            x: Some(AxisRange::new(-0.5, (distance_mi + 0.5).round_ties_even())),
        }
    }
}

/// Widens `y` slightly and returns it with a range starting near
/// `min2` whose span is exactly the same.
fn congruent(y: AxisRange, min2: f64) -> (AxisRange, AxisRange) {
    let grid = span_grid(y.min.abs().max(y.max.abs()).max(min2.abs()));
    let y = AxisRange::new((y.min / grid).floor() * grid, (y.max / grid).ceil() * grid);
    let min2 = (min2 / grid).floor() * grid;
    (y, AxisRange::new(min2, min2 + y.span()))
}

/// Power of two step that bounds up to `magnitude` snap to outward.
///
/// Multiples of it no larger than four times `magnitude` are exact in
/// `f64`, and so are their sums and differences, which keeps the y and
/// y2 spans of a height profile identical.
fn span_grid(magnitude: f64) -> f64 {
    if !(magnitude > 0.0 && magnitude.is_finite()) {
        return 1.0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let exponent = (4.0 * magnitude).log2().ceil() as i32 + 1;
    2.0_f64.powi(exponent - f64::MANTISSA_DIGITS as i32 + 1)
}

#[cfg(test)]
mod tests {
    use super::{AxisRange, AxisRanges, RangeTracker};
    use crate::{ProfileMode, Units};
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_sea_level_terrain() {
        let mut tracker = RangeTracker::default();
        for _ in 0..10 {
            tracker.observe_terrain(0.0, 0.0);
        }
        assert_eq!(tracker.terrain_range().y, AxisRange::new(-1.0, 1.0));

        // Clutter lifts the maximum out of the fallback.
        let mut tracker = RangeTracker::default();
        tracker.observe_terrain(0.0, 30.0);
        tracker.observe_terrain(0.0, 30.0);
        let y = tracker.terrain_range().y;
        assert_relative_eq!(y.min, -0.3);
        assert_relative_eq!(y.max, 30.0);
    }

    #[test]
    fn test_terrain_padding() {
        let mut tracker = RangeTracker::default();
        for elevation in [500.0, 320.0, 980.0, 1000.0] {
            tracker.observe_terrain(elevation, 0.0);
        }
        let ranges = tracker.terrain_range();
        assert_relative_eq!(ranges.y.min, 310.0);
        assert_relative_eq!(ranges.y.max, 1000.0);
        assert_eq!(ranges.y2, None);
        assert_eq!(ranges.x, None);
    }

    #[test]
    fn test_long_path_angles() {
        let mut tracker = RangeTracker::default();
        for angle in [-0.4, -0.2, 0.1] {
            tracker.observe_angle(angle, None);
        }
        let y = tracker.angle_range(-0.3, 10.0).y;
        assert_relative_eq!(y.min, -0.55);
        assert_relative_eq!(y.max, 0.35);
    }

    #[test]
    fn test_horizon_caps_angle_maximum() {
        let mut tracker = RangeTracker::default();
        for angle in [-0.4, -0.2] {
            tracker.observe_angle(angle, None);
        }
        assert_relative_eq!(tracker.angle_range(-0.3, 10.0).y.max, 0.25);

        let mut tracker = RangeTracker::default();
        tracker.observe_angle(-0.4, Some(0.5));
        assert_relative_eq!(tracker.angle_range(-0.3, 10.0).y.max, 0.75);
    }

    #[test]
    fn test_short_path_angles() {
        let mut tracker = RangeTracker::default();
        for angle in [-0.8, -0.2] {
            tracker.observe_angle(angle, None);
        }
        let y = tracker.angle_range(0.5, 1.5).y;
        assert_relative_eq!(y.min, -0.8);
        assert_relative_eq!(y.max, 0.6);
    }

    #[test]
    fn test_angles_without_interior_samples() {
        let tracker = RangeTracker::default();
        let y = tracker.angle_range(0.5, 1.0).y;
        assert_relative_eq!(y.min, 0.5);
        assert_relative_eq!(y.max, 0.5 - 0.5 / 8.0);
    }

    #[test]
    fn test_height_ranges_congruent() {
        let mut tracker = RangeTracker::default();
        tracker.observe_height(-40.0, 0.0, 1230.0, None, 0.0);
        tracker.observe_height(-140.0, 25.0, 1100.0, Some(-160.0), 0.0);
        tracker.observe_height(-65.0, 25.0, 1300.0, Some(-150.0), 0.0);
        tracker.observe_los(0.0);
        let ranges = tracker.height_ranges(7.3);

        // max 0, min -160, dh 160
        assert_relative_eq!(ranges.y.max, 20.0);
        let y2 = ranges.y2.unwrap();
        assert_eq!(y2.span(), ranges.y.span());
        // min2y = -184 - 1100 + 8 = -1276; minearth = -1365 is lower,
        // so both minimums move down together.
        assert_relative_eq!(y2.min, -1365.0 - 8.0);
        assert_relative_eq!(ranges.y.min, -184.0 - (-1276.0 + 1365.0 + 8.0));
        assert_eq!(ranges.x, Some(AxisRange::new(-0.5, 8.0)));
    }

    #[test]
    fn test_height_spans_are_identical() {
        let mut rng = StdRng::seed_from_u64(0x6e0d);
        let value = |rng: &mut StdRng| {
            rng.random_range(-1.0..1.0) * 10.0_f64.powf(rng.random_range(-3.0..6.0))
        };
        for _ in 0..10_000 {
            let mut tracker = RangeTracker::default();
            for _ in 0..5 {
                let height_ft = value(&mut rng);
                let terrain_ft = value(&mut rng).abs();
                let fresnel_ft = rng.random_bool(0.5).then(|| -value(&mut rng).abs());
                let clutter_ft = rng.random_range(0.0..50.0);
                tracker.observe_height(height_ft, clutter_ft, terrain_ft, fresnel_ft, 0.0);
            }
            tracker.observe_los(value(&mut rng));
            let ranges = tracker.height_ranges(rng.random_range(0.1..100.0));
            let y2 = ranges.y2.unwrap();
            assert_eq!(y2.span(), ranges.y.span(), "{ranges:?}");
            assert!(ranges.y.min < ranges.y.max);
        }
    }

    #[test]
    fn test_height_ranges_without_shift() {
        let mut tracker = RangeTracker::default();
        tracker.observe_height(50.0, 0.0, 10.0, None, 0.0);
        tracker.observe_height(100.0, 0.0, 10.0, None, 0.0);
        tracker.observe_los(0.0);
        let ranges = tracker.height_ranges(2.0);

        // max 100, min 0, dh 100
        assert_relative_eq!(ranges.y.min, -15.0);
        assert_relative_eq!(ranges.y.max, 105.0);
        let y2 = ranges.y2.unwrap();
        assert_relative_eq!(y2.min, -20.0);
        assert_relative_eq!(y2.max, 100.0);
        // 2.5 rounds half to even
        assert_eq!(ranges.x.unwrap().max, 2.0);
    }

    #[test]
    fn test_to_units() {
        let ranges = AxisRanges {
            y: AxisRange::new(-10.0, 100.0),
            y2: Some(AxisRange::new(0.0, 110.0)),
            x: Some(AxisRange::new(-0.5, 10.0)),
        };
        let metric = ranges.to_units(ProfileMode::Height, Units::Metric);
        assert_relative_eq!(metric.y.min, -3.048, max_relative = 1e-12);
        assert_relative_eq!(metric.y.max, 30.48, max_relative = 1e-12);
        assert_relative_eq!(metric.y2.unwrap().max, 33.528, max_relative = 1e-12);
        assert_eq!(metric.y2.unwrap().span(), metric.y.span());
        assert_eq!(metric.x.unwrap().min, -0.5);
        assert_relative_eq!(metric.x.unwrap().max, 16.09344);

        let angles = ranges.to_units(ProfileMode::Elevation, Units::Metric);
        assert_eq!(angles.y, ranges.y);

        assert_eq!(ranges.to_units(ProfileMode::Height, Units::Imperial), ranges);
    }
}
