use crate::{
    axis::{AxisRange, AxisRanges, RangeTracker},
    fresnel::FresnelZone,
    normalize::Ramp,
    LinkParameters, PropahError,
};
use log::debug;
use std::{f64::consts::FRAC_PI_2, fmt};
use terrain::{constants::FEET_PER_MILE, ElevationAngle, ElevationSource, Path, Site};

/// Which profile to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProfileMode {
    /// Ground elevation above sea level.
    Terrain,

    /// Elevation angle from the receiver to the ground along the path.
    Elevation,

    /// Terrain height referenced to the line of sight, corrected for
    /// the earth's curvature.
    Height,
}

impl fmt::Display for ProfileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terrain => "terrain",
            Self::Elevation => "elevation",
            Self::Height => "height",
        })
    }
}

/// Derived values at one path sample.
///
/// Only the values the profile's mode produces are set. Heights are
/// in feet, distances in miles and angles in degrees.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProfileSample {
    pub distance_mi: f64,

    /// Ground elevation (terrain profiles) or height referenced to
    /// the line of sight (height profiles).
    pub height_ft: Option<f64>,

    /// `height_ft` with ground clutter on top.
    pub clutter_ft: Option<f64>,

    pub angle_deg: Option<f64>,

    /// Angle to the top of the ground clutter.
    pub clutter_angle_deg: Option<f64>,

    /// Line of sight reference: the reference angle (degrees) of
    /// elevation profiles, the normalization ramp (feet) of height
    /// profiles.
    pub los: Option<f64>,

    /// First Fresnel zone boundary.
    pub fresnel_ft: Option<f64>,

    /// Fresnel zone boundary scaled by the required clearance.
    pub fresnel_clearance_ft: Option<f64>,

    /// Height above the earth's curvature contour.
    pub curvature_ft: Option<f64>,
}

/// A computed profile along one path.
#[derive(Debug, Clone)]
pub struct Profile {
    pub mode: ProfileMode,

    pub samples: Vec<ProfileSample>,

    /// Elevation angle (degrees) of the transmitter as seen from the
    /// receiver (elevation and height profiles).
    pub reference_angle_deg: Option<f64>,

    /// Normalization ramp, if the profile was normalized.
    pub ramp: Option<Ramp>,

    /// Whether Fresnel zone values were computed.
    pub fresnel: bool,

    /// Great circle distance (miles) between the sites.
    pub distance_mi: f64,

    /// Azimuth (degrees) from the receiver to the transmitter.
    pub azimuth_deg: f64,

    ranges: AxisRanges,
}

impl Profile {
    /// Plot ranges in feet, miles and degrees.
    pub fn axis_ranges(&self) -> AxisRanges {
        self.ranges
    }
}

/// Walks a path once and derives per-sample profile values and the
/// plot ranges that fit them.
pub struct ProfileCalculator<'a, G> {
    geometry: &'a G,
    params: &'a LinkParameters,
}

impl<'a, G> ProfileCalculator<'a, G>
where
    G: ElevationSource + ElevationAngle,
{
    pub fn new(geometry: &'a G, params: &'a LinkParameters) -> Self {
        Self { geometry, params }
    }

    /// Computes the `mode` profile of `path`, which runs from `rx`
    /// (first sample) to `tx` (last sample).
    pub fn compute(
        &self,
        mode: ProfileMode,
        path: &Path,
        tx: &Site,
        rx: &Site,
    ) -> Result<Profile, PropahError> {
        let now = std::time::Instant::now();
        let distance_mi = rx.distance_mi(tx.coord);
        let mut profile = Profile {
            mode,
            samples: Vec::with_capacity(path.samples().len()),
            reference_angle_deg: None,
            ramp: None,
            fresnel: false,
            distance_mi,
            azimuth_deg: rx.azimuth(tx.coord),
            ranges: AxisRanges {
                y: AxisRange::new(-1.0, 1.0),
                y2: None,
                x: None,
            },
        };

        match mode {
            ProfileMode::Terrain => self.terrain(path, &mut profile),
            ProfileMode::Elevation => self.elevation(path, tx, rx, &mut profile)?,
            ProfileMode::Height => self.height(path, tx, rx, &mut profile)?,
        }

        debug!(
            "{mode} profile; len: {}, distance: {distance_mi} mi, exec: {:?}",
            profile.samples.len(),
            now.elapsed()
        );

        Ok(profile)
    }

    fn terrain(&self, path: &Path, profile: &mut Profile) {
        let samples = path.samples();
        let last = samples.len() - 1;
        let mut tracker = RangeTracker::default();

        for (idx, sample) in samples.iter().enumerate() {
            let elevation_ft = sample.elevation_ft;
            profile.samples.push(ProfileSample {
                distance_mi: sample.distance_mi,
                height_ft: Some(elevation_ft),
                clutter_ft: self.clutter_overlay(idx, last, elevation_ft, elevation_ft),
                ..Default::default()
            });
            tracker.observe_terrain(elevation_ft, self.params.clutter_ft);
        }

        profile.ranges = tracker.terrain_range();
    }

    fn elevation(
        &self,
        path: &Path,
        tx: &Site,
        rx: &Site,
        profile: &mut Profile,
    ) -> Result<(), PropahError> {
        let samples = path.samples();
        let last = samples.len() - 1;
        let reference = self.geometry.elevation_angle(rx, tx)?;
        let mut tracker = RangeTracker::default();

        // The receiver's own position has no elevation angle.
        for sample in &samples[1..last] {
            let coord = sample.coord();
            let angle = self.geometry.elevation_angle(rx, &Site::point(coord, 0.0))?;
            let clutter_angle = if self.params.has_clutter() {
                let alt_ft = if sample.elevation_ft == 0.0 {
                    0.0
                } else {
                    self.params.clutter_ft
                };
                Some(self.geometry.elevation_angle(rx, &Site::point(coord, alt_ft))?)
            } else {
                None
            };
            tracker.observe_angle(angle, clutter_angle);
            profile.samples.push(ProfileSample {
                distance_mi: sample.distance_mi,
                angle_deg: Some(angle),
                clutter_angle_deg: clutter_angle,
                los: Some(reference),
                ..Default::default()
            });
        }

        profile.samples.push(ProfileSample {
            distance_mi: samples[last].distance_mi,
            angle_deg: Some(reference),
            los: Some(reference),
            ..Default::default()
        });

        profile.reference_angle_deg = Some(reference);
        profile.ranges = tracker.angle_range(reference, profile.distance_mi);
        Ok(())
    }

    fn height(
        &self,
        path: &Path,
        tx: &Site,
        rx: &Site,
        profile: &mut Profile,
    ) -> Result<(), PropahError> {
        let samples = path.samples();
        let last = samples.len() - 1;
        let radius_ft = self.params.earth_radius_ft;
        let reference = self.geometry.elevation_angle(rx, tx)?;
        let reference_rad = reference.to_radians();
        let rx_ground_ft = self.geometry.elevation(rx.coord)?;
        let b = rx_ground_ft + rx.alt_ft + radius_ft;

        let ramp = if self.params.normalize {
            let tx_ground_ft = self.geometry.elevation(tx.coord)?;
            Some(Ramp::new(
                rx_ground_ft,
                rx.alt_ft,
                tx_ground_ft,
                tx.alt_ft,
                path.distance_mi(),
            ))
        } else {
            None
        };
        let zone = self
            .params
            .frequency_mhz
            .filter(|_| self.params.fresnel_enabled())
            .map(|mhz| FresnelZone::new(1, mhz, FEET_PER_MILE * path.distance_mi()));
        if self.params.fresnel_plot && zone.is_none() {
            debug!(
                "no fresnel zone; frequency: {:?} MHz",
                self.params.frequency_mhz
            );
        }

        let mut tracker = RangeTracker::default();

        for (idx, sample) in samples[..last].iter().enumerate() {
            let mut terrain_ft = sample.elevation_ft;
            if idx == 0 {
                // Receive antenna spike.
                terrain_ft += rx.alt_ft;
            }

            let cangle = FEET_PER_MILE * rx.distance_mi(sample.coord()) / radius_ft;
            let c = b * (reference_rad + FRAC_PI_2).sin()
                / (FRAC_PI_2 - reference_rad - cangle).sin();

            let mut point = ProfileSample {
                distance_mi: sample.distance_mi,
                height_ft: Some(terrain_ft + radius_ft - c),
                ..Default::default()
            };
            if let Some(zone) = &zone {
                let fresnel_ft = zone.radius(FEET_PER_MILE * sample.distance_mi);
                point.fresnel_ft = Some(fresnel_ft);
                point.fresnel_clearance_ft = Some(fresnel_ft * self.params.fresnel_clearance);
            }
            let r = ramp.map_or(0.0, |ramp| ramp.apply(&mut point));
            point.los = Some(r);

            if let Some(height_ft) = point.height_ft {
                point.curvature_ft = Some(height_ft - terrain_ft);
                point.clutter_ft = self.clutter_overlay(idx, last, terrain_ft, height_ft);
                tracker.observe_height(
                    height_ft,
                    self.params.clutter_ft,
                    terrain_ft,
                    point.fresnel_ft,
                    r,
                );
            }
            profile.samples.push(point);
        }

        // The profile ends on the line of sight.
        let r = ramp.map_or(0.0, |ramp| ramp.at(samples[last].distance_mi));
        let fresnel_end = zone.map(|_| r);
        profile.samples.push(ProfileSample {
            distance_mi: samples[last].distance_mi,
            height_ft: Some(r),
            los: Some(r),
            fresnel_ft: fresnel_end,
            fresnel_clearance_ft: fresnel_end,
            ..Default::default()
        });
        tracker.observe_los(r);

        profile.reference_angle_deg = Some(reference);
        profile.ramp = ramp;
        profile.fresnel = zone.is_some();
        profile.ranges = tracker.height_ranges(profile.distance_mi);
        Ok(())
    }

    /// Clutter sits on interior samples only, and never on terrain at
    /// exactly sea level.
    fn clutter_overlay(
        &self,
        idx: usize,
        last: usize,
        terrain_ft: f64,
        height_ft: f64,
    ) -> Option<f64> {
        if !self.params.has_clutter() || idx == 0 || idx + 1 >= last {
            return None;
        }
        Some(if terrain_ft == 0.0 {
            height_ft
        } else {
            height_ft + self.params.clutter_ft
        })
    }
}
