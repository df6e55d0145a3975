use crate::{
    AxisRanges, LinkParameters, OutputDescriptor, Profile, ProfileCalculator, ProfileMode,
    ProfileSample, PropahError, Units,
};
use terrain::{ElevationAngle, ElevationSource, PathSampler, Site};

/// Which y axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    Y1,
    Y2,
}

/// One named line of a plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Series {
    /// Stable identifier, also used for intermediate file names.
    pub name: &'static str,

    /// Legend text.
    pub title: String,

    pub axis: Axis,

    /// `(x, y)` pairs in output units.
    pub points: Vec<(f64, f64)>,
}

/// Descriptive values for titling a plot, in output units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Labels {
    pub rx: String,
    pub tx: String,
    pub azimuth_deg: f64,
    pub distance: f64,
    pub frequency_mhz: Option<f64>,
    pub units: Units,
}

/// Everything a renderer needs to draw one profile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlotRequest {
    pub mode: ProfileMode,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub ranges: AxisRanges,
    pub output: OutputDescriptor,
    pub labels: Labels,
}

impl PlotRequest {
    /// Returns the series called `name`, if present.
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|series| series.name == name)
    }
}

/// Converts a computed profile into plot series, labels and ranges in
/// output units.
pub struct ProfileSeriesBuilder<'a> {
    profile: &'a Profile,
    params: &'a LinkParameters,
    tx: &'a Site,
    rx: &'a Site,
}

/// How a series' y values convert to output units.
#[derive(Clone, Copy)]
enum Quantity {
    Length,
    Angle,
}

impl<'a> ProfileSeriesBuilder<'a> {
    pub fn new(
        profile: &'a Profile,
        params: &'a LinkParameters,
        tx: &'a Site,
        rx: &'a Site,
    ) -> Self {
        Self {
            profile,
            params,
            tx,
            rx,
        }
    }

    pub fn build(&self, output: OutputDescriptor) -> PlotRequest {
        let units = self.params.units;
        let mode = self.profile.mode;
        let (rx, tx) = (&self.rx.name, &self.tx.name);
        let azimuth = self.profile.azimuth_deg;
        let distance = units.distance(self.profile.distance_mi);

        let (title, y_label, series) = match mode {
            ProfileMode::Terrain => (
                format!("Terrain Profile Between {rx} and {tx} ({azimuth:.2}° Azimuth)"),
                format!("Ground Elevation Above Sea Level ({})", units.length_name()),
                self.terrain_series(),
            ),
            ProfileMode::Elevation => (
                format!("Elevation Profile Between {rx} and {tx} ({azimuth:.2}° azimuth)"),
                format!("Elevation Angle Along LOS Path Between\n{rx} and {tx} (degrees)"),
                self.elevation_series(),
            ),
            ProfileMode::Height => {
                let title = if self.profile.fresnel {
                    format!(
                        "Path Profile Between {rx} and {tx} ({azimuth:.2}° azimuth)\nWith First Fresnel Zone"
                    )
                } else {
                    format!("Height Profile Between {rx} and {tx} ({azimuth:.2}° azimuth)")
                };
                let normalized = if self.params.normalize {
                    "Normalized "
                } else {
                    ""
                };
                (
                    title,
                    format!(
                        "{normalized}Height Referenced To LOS Path Between\n{rx} and {tx} ({})",
                        units.length_name()
                    ),
                    self.height_series(),
                )
            }
        };

        PlotRequest {
            mode,
            title,
            x_label: format!(
                "Distance Between {rx} and {tx} ({distance:.2} {})",
                units.distance_name()
            ),
            y_label,
            series,
            ranges: self.profile.axis_ranges().to_units(mode, units),
            output,
            labels: Labels {
                rx: rx.clone(),
                tx: tx.clone(),
                azimuth_deg: azimuth,
                distance,
                frequency_mhz: self.params.frequency_mhz,
                units,
            },
        }
    }

    fn terrain_series(&self) -> Vec<Series> {
        let mut series = Vec::with_capacity(2);
        if self.params.has_clutter() {
            series.push(self.series("profile", "Terrain Profile", Axis::Y1, Quantity::Length, |s| {
                s.height_ft
            }));
            series.push(self.clutter_series(Quantity::Length, |s| s.clutter_ft));
        } else {
            series.push(self.series("profile", "", Axis::Y1, Quantity::Length, |s| s.height_ft));
        }
        series
    }

    fn elevation_series(&self) -> Vec<Series> {
        let mut series = Vec::with_capacity(3);
        series.push(self.series(
            "profile",
            "Real Earth Profile",
            Axis::Y1,
            Quantity::Angle,
            |s| s.angle_deg,
        ));
        if self.params.has_clutter() {
            series.push(self.clutter_series(Quantity::Angle, |s| s.clutter_angle_deg));
        }
        let reference = self.profile.reference_angle_deg.unwrap_or_default();
        series.push(self.series(
            "reference",
            &format!("Line of Sight Path ({reference:.2}° elevation)"),
            Axis::Y1,
            Quantity::Angle,
            |s| s.los,
        ));
        series
    }

    fn height_series(&self) -> Vec<Series> {
        let mut series = Vec::with_capacity(6);
        series.push(self.series(
            "profile",
            "Point-to-Point Profile",
            Axis::Y1,
            Quantity::Length,
            |s| s.height_ft,
        ));
        if self.params.has_clutter() {
            series.push(self.series(
                "clutter",
                &format!("Ground Clutter ({})", self.clutter_label()),
                Axis::Y1,
                Quantity::Length,
                |s| s.clutter_ft,
            ));
        }
        series.push(self.series(
            "reference",
            "Line of Sight Path",
            Axis::Y1,
            Quantity::Length,
            |s| s.los,
        ));
        series.push(self.series(
            "curvature",
            "Earth's Curvature Contour",
            Axis::Y2,
            Quantity::Length,
            |s| s.curvature_ft,
        ));
        if self.profile.fresnel {
            let mhz = self.params.frequency_mhz.unwrap_or_default();
            series.push(self.series(
                "fresnel",
                &format!("First Fresnel Zone ({mhz:.3} MHz)"),
                Axis::Y1,
                Quantity::Length,
                |s| s.fresnel_ft,
            ));
            series.push(self.series(
                "fresnel_clearance",
                &format!(
                    "{:.0}% of First Fresnel Zone",
                    self.params.fresnel_clearance * 100.0
                ),
                Axis::Y1,
                Quantity::Length,
                |s| s.fresnel_clearance_ft,
            ));
        }
        series
    }

    fn clutter_series(
        &self,
        quantity: Quantity,
        value: impl Fn(&ProfileSample) -> Option<f64>,
    ) -> Series {
        self.series(
            "clutter",
            &format!("Clutter Profile ({})", self.clutter_label()),
            Axis::Y1,
            quantity,
            value,
        )
    }

    fn clutter_label(&self) -> String {
        let units = self.params.units;
        format!(
            "{:.2} {}",
            units.length(self.params.clutter_ft),
            units.length_name()
        )
    }

    /// Collects the samples where `value` is set.
    fn series(
        &self,
        name: &'static str,
        title: &str,
        axis: Axis,
        quantity: Quantity,
        value: impl Fn(&ProfileSample) -> Option<f64>,
    ) -> Series {
        let units = self.params.units;
        let points = self
            .profile
            .samples
            .iter()
            .filter_map(|sample| {
                let y = value(sample)?;
                let y = match quantity {
                    Quantity::Length => units.length(y),
                    Quantity::Angle => y,
                };
                Some((units.distance(sample.distance_mi), y))
            })
            .collect();
        Series {
            name,
            title: title.to_owned(),
            axis,
            points,
        }
    }
}

/// Samples the path from `rx` to `tx`, computes its `mode` profile and
/// prepares it for rendering to the file `name` resolves to.
pub fn plot_request<S, G>(
    sampler: &S,
    geometry: &G,
    tx: &Site,
    rx: &Site,
    params: &LinkParameters,
    mode: ProfileMode,
    name: &str,
) -> Result<PlotRequest, PropahError>
where
    S: PathSampler,
    G: ElevationSource + ElevationAngle,
{
    let path = sampler.read_path(rx, tx)?;
    let profile = ProfileCalculator::new(geometry, params).compute(mode, &path, tx, rx)?;
    let output = OutputDescriptor::resolve(name);
    Ok(ProfileSeriesBuilder::new(&profile, params, tx, rx).build(output))
}
