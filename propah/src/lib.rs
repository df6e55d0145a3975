//! # Radio Path Profiles
//!
//! `propah` computes the geometric profiles of a radio path between a
//! receiver and a transmitter and prepares them for plotting:
//!
//! - terrain elevation along the path, optionally with ground clutter
//! - elevation angles from the receiver along the path
//! - terrain height referenced to the line of sight, with the earth's
//!   curvature contour and the first Fresnel zone
//!
//! Profiles are computed in feet, miles and degrees, and converted to
//! the requested [`Units`] only when a [`PlotRequest`] is built.

mod axis;
mod error;
pub mod fresnel;
mod normalize;
mod output;
mod params;
mod profile;
mod request;
pub mod units;

pub use {
    crate::{
        axis::{AxisRange, AxisRanges},
        error::PropahError,
        normalize::Ramp,
        output::OutputDescriptor,
        params::{LinkParameters, LinkParametersBuilder},
        profile::{Profile, ProfileCalculator, ProfileMode, ProfileSample},
        request::{plot_request, Axis, Labels, PlotRequest, ProfileSeriesBuilder, Series},
        units::Units,
    },
    geo, terrain,
};
