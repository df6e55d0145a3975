//! # Terrain
//!
//! `terrain` provides radio sites, terrain paths sampled along the
//! great circle between two sites, and the spherical earth geometry
//! used to profile them.

pub mod constants;
mod earth;
mod error;
mod math;
mod path;
mod sampler;
mod site;

pub use crate::{
    earth::{ElevationAngle, SphericalEarth},
    error::TerrainError,
    path::{Path, PathSample},
    sampler::{ElevationSource, Flat, GreatCircleSampler, PathSampler},
    site::Site,
};
pub use geo;
