mod elevation_angle;
mod haversine;

pub(crate) use {elevation_angle::elevation_angle, haversine::HaversineIter};
