use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("path has {0} samples, at least 2 are required")]
    PathTooShort(usize),

    #[error("path distance at sample {0} is decreasing or not finite")]
    PathOrder(usize),

    #[error("path endpoints are coincident")]
    Coincident,

    #[error("invalid max step {0}")]
    Step(f64),
}
