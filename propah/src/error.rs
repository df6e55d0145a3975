use terrain::TerrainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropahError {
    #[error("invalid parameter '{0}'")]
    Param(&'static str),

    #[error("{0}")]
    Terrain(#[from] TerrainError),
}
