use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("renderer '{0}' not found")]
    Unavailable(String),

    #[error("renderer '{program}' failed with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("unsupported output format '{0}'")]
    Format(String),

    #[error("{0}")]
    Draw(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
