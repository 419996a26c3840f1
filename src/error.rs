use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
