use thiserror::Error;

use crate::sim::TubeId;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Tube {0} is not part of the current game")]
    TubeNotFound(TubeId),
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("Tuning is not valid JSON")]
    TuningFormat(#[from] serde_json::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
