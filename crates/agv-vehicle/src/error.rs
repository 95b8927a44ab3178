use agv_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("location {0:?} is not in the location table")]
    UnknownLocation(String),

    #[error("expected {expected} sensor handle sets (one per vehicle), got {got}")]
    SensorCountMismatch { expected: usize, got: usize },
}

pub type VehicleResult<T> = Result<T, VehicleError>;
