use agv_core::CoreError;
use agv_vehicle::VehicleError;
use thiserror::Error;

/// Startup failures.  Once the driver is running nothing is fatal.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("fleet initialisation error: {0}")]
    Vehicle(#[from] VehicleError),
}

pub type FleetResult<T> = Result<T, FleetError>;
