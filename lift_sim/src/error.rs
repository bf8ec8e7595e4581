use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("floor {0} is not in the building")]
    UnknownFloor(i32),
    #[error("invalid building: {0}")]
    InvalidBuilding(&'static str),
    #[error("arrival {origin}->{destination} is not a valid trip")]
    InvalidTrip { origin: i32, destination: i32 },
}

pub type Result<T> = std::result::Result<T, SimError>;
