use thiserror::Error;

#[derive(Debug, Error)]
pub enum RError {
    #[error("Origin and destination are required.")]
    MissingEndpoints,
    #[error("Station '{0}' not found.")]
    UnknownStation(String),
    #[error("Origin and destination must be different.")]
    SameStation,
    #[error("Invalid travel date format. Expected YYYY-MM-DD.")]
    InvalidTravelDate,
    #[error("Could not find '{0}'.")]
    DatasetMissing(String),
    #[error("No routes found!")]
    NoRoutesFound,
    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type RResult<T> = Result<T, RError>;
