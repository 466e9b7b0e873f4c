use crate::stations::error::StationCodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetarError {
    #[error(transparent)]
    InvalidStationCode(#[from] StationCodeError),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
