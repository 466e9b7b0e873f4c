use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StationCodeError {
    #[error("Invalid airport code: '{0}' (expected 3 or 4 characters)")]
    InvalidLength(String),

    #[error("Invalid airport code: '{0}' (only letters and digits are allowed)")]
    InvalidCharacters(String),
}
