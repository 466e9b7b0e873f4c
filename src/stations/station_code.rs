//! Validation and canonicalization of user-supplied airport identifiers.

use crate::stations::error::StationCodeError;
use std::fmt;
use std::str::FromStr;

/// Prefix prepended to three-letter domestic identifiers (e.g. `JFK` becomes `KJFK`).
pub const DEFAULT_COUNTRY_PREFIX: char = 'K';

/// A validated 4-character ICAO station code.
///
/// A `StationCode` always holds exactly four uppercase ASCII letters or digits.
/// Three-character inputs are accepted and padded with [`DEFAULT_COUNTRY_PREFIX`],
/// so `"sfo"`, `"SFO"` and `"KSFO"` all normalize to `KSFO`.
///
/// # Examples
///
/// ```
/// use metar::StationCode;
///
/// let code = StationCode::new("jfk").unwrap();
/// assert_eq!(code.as_str(), "KJFK");
///
/// // Normalizing an already normalized code is a no-op.
/// assert_eq!(StationCode::new(code.as_str()).unwrap(), code);
///
/// assert!(StationCode::new("KJFKX").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Validates `input` and converts it into its canonical 4-character form.
    ///
    /// # Errors
    ///
    /// * [`StationCodeError::InvalidLength`] when `input` is not 3 or 4 characters long.
    /// * [`StationCodeError::InvalidCharacters`] when `input` contains anything other than
    ///   ASCII letters and digits.
    pub fn new(input: &str) -> Result<Self, StationCodeError> {
        let length = input.chars().count();
        if !(3..=4).contains(&length) {
            return Err(StationCodeError::InvalidLength(input.to_string()));
        }
        if !input.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(StationCodeError::InvalidCharacters(input.to_string()));
        }

        let mut code = String::with_capacity(4);
        if length == 3 {
            code.push(DEFAULT_COUNTRY_PREFIX);
        }
        code.push_str(&input.to_ascii_uppercase());
        Ok(StationCode(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Normalizes every identifier in `inputs`, stopping at the first invalid one.
///
/// Intended to run before any network activity so a single bad argument aborts the
/// whole invocation.
pub fn normalize_all<I, S>(inputs: I) -> Result<Vec<StationCode>, StationCodeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|input| StationCode::new(input.as_ref()))
        .collect()
}

impl FromStr for StationCode {
    type Err = StationCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationCode::new(s)
    }
}

impl AsRef<str> for StationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
