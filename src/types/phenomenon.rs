//! Decoding of METAR present-weather groups (`-RA`, `+TSRA`, `VCSH`, ...).
//!
//! A group is made of an optional vicinity marker (`VC`), an optional intensity
//! marker (`-` light, `+` heavy) and a phenomenon code. The code is looked up in
//! a fixed table of precipitation, obscuration and descriptor codes; codes that are
//! not in the table decode to an empty description instead of failing.

use std::fmt;

/// Intensity qualifier of a weather phenomenon.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Intensity {
    /// No marker; moderate intensity.
    #[default]
    Moderate,
    /// `-` prefix.
    Light,
    /// `+` prefix.
    Heavy,
}

impl Intensity {
    fn prefix(&self) -> &'static str {
        match self {
            Intensity::Moderate => "",
            Intensity::Light => "light ",
            Intensity::Heavy => "heavy ",
        }
    }
}

/// A decoded present-weather group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhenomenon {
    pub intensity: Intensity,
    /// Observed near, but not at, the station.
    pub vicinity: bool,
    /// The code left after stripping the markers, e.g. `TSRA`.
    pub code: String,
    /// Human readable description, empty when `code` is unknown.
    pub description: &'static str,
}

impl DecodedPhenomenon {
    /// Decodes a single present-weather group.
    ///
    /// ```
    /// use metar::{DecodedPhenomenon, Intensity};
    ///
    /// let decoded = DecodedPhenomenon::decode("+TSRA");
    /// assert_eq!(decoded.intensity, Intensity::Heavy);
    /// assert_eq!(decoded.to_string(), "heavy thunderstorm with heavy rain");
    /// ```
    pub fn decode(token: &str) -> Self {
        let (vicinity, rest) = match token.strip_prefix("VC") {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (intensity, code) = if let Some(code) = rest.strip_prefix('-') {
            (Intensity::Light, code)
        } else if let Some(code) = rest.strip_prefix('+') {
            (Intensity::Heavy, code)
        } else {
            (Intensity::Moderate, rest)
        };

        DecodedPhenomenon {
            intensity,
            vicinity,
            code: code.to_string(),
            description: describe(code).unwrap_or(""),
        }
    }

    pub fn is_known(&self) -> bool {
        !self.description.is_empty()
    }
}

impl fmt::Display for DecodedPhenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.intensity.prefix(), self.description)?;
        if self.vicinity {
            f.write_str(" in vicinity")?;
        }
        Ok(())
    }
}

/// Decodes every group in order; unknown groups are kept with an empty description.
pub fn decode_phenomena<S: AsRef<str>>(tokens: &[S]) -> Vec<DecodedPhenomenon> {
    tokens
        .iter()
        .map(|token| DecodedPhenomenon::decode(token.as_ref()))
        .collect()
}

/// Looks up a phenomenon code.
pub fn describe(code: &str) -> Option<&'static str> {
    let description = match code {
        // Precipitation
        "RA" => "rain",
        "DZ" => "drizzle",
        "SN" => "snow",
        "SG" => "snow grains",
        "IC" => "ice crystals",
        "PL" => "ice pellets",
        "GR" => "hail",
        "GS" => "small hail/snow pellets",
        "UP" => "unknown precipitation",
        // Obscuration
        "BR" => "mist",
        "FG" => "fog",
        "FU" => "smoke",
        "VA" => "volcanic ash",
        "SA" => "sand",
        "HZ" => "haze",
        "PY" => "spray",
        "DU" => "widespread dust",
        // Other
        "SQ" => "squall",
        "SS" => "sandstorm",
        "DS" => "duststorm",
        "PO" => "well developed dust/sand whirls",
        "FC" => "funnel cloud",
        // Descriptors
        "VC" => "in vicinity",
        "MI" => "shallow",
        "BC" => "patches",
        "SH" => "showers",
        "PR" => "partial",
        "TS" => "thunderstorm",
        "TSRA" => "thunderstorm with heavy rain",
        "BL" => "blowing",
        "DR" => "drifting",
        "FZ" => "freezing",
        _ => return None,
    };
    Some(description)
}
