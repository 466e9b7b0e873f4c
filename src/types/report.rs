//! The fully decoded per-station report and its text rendering.

use crate::types::cloud::DecodedCloudLayer;
use crate::types::phenomenon::DecodedPhenomenon;
use crate::types::raw_record::StationInfo;
use crate::types::wind::DecodedWind;
use std::fmt;

/// A temperature reading, kept in both scales.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Temperature {
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
        }
    }
}

/// `°F = °C × 9/5 + 32`
///
/// ```
/// assert_eq!(metar::celsius_to_fahrenheit(100.0), 212.0);
/// ```
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// A decoded METAR for one station, ready for presentation.
///
/// Produced by [`decode_report`](crate::decode_report). Numeric fields that could not
/// be parsed hold zero, and unknown codes carry empty labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedReport {
    /// Station identifier as reported by the service.
    pub station: String,
    pub info: StationInfo,
    /// Observation time as encoded in the report, e.g. `211751Z`.
    pub time: String,
    pub temperature: Temperature,
    pub dewpoint: Temperature,
    pub wind: DecodedWind,
    pub phenomena: Vec<DecodedPhenomenon>,
    pub cloud_layers: Vec<DecodedCloudLayer>,
    /// Visibility in statute miles, as reported.
    pub visibility: String,
    /// Altimeter setting in inHg.
    pub pressure_inhg: f64,
    pub flight_rules: String,
    pub remarks: String,
    pub raw_report: String,
    /// Error message the service embedded in the response instead of a report.
    pub error: Option<String>,
}

impl fmt::Display for DecodedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return writeln!(f, "Error: {}", error);
        }

        writeln!(
            f,
            "Station:\t{} --  {}, {} -- {}",
            self.station, self.info.city, self.info.state, self.info.name
        )?;
        writeln!(f, "{:<10}\t{}", "Time:", self.time)?;
        writeln!(f, "Temperature:\t{:.1}\u{00B0}F", self.temperature.fahrenheit)?;
        writeln!(f, "Dew Point:\t{:.1}\u{00B0}F", self.dewpoint.fahrenheit)?;

        write!(
            f,
            "{:<10}\t{}\u{00B0} ({}) @ {}KT",
            "Wind:",
            self.wind.direction,
            self.wind.compass_label(),
            self.wind.speed
        )?;
        if let Some(gust) = self.wind.gust {
            write!(f, " Gusts to {}KT", gust)?;
        }
        writeln!(f)?;

        if !self.phenomena.is_empty() {
            let conditions: Vec<String> = self
                .phenomena
                .iter()
                .map(|phenomenon| phenomenon.to_string().trim().to_string())
                .collect();
            writeln!(f, "Conditions:\t{}", conditions.join(" -- "))?;
        }

        if !self.cloud_layers.is_empty() {
            write!(f, "Cloud Layers:")?;
            for layer in &self.cloud_layers {
                write!(f, "\t{}", layer)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Visibility:\t{}sm", self.visibility)?;
        writeln!(f, "Pressure:\t{:.2}inHg", self.pressure_inhg)?;
        writeln!(f, "Flight Rules:\t{}", self.flight_rules)?;
        if !self.remarks.is_empty() {
            writeln!(f, "Remarks:\t{}", self.remarks)?;
        }
        writeln!(f, "Raw Report:\t{}", self.raw_report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_is_exact() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn test_temperature_keeps_both_scales() {
        let t = Temperature::from_celsius(21.0);
        assert_eq!(t.celsius, 21.0);
        assert_eq!(format!("{:.1}", t.fahrenheit), "69.8");
    }
}
