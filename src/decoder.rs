//! Turns a [`RawWeatherRecord`] into a [`DecodedReport`].
//!
//! Decoding is total: every field that fails to parse falls back to zero (or an
//! empty label) and decoding carries on with the next field. Fallbacks are logged
//! at debug level so they can be traced without changing the printed report.

use crate::types::cloud::decode_cloud_layers;
use crate::types::phenomenon::decode_phenomena;
use crate::types::raw_record::RawWeatherRecord;
use crate::types::report::{DecodedReport, Temperature};
use crate::types::wind::{CompassPoint, DecodedWind};
use log::debug;
use std::str::FromStr;

/// Decodes every field of `record`.
///
/// ```
/// use metar::{decode_report, RawWeatherRecord};
///
/// let record = RawWeatherRecord {
///     temperature: "20".to_string(),
///     wind_direction: "270".to_string(),
///     altimeter: "2992".to_string(),
///     ..Default::default()
/// };
/// let report = decode_report(&record);
/// assert_eq!(report.temperature.fahrenheit, 68.0);
/// assert_eq!(report.wind.compass_label(), "W");
/// assert_eq!(report.pressure_inhg, 29.92);
/// ```
pub fn decode_report(record: &RawWeatherRecord) -> DecodedReport {
    let error = if record.error.is_empty() {
        None
    } else {
        Some(record.error.clone())
    };

    DecodedReport {
        station: record.station.clone(),
        info: record.info.clone(),
        time: record.time.clone(),
        temperature: decode_temperature(&record.temperature, "temperature"),
        dewpoint: decode_temperature(&record.dewpoint, "dewpoint"),
        wind: decode_wind(
            &record.wind_direction,
            &record.wind_speed,
            &record.wind_gust,
        ),
        phenomena: decode_phenomena(&record.conditions),
        cloud_layers: decode_cloud_layers(&record.cloud_layers),
        visibility: record.visibility.clone(),
        pressure_inhg: decode_pressure(&record.altimeter),
        flight_rules: record.flight_rules.clone(),
        remarks: record.remarks.clone(),
        raw_report: record.raw_report.clone(),
        error,
    }
}

/// Decodes direction, speed and gust. Variable (`VRB`) or missing directions become 0°.
pub fn decode_wind(direction: &str, speed: &str, gust: &str) -> DecodedWind {
    let direction = parse_or_default::<i32>(direction, "wind direction");
    let gust = if gust.trim().is_empty() {
        None
    } else {
        gust.trim().parse::<u32>().ok()
    };

    DecodedWind {
        direction,
        compass: CompassPoint::from_degrees(direction),
        speed: parse_or_default::<u32>(speed, "wind speed"),
        gust,
    }
}

/// Decodes a temperature given in decimal degrees Celsius.
pub fn decode_temperature(celsius: &str, field: &str) -> Temperature {
    Temperature::from_celsius(parse_or_default::<f64>(celsius, field))
}

/// Converts an altimeter setting in hundredths of inHg into inHg.
pub fn decode_pressure(altimeter: &str) -> f64 {
    parse_or_default::<f64>(altimeter, "altimeter") / 100.0
}

fn parse_or_default<T>(raw: &str, field: &str) -> T
where
    T: FromStr + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            debug!("Could not parse {} '{}', using default", field, raw);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cloud::CloudType;
    use crate::types::phenomenon::Intensity;
    use crate::types::raw_record::StationInfo;

    fn sample_record() -> RawWeatherRecord {
        RawWeatherRecord {
            altimeter: "2986".to_string(),
            dewpoint: "18".to_string(),
            flight_rules: "IFR".to_string(),
            raw_report: "KMCO 121753Z 19012G22KT 2SM -RA +TSRA VCSH BKN020CB OVC045 24/18 A2986"
                .to_string(),
            remarks: "AO2 TSB32".to_string(),
            station: "KMCO".to_string(),
            temperature: "24".to_string(),
            time: "121753Z".to_string(),
            visibility: "2".to_string(),
            wind_direction: "190".to_string(),
            wind_gust: "22".to_string(),
            wind_speed: "12".to_string(),
            cloud_layers: vec![
                vec!["BKN".to_string(), "020".to_string(), "CB".to_string()],
                vec!["OVC".to_string(), "045".to_string()],
            ],
            conditions: vec!["-RA".to_string(), "+TSRA".to_string(), "VCSH".to_string()],
            error: String::new(),
            info: StationInfo {
                city: "Orlando".to_string(),
                country: "US".to_string(),
                name: "Orlando International Airport".to_string(),
                state: "FL".to_string(),
            },
        }
    }

    #[test]
    fn test_decode_full_record() {
        let report = decode_report(&sample_record());

        assert_eq!(report.station, "KMCO");
        assert_eq!(report.temperature.celsius, 24.0);
        assert_eq!(format!("{:.1}", report.temperature.fahrenheit), "75.2");
        assert_eq!(format!("{:.1}", report.dewpoint.fahrenheit), "64.4");
        assert_eq!(report.wind.direction, 190);
        assert_eq!(report.wind.compass_label(), "S");
        assert_eq!(report.wind.speed, 12);
        assert_eq!(report.wind.gust, Some(22));
        assert_eq!(format!("{:.2}", report.pressure_inhg), "29.86");
        assert_eq!(report.flight_rules, "IFR");
        assert_eq!(report.error, None);

        assert_eq!(report.phenomena.len(), 3);
        assert_eq!(report.phenomena[0].intensity, Intensity::Light);
        assert_eq!(report.phenomena[1].to_string(), "heavy thunderstorm with heavy rain");
        assert!(report.phenomena[2].vicinity);

        assert_eq!(report.cloud_layers.len(), 2);
        assert_eq!(report.cloud_layers[0].height_ft, 2000);
        assert_eq!(report.cloud_layers[0].cloud_type, Some(CloudType::Cumulonimbus));
        assert_eq!(report.cloud_layers[1].height_ft, 4500);
        assert_eq!(report.cloud_layers[1].cloud_type, None);
    }

    #[test]
    fn test_decode_empty_record_is_total() {
        let report = decode_report(&RawWeatherRecord::default());

        assert_eq!(report.temperature.celsius, 0.0);
        assert_eq!(report.temperature.fahrenheit, 32.0);
        assert_eq!(report.wind.direction, 0);
        assert_eq!(report.wind.compass_label(), "N");
        assert_eq!(report.wind.gust, None);
        assert_eq!(report.pressure_inhg, 0.0);
        assert!(report.phenomena.is_empty());
        assert!(report.cloud_layers.is_empty());
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_variable_wind_defaults_to_zero() {
        let wind = decode_wind("VRB", "03", "");
        assert_eq!(wind.direction, 0);
        assert_eq!(wind.speed, 3);
        assert_eq!(wind.gust, None);
    }

    #[test]
    fn test_out_of_range_direction_has_no_label() {
        let wind = decode_wind("400", "10", "bad");
        assert_eq!(wind.direction, 400);
        assert_eq!(wind.compass, None);
        assert_eq!(wind.compass_label(), "");
        assert_eq!(wind.gust, None);
    }

    #[test]
    fn test_negative_and_decimal_temperatures() {
        assert_eq!(decode_temperature("-40", "t").fahrenheit, -40.0);
        assert_eq!(decode_temperature("-2.5", "t").celsius, -2.5);
        assert_eq!(decode_temperature("M05", "t").celsius, 0.0);
    }

    #[test]
    fn test_embedded_error_is_carried() {
        let record = RawWeatherRecord {
            error: "Station Lookup Error".to_string(),
            ..Default::default()
        };
        let report = decode_report(&record);
        assert_eq!(report.error.as_deref(), Some("Station Lookup Error"));
        assert_eq!(report.to_string(), "Error: Station Lookup Error\n");
    }

    #[test]
    fn test_rendering() {
        let rendered = decode_report(&sample_record()).to_string();
        assert!(rendered.contains("Station:\tKMCO --  Orlando, FL -- Orlando International Airport"));
        assert!(rendered.contains("Temperature:\t75.2\u{00B0}F"));
        assert!(rendered.contains("Wind:     \t190\u{00B0} (S) @ 12KT Gusts to 22KT"));
        assert!(rendered.contains(
            "Conditions:\tlight rain -- heavy thunderstorm with heavy rain -- showers in vicinity"
        ));
        assert!(rendered.contains("Cloud Layers:\tBKN @ 2000FT (cumulonimbus)\tOVC @ 4500FT"));
        assert!(rendered.contains("Pressure:\t29.86inHg"));
        assert!(rendered.ends_with("Raw Report:\tKMCO 121753Z 19012G22KT 2SM -RA +TSRA VCSH BKN020CB OVC045 24/18 A2986\n"));
    }
}
