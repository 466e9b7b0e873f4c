//! The unprocessed METAR payload returned by the AVWX service.
//!
//! Field names follow the service's JSON contract (`Flight-Rules`, `Cloud-List`, ...).
//! Every field is optional in practice: stations omit values they do not report,
//! and the service sends `null` for some of them. Both cases deserialize to an
//! empty value so that decoding never has to deal with a missing field.

use serde::{Deserialize, Deserializer, Serialize};

/// A single station's METAR as delivered by the service, before any decoding.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawWeatherRecord {
    /// Altimeter setting in hundredths of inHg (e.g. `"2992"`).
    #[serde(deserialize_with = "null_as_default")]
    pub altimeter: String,
    /// Dew point in degrees Celsius.
    #[serde(deserialize_with = "null_as_default")]
    pub dewpoint: String,
    /// Flight rules category (`VFR`, `MVFR`, `IFR`, `LIFR`).
    #[serde(rename = "Flight-Rules", deserialize_with = "null_as_default")]
    pub flight_rules: String,
    /// The complete encoded report.
    #[serde(rename = "Raw-Report", deserialize_with = "null_as_default")]
    pub raw_report: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remarks: String,
    /// ICAO identifier echoed back by the service.
    #[serde(deserialize_with = "null_as_default")]
    pub station: String,
    /// Temperature in degrees Celsius.
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: String,
    /// Observation time as encoded in the report (e.g. `"211753Z"`).
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    /// Visibility in statute miles.
    #[serde(deserialize_with = "null_as_default")]
    pub visibility: String,
    /// Wind direction in degrees, or `VRB` for variable winds.
    #[serde(rename = "Wind-Direction", deserialize_with = "null_as_default")]
    pub wind_direction: String,
    #[serde(rename = "Wind-Gust", deserialize_with = "null_as_default")]
    pub wind_gust: String,
    #[serde(rename = "Wind-Speed", deserialize_with = "null_as_default")]
    pub wind_speed: String,
    /// Cloud layers as `[coverage, height in hundreds of feet, optional cloud type]`.
    #[serde(rename = "Cloud-List", deserialize_with = "null_layers_as_empty")]
    pub cloud_layers: Vec<Vec<String>>,
    /// Encoded weather phenomena such as `-RA`, `+TSRA` or `VCSH`.
    #[serde(rename = "Other-List", deserialize_with = "null_items_as_empty")]
    pub conditions: Vec<String>,
    /// Error message embedded in an otherwise successful response.
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(deserialize_with = "null_as_default")]
    pub info: StationInfo,
}

/// Station metadata included when the request asks for `options=info`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "PascalCase")]
pub struct StationInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of strings where the list itself or any element may be `null`.
fn null_items_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Cloud layers with `null` tolerated at every level. A `null` layer becomes an empty one.
fn null_layers_as_empty<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let layers = Option::<Vec<Option<Vec<Option<String>>>>>::deserialize(deserializer)?;
    Ok(layers
        .unwrap_or_default()
        .into_iter()
        .map(|layer| {
            layer
                .unwrap_or_default()
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect()
        })
        .collect())
}
