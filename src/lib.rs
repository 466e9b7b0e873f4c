mod decoder;
mod error;
mod metar;
mod stations;
mod types;
mod weather_data;

pub use decoder::{decode_pressure, decode_report, decode_temperature, decode_wind};
pub use error::MetarError;
pub use metar::*;

pub use stations::error::StationCodeError;
pub use stations::station_code::{normalize_all, StationCode, DEFAULT_COUNTRY_PREFIX};

pub use types::cloud::{decode_cloud_layers, CloudType, DecodedCloudLayer};
pub use types::phenomenon::{decode_phenomena, describe, DecodedPhenomenon, Intensity};
pub use types::raw_record::{RawWeatherRecord, StationInfo};
pub use types::report::{celsius_to_fahrenheit, DecodedReport, Temperature};
pub use types::wind::{compass_label, CompassPoint, DecodedWind};

pub use weather_data::aggregate::{Aggregate, StationReport, StationResult};
pub use weather_data::error::FetchError;
pub use weather_data::fetcher::{FetchOutcome, WeatherFetcher};
pub use weather_data::progress::{suspend_progress, Progress, TICK_INTERVAL};
pub use weather_data::source::{AvwxSource, MetarSource, DEFAULT_BASE_URL};
