//! Main entry point: fetch and decode METARs for a batch of stations.

use crate::error::MetarError;
use crate::stations::station_code::{normalize_all, StationCode};
use crate::weather_data::aggregate::Aggregate;
use crate::weather_data::fetcher::WeatherFetcher;
use crate::weather_data::progress::{Progress, TICK_INTERVAL};
use crate::weather_data::source::{AvwxSource, MetarSource, DEFAULT_BASE_URL};
use bon::bon;
use reqwest::Client;
use std::time::Duration;

/// Client for fetching current METARs for many stations at once.
///
/// Each station is fetched on its own task; a failure for one station never affects
/// the others. Results come back as an [`Aggregate`] that walks the stations in the
/// order they were requested.
///
/// # Examples
///
/// ```no_run
/// # use metar::{Metar, MetarError, StationCode};
/// # async fn run() -> Result<(), MetarError> {
/// let client = Metar::builder().token("my-avwx-token").build()?;
/// let stations = [StationCode::new("jfk")?, StationCode::new("EGLL")?];
///
/// let batch = client.fetch(&stations).await;
/// for entry in batch.reports() {
///     match entry.report {
///         Ok(report) => println!("{}", report),
///         Err(e) => eprintln!("{}: {}", entry.station, e),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Metar<S = AvwxSource> {
    fetcher: WeatherFetcher<S>,
    show_progress: bool,
}

#[bon]
impl Metar<AvwxSource> {
    /// Creates a client backed by the AVWX REST API.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.base_url(..)`: service root, defaults to [`DEFAULT_BASE_URL`].
    /// * `.token(..)`: AVWX API token, sent with every request.
    /// * `.timeout(Duration)`: bound on each station's request. Unbounded by default.
    /// * `.progress(bool)`: show a spinner on stderr while fetching. Defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`MetarError::ClientBuild`] if the HTTP client cannot be initialized.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] token: Option<String>,
        timeout: Option<Duration>,
        #[builder(default = true)] progress: bool,
    ) -> Result<Self, MetarError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MetarError::ClientBuild)?;
        let source = AvwxSource::new(
            client,
            base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token,
        );

        Ok(Self {
            fetcher: WeatherFetcher::new(source).with_timeout(timeout),
            show_progress: progress,
        })
    }
}

impl<S: MetarSource> Metar<S> {
    /// Creates a client around any [`MetarSource`]. The spinner is off.
    pub fn with_source(source: S) -> Self {
        Self {
            fetcher: WeatherFetcher::new(source),
            show_progress: false,
        }
    }

    /// Bounds each station's request. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetcher = self.fetcher.with_timeout(timeout);
        self
    }

    /// The source every station is fetched from.
    pub fn source(&self) -> &S {
        self.fetcher.source()
    }

    /// Fetches every station concurrently and waits for all of them to finish.
    pub async fn fetch(&self, stations: &[StationCode]) -> Aggregate {
        let progress = if self.show_progress {
            Progress::start("Fetching METARs", TICK_INTERVAL)
        } else {
            Progress::hidden()
        };

        let outcomes = self.fetcher.fetch_all(stations).await;
        progress.finish().await;

        Aggregate::collect(stations, outcomes)
    }

    /// Normalizes raw airport identifiers, then fetches them.
    ///
    /// # Errors
    ///
    /// Returns [`MetarError::InvalidStationCode`] for the first malformed identifier.
    /// Nothing is fetched in that case.
    pub async fn fetch_codes<I, T>(&self, inputs: I) -> Result<Aggregate, MetarError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let stations = normalize_all(inputs)?;
        Ok(self.fetch(&stations).await)
    }
}
