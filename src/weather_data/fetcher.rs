use crate::stations::station_code::StationCode;
use crate::types::raw_record::RawWeatherRecord;
use crate::weather_data::error::FetchError;
use crate::weather_data::source::MetarSource;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// The result of fetching one station, tagged with the station it was requested for.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(StationCode, RawWeatherRecord),
    Failure(StationCode, FetchError),
}

impl FetchOutcome {
    pub fn new(station: StationCode, result: Result<RawWeatherRecord, FetchError>) -> Self {
        match result {
            Ok(record) => FetchOutcome::Success(station, record),
            Err(error) => FetchOutcome::Failure(station, error),
        }
    }

    pub fn station(&self) -> &StationCode {
        match self {
            FetchOutcome::Success(station, _) | FetchOutcome::Failure(station, _) => station,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(..))
    }

    pub fn into_parts(self) -> (StationCode, Result<RawWeatherRecord, FetchError>) {
        match self {
            FetchOutcome::Success(station, record) => (station, Ok(record)),
            FetchOutcome::Failure(station, error) => (station, Err(error)),
        }
    }
}

/// Fetches many stations concurrently, one task per station.
pub struct WeatherFetcher<S> {
    source: Arc<S>,
    timeout: Option<Duration>,
}

impl<S: MetarSource> WeatherFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            timeout: None,
        }
    }

    /// Bounds every individual request. Without a timeout a hung request holds up the batch.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches every station in `stations` and returns one outcome per entry, in the
    /// order the fetches completed.
    ///
    /// Duplicate stations are fetched independently. A failing or panicking fetch only
    /// produces a [`FetchOutcome::Failure`] for its own station.
    pub async fn fetch_all(&self, stations: &[StationCode]) -> Vec<FetchOutcome> {
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::with_capacity(stations.len());

        for station in stations {
            let source = Arc::clone(&self.source);
            let timeout = self.timeout;
            let task_station = station.clone();

            let handle = tasks.spawn(async move {
                let start = Instant::now();
                let result = match timeout {
                    Some(limit) => tokio::time::timeout(limit, source.fetch(&task_station))
                        .await
                        .unwrap_or(Err(FetchError::Timeout(limit))),
                    None => source.fetch(&task_station).await,
                };
                if result.is_ok() {
                    info!(
                        "Fetched: {} in {:.2}s",
                        task_station,
                        start.elapsed().as_secs_f64()
                    );
                }
                FetchOutcome::new(task_station, result)
            });
            pending.insert(handle.id(), station.clone());
        }

        let mut outcomes = Vec::with_capacity(stations.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    pending.remove(&id);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    if let Some(station) = pending.remove(&e.id()) {
                        outcomes.push(FetchOutcome::Failure(station, FetchError::TaskJoin(e)));
                    }
                }
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    struct EchoSource;

    impl MetarSource for EchoSource {
        async fn fetch(&self, station: &StationCode) -> Result<RawWeatherRecord, FetchError> {
            match station.as_str() {
                "KBAD" => Err(FetchError::HttpStatus {
                    url: format!("test://{}", station),
                    status: StatusCode::NOT_FOUND,
                }),
                "KBOM" => panic!("source blew up"),
                "KSLO" => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(RawWeatherRecord::default())
                }
                _ => Ok(RawWeatherRecord {
                    station: station.to_string(),
                    ..Default::default()
                }),
            }
        }
    }

    fn codes(inputs: &[&str]) -> Vec<StationCode> {
        inputs.iter().map(|s| StationCode::new(s).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_one_outcome_per_station() {
        let fetcher = WeatherFetcher::new(EchoSource);
        let stations = codes(&["KJFK", "KBAD", "EGLL", "KJFK"]);

        let outcomes = fetcher.fetch_all(&stations).await;
        assert_eq!(outcomes.len(), 4);

        let mut seen: Vec<&str> = outcomes.iter().map(|o| o.station().as_str()).collect();
        seen.sort();
        assert_eq!(seen, ["EGLL", "KBAD", "KJFK", "KJFK"]);

        for outcome in &outcomes {
            assert_eq!(outcome.is_success(), outcome.station().as_str() != "KBAD");
        }
    }

    #[tokio::test]
    async fn test_panicking_fetch_is_isolated() {
        let fetcher = WeatherFetcher::new(EchoSource);
        let outcomes = fetcher.fetch_all(&codes(&["KBOM", "KSFO"])).await;
        assert_eq!(outcomes.len(), 2);

        for outcome in outcomes {
            match outcome {
                FetchOutcome::Failure(station, FetchError::TaskJoin(_)) => {
                    assert_eq!(station.as_str(), "KBOM")
                }
                FetchOutcome::Success(station, record) => {
                    assert_eq!(station.as_str(), "KSFO");
                    assert_eq!(record.station, "KSFO");
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_only_the_slow_station() {
        let fetcher =
            WeatherFetcher::new(EchoSource).with_timeout(Some(Duration::from_millis(500)));
        let outcomes = fetcher.fetch_all(&codes(&["KSLO", "KORD"])).await;

        for outcome in outcomes {
            match outcome.into_parts() {
                (station, Err(FetchError::Timeout(limit))) => {
                    assert_eq!(station.as_str(), "KSLO");
                    assert_eq!(limit, Duration::from_millis(500));
                }
                (station, Ok(_)) => assert_eq!(station.as_str(), "KORD"),
                (station, Err(e)) => panic!("unexpected error for {}: {}", station, e),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let fetcher = WeatherFetcher::new(EchoSource);
        assert!(fetcher.fetch_all(&[]).await.is_empty());
    }
}
