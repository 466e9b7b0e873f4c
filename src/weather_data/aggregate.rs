//! Reassembles fetch outcomes, which arrive in completion order, into input order.

use crate::decoder::decode_report;
use crate::stations::station_code::StationCode;
use crate::types::raw_record::RawWeatherRecord;
use crate::types::report::DecodedReport;
use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::FetchOutcome;
use log::error;
use std::collections::HashMap;

/// Every station's outcome, keyed by station and walkable in the requested order.
///
/// The map holds one slot per unique station code. When a station was requested more
/// than once, the outcome that arrived last wins and every occurrence in the input
/// resolves to it.
#[derive(Debug)]
pub struct Aggregate {
    order: Vec<StationCode>,
    outcomes: HashMap<StationCode, Result<RawWeatherRecord, FetchError>>,
}

/// One entry of the input order together with what was fetched for it.
#[derive(Debug, Clone, Copy)]
pub struct StationResult<'a> {
    pub station: &'a StationCode,
    pub outcome: Result<&'a RawWeatherRecord, &'a FetchError>,
}

/// A decoded report, or the reason there is none, for one entry of the input order.
#[derive(Debug)]
pub struct StationReport<'a> {
    pub station: &'a StationCode,
    pub report: Result<DecodedReport, &'a FetchError>,
}

impl Aggregate {
    /// Consumes every outcome of a batch. Failures are logged as they are collected.
    pub fn collect<I>(order: &[StationCode], outcomes: I) -> Self
    where
        I: IntoIterator<Item = FetchOutcome>,
    {
        let mut map = HashMap::with_capacity(order.len());
        for outcome in outcomes {
            let (station, result) = outcome.into_parts();
            if let Err(e) = &result {
                error!("Error reading metar for station {}: {}", station, e);
            }
            map.insert(station, result);
        }
        Aggregate {
            order: order.to_vec(),
            outcomes: map,
        }
    }

    /// Walks the requested order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = StationResult<'_>> + '_ {
        self.order.iter().filter_map(move |station| {
            self.outcomes.get(station).map(|result| StationResult {
                station,
                outcome: result.as_ref(),
            })
        })
    }

    /// Successfully fetched records, in input order.
    pub fn records(&self) -> impl Iterator<Item = (&StationCode, &RawWeatherRecord)> + '_ {
        self.iter()
            .filter_map(|entry| entry.outcome.ok().map(|record| (entry.station, record)))
    }

    /// Failed stations, in input order.
    pub fn failures(&self) -> impl Iterator<Item = (&StationCode, &FetchError)> + '_ {
        self.iter()
            .filter_map(|entry| entry.outcome.err().map(|error| (entry.station, error)))
    }

    /// Decodes every successful record, keeping failures in place.
    pub fn reports(&self) -> Vec<StationReport<'_>> {
        self.iter()
            .map(|entry| StationReport {
                station: entry.station,
                report: entry.outcome.map(decode_report),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.records().count()
    }
}
