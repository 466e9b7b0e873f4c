//! Wind observations and the 16-point compass rose.

use std::fmt;

/// One of the 16 points of the compass rose.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

/// Inclusive upper bound of each bucket, in order. Anything above 349 wraps back to north.
const BUCKETS: [(i32, CompassPoint); 16] = [
    (11, CompassPoint::N),
    (34, CompassPoint::NNE),
    (56, CompassPoint::NE),
    (79, CompassPoint::ENE),
    (101, CompassPoint::E),
    (124, CompassPoint::ESE),
    (146, CompassPoint::SE),
    (169, CompassPoint::SSE),
    (191, CompassPoint::S),
    (214, CompassPoint::SSW),
    (236, CompassPoint::SW),
    (259, CompassPoint::WSW),
    (281, CompassPoint::W),
    (304, CompassPoint::WNW),
    (326, CompassPoint::NW),
    (349, CompassPoint::NNW),
];

impl CompassPoint {
    /// Maps a wind direction in degrees onto the compass rose.
    ///
    /// Returns `None` for anything outside `0..=360`.
    ///
    /// ```
    /// use metar::CompassPoint;
    ///
    /// assert_eq!(CompassPoint::from_degrees(12), Some(CompassPoint::NNE));
    /// assert_eq!(CompassPoint::from_degrees(350), Some(CompassPoint::N));
    /// assert_eq!(CompassPoint::from_degrees(361), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if !(0..=360).contains(&degrees) {
            return None;
        }
        let point = BUCKETS
            .iter()
            .find(|(upper, _)| degrees <= *upper)
            .map_or(CompassPoint::N, |(_, point)| *point);
        Some(point)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compass label for a direction in degrees; empty when the direction is out of range.
pub fn compass_label(degrees: i32) -> &'static str {
    CompassPoint::from_degrees(degrees).map_or("", |point| point.label())
}

/// Decoded surface wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedWind {
    /// Direction the wind blows from, in degrees. Zero when not reported or variable.
    pub direction: i32,
    /// Compass point for `direction`, `None` when out of range.
    pub compass: Option<CompassPoint>,
    /// Sustained speed in knots.
    pub speed: u32,
    /// Gust speed in knots, if any.
    pub gust: Option<u32>,
}

impl DecodedWind {
    pub fn compass_label(&self) -> &'static str {
        self.compass.map_or("", |point| point.label())
    }
}
