use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VedicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Sun => f.write_str("Sun"),
            Body::Moon => f.write_str("Moon"),
        }
    }
}

/// Observer location in degrees. `(0, 0)` is the geocentric approximation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One calendar unit resolved for an instant.
///
/// `index` is 1-based, `progress` is a percentage in `[0, 100)`.
/// `minutes_to_next` is `None` when no usable rate could be estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisionResult {
    pub index: u32,
    pub progress: f64,
    pub sub_quarter: Option<u32>,
    pub minutes_to_next: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Paksha::Shukla => "Shukla",
            Paksha::Krishna => "Krishna",
        }
    }

    pub const fn is_waxing(self) -> bool {
        matches!(self, Paksha::Shukla)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BreathPhase {
    Inhale,
    Exhale,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraInfo {
    pub result: DivisionResult,
    pub name: &'static str,
    pub moon_longitude: f64,
    pub rashi: u32,
    pub rashi_name: &'static str,
}

impl NakshatraInfo {
    pub fn pada(&self) -> u32 {
        self.result.sub_quarter.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiInfo {
    pub result: DivisionResult,
    pub name: &'static str,
    pub paksha: Paksha,
    /// 1-15 within the paksha.
    pub tithi_in_paksha: u32,
    pub elongation: f64,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MasaInfo {
    pub result: DivisionResult,
    pub name: &'static str,
    pub sun_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MuhurtaInfo {
    pub result: DivisionResult,
    pub name: &'static str,
    pub minutes_since_day_start: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PranaInfo {
    pub result: DivisionResult,
    pub breath_phase: BreathPhase,
    /// Percentage through the current inhale or exhale, `[0, 100)`.
    pub breath_phase_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VedicTime {
    pub instant: DateTime<Utc>,
    pub location: Location,
    pub sun_longitude: Option<f64>,
    pub moon_longitude: Option<f64>,
    pub elongation: Option<f64>,
    /// `elongation / 360`: 0 is new moon, 0.5 full moon.
    pub moon_phase: Option<f64>,
    pub paksha: Option<Paksha>,
    pub tithi: Result<TithiInfo, VedicError>,
    pub nakshatra: Result<NakshatraInfo, VedicError>,
    pub masa: Result<MasaInfo, VedicError>,
    pub muhurta: Result<MuhurtaInfo, VedicError>,
    pub prana: Result<PranaInfo, VedicError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlmanacConfig {
    pub start: NaiveDate,
    pub days: u32,
    pub sample_time: NaiveTime,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            days: 30,
            sample_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlmanacDay {
    pub date: NaiveDate,
    pub time: VedicTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlmanacMetadata {
    pub generated_at: String,
    pub total_days: usize,
    pub incomplete_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Almanac {
    pub config: AlmanacConfig,
    pub days: Vec<AlmanacDay>,
    pub metadata: AlmanacMetadata,
}
