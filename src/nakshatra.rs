use chrono::{DateTime, Utc};

use crate::division::{Division, DivisionSpec, DEFAULT_SUB_QUARTERS};
use crate::ephemeris::{read_longitude, PositionProvider};
use crate::error::VedicError;
use crate::rate::{AngularQuantity, RateEstimator};
use crate::types::{Body, Location, NakshatraInfo};

pub const NAKSHATRA_COUNT: u32 = 27;
pub const NAKSHATRA_WIDTH: f64 = 360.0 / 27.0;
pub const RASHI_COUNT: u32 = 12;
pub const RASHI_WIDTH: f64 = 30.0;

pub static NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishtha",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

pub static RASHI_NAMES: [&str; 12] = [
    "Mesha",
    "Vrishabha",
    "Mithuna",
    "Karka",
    "Simha",
    "Kanya",
    "Tula",
    "Vrishchika",
    "Dhanu",
    "Makara",
    "Kumbha",
    "Meena",
];

pub fn nakshatra_spec() -> DivisionSpec {
    DivisionSpec::angular(NAKSHATRA_COUNT).with_sub_quarters(DEFAULT_SUB_QUARTERS)
}

/// Name for a 1-based nakshatra index.
pub fn nakshatra_name(index: u32) -> &'static str {
    NAKSHATRA_NAMES[((index.max(1) - 1) % NAKSHATRA_COUNT) as usize]
}

pub fn nakshatra_from_longitude(longitude: f64) -> Result<Division, VedicError> {
    nakshatra_spec().map(longitude)
}

/// Rashi (1-12) of a longitude, 30 deg per sign starting at Mesha.
pub fn moon_rashi(longitude: f64) -> Result<u32, VedicError> {
    DivisionSpec::angular(RASHI_COUNT)
        .map(longitude)
        .map(|d| d.index)
}

/// Name for a 1-based rashi index.
pub fn rashi_name(index: u32) -> &'static str {
    RASHI_NAMES[((index.max(1) - 1) % RASHI_COUNT) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NakshatraCalculator {
    pub rate: RateEstimator,
}

impl NakshatraCalculator {
    pub fn new(rate: RateEstimator) -> Self {
        Self { rate }
    }

    /// Build the result from an already-known Moon longitude, sampling the
    /// provider only for the rate.
    pub fn from_longitude<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        moon_longitude: f64,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<NakshatraInfo, VedicError> {
        let division = nakshatra_from_longitude(moon_longitude)?;
        let eta = self.rate.eta(
            provider,
            AngularQuantity::Moon,
            instant,
            location,
            moon_longitude,
            division.remaining,
        );
        let rashi = moon_rashi(moon_longitude)?;
        Ok(NakshatraInfo {
            result: division.into_result(eta),
            name: nakshatra_name(division.index),
            moon_longitude,
            rashi,
            rashi_name: rashi_name(rashi),
        })
    }

    pub fn calculate<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<NakshatraInfo, VedicError> {
        let moon = read_longitude(provider, Body::Moon, instant, location)?;
        self.from_longitude(provider, moon, instant, location)
    }
}
