use chrono::{DateTime, Utc};

use crate::angles::normalize_angle;
use crate::division::{Division, DivisionSpec};
use crate::ephemeris::{read_longitude, PositionProvider};
use crate::error::VedicError;
use crate::rate::{AngularQuantity, RateEstimator};
use crate::types::{Body, Location, Paksha, TithiInfo};

pub const TITHI_COUNT: u32 = 30;
pub const TITHI_WIDTH: f64 = 12.0;
pub const TITHIS_PER_PAKSHA: u32 = 15;

pub static TITHI_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

pub const AMAVASYA: &str = "Amavasya";

pub fn tithi_spec() -> DivisionSpec {
    DivisionSpec::angular(TITHI_COUNT)
}

pub fn elongation(moon_longitude: f64, sun_longitude: f64) -> f64 {
    normalize_angle(moon_longitude - sun_longitude)
}

pub fn tithi_from_elongation(elongation: f64) -> Result<Division, VedicError> {
    tithi_spec().map(elongation)
}

/// Table name for a 1-based tithi index: `(n - 1) mod 15`.
pub fn tithi_name(index: u32) -> &'static str {
    TITHI_NAMES[((index.max(1) - 1) % TITHIS_PER_PAKSHA) as usize]
}

/// Like [`tithi_name`], but the last tithi of the waning fortnight is
/// reported as Amavasya.
pub fn tithi_display_name(index: u32) -> &'static str {
    if index == TITHI_COUNT {
        AMAVASYA
    } else {
        tithi_name(index)
    }
}

pub fn paksha_for_tithi(index: u32) -> Paksha {
    if index <= TITHI_COUNT / 2 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    }
}

pub fn tithi_in_paksha(index: u32) -> u32 {
    (index.max(1) - 1) % TITHIS_PER_PAKSHA + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TithiCalculator {
    pub rate: RateEstimator,
}

impl TithiCalculator {
    pub fn new(rate: RateEstimator) -> Self {
        Self { rate }
    }

    pub fn from_longitudes<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        sun_longitude: f64,
        moon_longitude: f64,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<TithiInfo, VedicError> {
        let elong = elongation(moon_longitude, sun_longitude);
        let division = tithi_from_elongation(elong)?;
        let eta = self.rate.eta(
            provider,
            AngularQuantity::Elongation,
            instant,
            location,
            elong,
            division.remaining,
        );
        Ok(TithiInfo {
            result: division.into_result(eta),
            name: tithi_name(division.index),
            paksha: paksha_for_tithi(division.index),
            tithi_in_paksha: tithi_in_paksha(division.index),
            elongation: elong,
            sun_longitude,
            moon_longitude,
        })
    }

    pub fn calculate<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<TithiInfo, VedicError> {
        let sun = read_longitude(provider, Body::Sun, instant, location)?;
        let moon = read_longitude(provider, Body::Moon, instant, location)?;
        self.from_longitudes(provider, sun, moon, instant, location)
    }
}
