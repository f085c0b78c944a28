use chrono::{DateTime, Utc};

use crate::division::{Division, DivisionSpec};
use crate::ephemeris::{read_longitude, PositionProvider};
use crate::error::VedicError;
use crate::rate::{AngularQuantity, RateEstimator};
use crate::types::{Body, Location, MasaInfo};

pub const MASA_COUNT: u32 = 12;

pub static MASA_NAMES: [&str; 12] = [
    "Chaitra",
    "Vaishakha",
    "Jyeshtha",
    "Ashadha",
    "Shravana",
    "Bhadrapada",
    "Ashwin",
    "Kartika",
    "Margashirsha",
    "Pausha",
    "Magha",
    "Phalguna",
];

pub fn masa_spec() -> DivisionSpec {
    DivisionSpec::angular(MASA_COUNT)
}

/// Fixed 30 deg solar segments from Mesha = Chaitra. Adhika months are not detected.
pub fn masa_from_sun_longitude(sun_longitude: f64) -> Result<Division, VedicError> {
    masa_spec().map(sun_longitude)
}

pub fn masa_name(index: u32) -> &'static str {
    MASA_NAMES[((index.max(1) - 1) % MASA_COUNT) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MasaCalculator {
    pub rate: RateEstimator,
}

impl MasaCalculator {
    pub fn new(rate: RateEstimator) -> Self {
        Self { rate }
    }

    pub fn from_longitude<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        sun_longitude: f64,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<MasaInfo, VedicError> {
        let division = masa_from_sun_longitude(sun_longitude)?;
        let eta = self.rate.eta(
            provider,
            AngularQuantity::Sun,
            instant,
            location,
            sun_longitude,
            division.remaining,
        );
        Ok(MasaInfo {
            result: division.into_result(eta),
            name: masa_name(division.index),
            sun_longitude,
        })
    }

    pub fn calculate<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<MasaInfo, VedicError> {
        let sun = read_longitude(provider, Body::Sun, instant, location)?;
        self.from_longitude(provider, sun, instant, location)
    }
}
