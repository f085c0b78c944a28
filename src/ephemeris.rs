//! Position providers: the only boundary between the engine and astronomy.

use chrono::{DateTime, Utc};

use crate::angles::{deg_to_rad, normalize_angle};
use crate::error::VedicError;
use crate::types::{Body, Location};

pub const J2000_JD: f64 = 2_451_545.0;
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Source of geocentric (or topocentric) ecliptic longitudes in degrees.
///
/// Implementations must be deterministic functions of their inputs.
pub trait PositionProvider {
    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<f64, VedicError>;

    fn moon_longitude(&self, instant: DateTime<Utc>, location: &Location) -> Result<f64, VedicError> {
        self.longitude(Body::Moon, instant, location)
    }

    fn sun_longitude(&self, instant: DateTime<Utc>, location: &Location) -> Result<f64, VedicError> {
        self.longitude(Body::Sun, instant, location)
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<f64, VedicError> {
        (**self).longitude(body, instant, location)
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for Box<P> {
    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<f64, VedicError> {
        (**self).longitude(body, instant, location)
    }
}

/// Ask the provider for a longitude, rejecting non-finite values and
/// re-normalizing whatever comes back.
pub fn read_longitude<P: PositionProvider + ?Sized>(
    provider: &P,
    body: Body,
    instant: DateTime<Utc>,
    location: &Location,
) -> Result<f64, VedicError> {
    let lon = provider.longitude(body, instant, location)?;
    if !lon.is_finite() {
        return Err(VedicError::provider(
            body,
            format!("non-finite longitude {lon} at {instant}"),
        ));
    }
    Ok(normalize_angle(lon))
}

pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

pub fn centuries_since_j2000(instant: DateTime<Utc>) -> f64 {
    (julian_day(instant) - J2000_JD) / DAYS_PER_CENTURY
}

/// Constant (or uniformly moving) longitudes.
///
/// With non-zero speeds each body advances linearly from `epoch`, which is
/// enough to exercise rate estimation without an ephemeris.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPositions {
    pub sun: f64,
    pub moon: f64,
    /// Degrees per hour.
    pub sun_speed: f64,
    /// Degrees per hour.
    pub moon_speed: f64,
    pub epoch: DateTime<Utc>,
}

impl FixedPositions {
    pub fn new(sun: f64, moon: f64) -> Self {
        Self {
            sun,
            moon,
            sun_speed: 0.0,
            moon_speed: 0.0,
            epoch: DateTime::<Utc>::default(),
        }
    }

    pub fn with_speeds(mut self, sun_speed: f64, moon_speed: f64, epoch: DateTime<Utc>) -> Self {
        self.sun_speed = sun_speed;
        self.moon_speed = moon_speed;
        self.epoch = epoch;
        self
    }
}

impl PositionProvider for FixedPositions {
    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _location: &Location,
    ) -> Result<f64, VedicError> {
        let hours = (instant - self.epoch).num_milliseconds() as f64 / 3_600_000.0;
        let lon = match body {
            Body::Sun => self.sun + self.sun_speed * hours,
            Body::Moon => self.moon + self.moon_speed * hours,
        };
        Ok(normalize_angle(lon))
    }
}

/// Low-precision geocentric Sun and Moon from mean elements plus the
/// principal periodic terms (Meeus, ch. 25 and 47).
///
/// Sun is good to about 0.01 deg, Moon to about 0.3 deg over a few centuries
/// around J2000. Observer location is ignored. An optional linear ayanamsha
/// converts to sidereal longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeanEphemeris {
    pub ayanamsha: Option<Ayanamsha>,
}

/// Linear precession offset: `at_j2000 + per_century * T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ayanamsha {
    pub at_j2000: f64,
    pub per_century: f64,
}

impl Ayanamsha {
    pub const LAHIRI: Ayanamsha = Ayanamsha {
        at_j2000: 23.853,
        per_century: 1.397,
    };

    pub fn degrees(&self, t: f64) -> f64 {
        self.at_j2000 + self.per_century * t
    }
}

impl MeanEphemeris {
    pub fn tropical() -> Self {
        Self { ayanamsha: None }
    }

    pub fn sidereal(ayanamsha: Ayanamsha) -> Self {
        Self {
            ayanamsha: Some(ayanamsha),
        }
    }

    pub fn sun_tropical(t: f64) -> f64 {
        let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
        let m = deg_to_rad(357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t);
        let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
            + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
            + 0.000_289 * (3.0 * m).sin();
        let omega = deg_to_rad(125.04 - 1934.136 * t);
        normalize_angle(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
    }

    pub fn moon_tropical(t: f64) -> f64 {
        let lp = 218.316_447_7 + 481_267.881_234_21 * t;
        let d = deg_to_rad(297.850_192_1 + 445_267.111_403_4 * t);
        let m = deg_to_rad(357.529_109_2 + 35_999.050_290_9 * t);
        let mp = deg_to_rad(134.963_396_4 + 477_198.867_505_5 * t);
        let f = deg_to_rad(93.272_095_0 + 483_202.017_523_3 * t);

        let terms = 6.288_774 * mp.sin()
            + 1.274_027 * (2.0 * d - mp).sin()
            + 0.658_314 * (2.0 * d).sin()
            + 0.213_618 * (2.0 * mp).sin()
            - 0.185_116 * m.sin()
            - 0.114_332 * (2.0 * f).sin()
            + 0.058_793 * (2.0 * d - 2.0 * mp).sin()
            + 0.057_066 * (2.0 * d - m - mp).sin()
            + 0.053_322 * (2.0 * d + mp).sin()
            + 0.045_758 * (2.0 * d - m).sin()
            - 0.040_923 * (m - mp).sin()
            - 0.034_720 * d.sin()
            - 0.030_383 * (m + mp).sin();
        normalize_angle(lp + terms)
    }
}

impl PositionProvider for MeanEphemeris {
    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _location: &Location,
    ) -> Result<f64, VedicError> {
        let t = centuries_since_j2000(instant);
        let tropical = match body {
            Body::Sun => Self::sun_tropical(t),
            Body::Moon => Self::moon_tropical(t),
        };
        let offset = self.ayanamsha.map_or(0.0, |a| a.degrees(t));
        Ok(normalize_angle(tropical - offset))
    }
}
