use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::angles::{circular_difference, normalize_angle};
use crate::ephemeris::{read_longitude, PositionProvider};
use crate::error::VedicError;
use crate::types::{Body, Location};

pub const DEFAULT_SAMPLE_MINUTES: i64 = 60;

/// An ecliptic angle that can be re-sampled through a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngularQuantity {
    Sun,
    Moon,
    /// `normalize(moon - sun)`.
    Elongation,
}

impl AngularQuantity {
    pub fn sample<P: PositionProvider + ?Sized>(
        self,
        provider: &P,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<f64, VedicError> {
        match self {
            AngularQuantity::Sun => read_longitude(provider, Body::Sun, instant, location),
            AngularQuantity::Moon => read_longitude(provider, Body::Moon, instant, location),
            AngularQuantity::Elongation => {
                let moon = read_longitude(provider, Body::Moon, instant, location)?;
                let sun = read_longitude(provider, Body::Sun, instant, location)?;
                Ok(normalize_angle(moon - sun))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEstimator {
    pub sample_interval: Duration,
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self {
            sample_interval: Duration::minutes(DEFAULT_SAMPLE_MINUTES),
        }
    }
}

/// Forward speed in degrees/hour from two samples `hours` apart.
///
/// Only forward motion is usable for an ETA: zero, negative or non-finite
/// speeds are reported as [`VedicError::RateUnavailable`].
pub fn speed_from_samples(first: f64, second: f64, hours: f64) -> Result<f64, VedicError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(VedicError::RateUnavailable(format!(
            "sample interval must be positive, got {hours} h"
        )));
    }
    let speed = circular_difference(second, first) / hours;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(VedicError::RateUnavailable(format!(
            "unusable speed {speed} deg/h"
        )));
    }
    Ok(speed)
}

/// Minutes until `degrees_remaining` is covered at `speed` deg/h.
pub fn minutes_to_next(degrees_remaining: f64, speed: f64) -> Option<f64> {
    if !speed.is_finite() || speed <= 0.0 || !degrees_remaining.is_finite() {
        return None;
    }
    Some(degrees_remaining.max(0.0) / speed * 60.0)
}

impl RateEstimator {
    pub fn new(sample_interval: Duration) -> Self {
        Self { sample_interval }
    }

    pub fn interval_hours(&self) -> f64 {
        self.sample_interval.num_milliseconds() as f64 / 3_600_000.0
    }

    /// Degrees/hour for `quantity` at `instant`, given its value `current`.
    pub fn speed<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        quantity: AngularQuantity,
        instant: DateTime<Utc>,
        location: &Location,
        current: f64,
    ) -> Result<f64, VedicError> {
        let later = instant
            .checked_add_signed(self.sample_interval)
            .ok_or_else(|| VedicError::RateUnavailable("sample instant out of range".into()))?;
        let next = quantity
            .sample(provider, later, location)
            .map_err(|e| VedicError::RateUnavailable(format!("second sample failed: {e}")))?;
        speed_from_samples(current, next, self.interval_hours())
    }

    /// ETA in minutes to the next boundary, `None` when no rate is available.
    pub fn eta<P: PositionProvider + ?Sized>(
        &self,
        provider: &P,
        quantity: AngularQuantity,
        instant: DateTime<Utc>,
        location: &Location,
        current: f64,
        degrees_remaining: f64,
    ) -> Option<f64> {
        match self.speed(provider, quantity, instant, location, current) {
            Ok(speed) => minutes_to_next(degrees_remaining, speed),
            Err(err) => {
                debug!(?quantity, %instant, error = %err, "ETA unknown");
                None
            }
        }
    }
}
