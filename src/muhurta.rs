use chrono::{DateTime, TimeZone, Timelike};

use crate::division::DivisionSpec;
use crate::error::VedicError;
use crate::types::{BreathPhase, MuhurtaInfo, PranaInfo};

pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const MUHURTA_COUNT: u32 = 30;
pub const MUHURTA_MINUTES: f64 = MINUTES_PER_DAY / MUHURTA_COUNT as f64;
pub const PRANA_COUNT: u32 = 21_600;
pub const PRANA_MINUTES: f64 = MINUTES_PER_DAY / PRANA_COUNT as f64;
pub const DEFAULT_PRANAS_PER_BREATH: f64 = 1.0;

pub static MUHURTA_NAMES: [&str; 30] = [
    "Rudra",
    "Ahi",
    "Mitra",
    "Pitri",
    "Vasu",
    "Vara",
    "Vishvedeva",
    "Vidhi",
    "Satamukhi",
    "Puruhuta",
    "Vahni",
    "Naktanakara",
    "Varuna",
    "Aryaman",
    "Bhaga",
    "Girisha",
    "Ajapada",
    "Ahirbudhnya",
    "Pushya",
    "Ashvini",
    "Yama",
    "Agni",
    "Vidhatri",
    "Kanda",
    "Aditi",
    "Amrita",
    "Vishnu",
    "Dyumadgadyuti",
    "Brahma",
    "Samudra",
];

pub fn muhurta_spec() -> DivisionSpec {
    DivisionSpec::linear(MUHURTA_MINUTES, MUHURTA_COUNT)
}

pub fn prana_spec() -> DivisionSpec {
    DivisionSpec::linear(PRANA_MINUTES, PRANA_COUNT)
}

pub fn muhurta_name(index: u32) -> &'static str {
    MUHURTA_NAMES[((index.max(1) - 1) % MUHURTA_COUNT) as usize]
}

/// Minutes elapsed since `day_start_minutes` past local midnight, wrapped
/// into one day. Local means the time zone `dt` carries.
pub fn minutes_since_day_start<Tz: TimeZone>(dt: &DateTime<Tz>, day_start_minutes: f64) -> f64 {
    let secs = dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 / 1e9;
    let r = (secs / 60.0 - day_start_minutes).rem_euclid(MINUTES_PER_DAY);
    if r >= MINUTES_PER_DAY {
        0.0
    } else {
        r
    }
}

fn is_whole(x: f64) -> bool {
    x >= 1.0 && (x - x.round()).abs() <= 1e-9 * x
}

/// A breath period must be a whole number of pranas or a whole fraction of
/// one, so that every cycle restarts on a prana boundary.
pub fn validate_breath_period(pranas_per_breath: f64) -> Result<(), VedicError> {
    let p = pranas_per_breath;
    let nested = p.is_finite() && p > 0.0 && (is_whole(p) || is_whole(1.0 / p));
    if nested {
        Ok(())
    } else {
        Err(VedicError::Configuration(format!(
            "pranas_per_breath must be n or 1/n for a whole n, got {p}"
        )))
    }
}

/// Position inside the inhale/exhale cycle.
///
/// `elapsed_pranas` is the continuous prana count since day start. One breath
/// spans `pranas_per_breath` pranas: the first half is the inhale, the second
/// the exhale. Returns the phase and the percentage through it.
pub fn breath_phase(elapsed_pranas: f64, pranas_per_breath: f64) -> (BreathPhase, f64) {
    let cycle = elapsed_pranas.rem_euclid(pranas_per_breath) / pranas_per_breath;
    let cycle = if cycle >= 1.0 { 0.0 } else { cycle };
    if cycle < 0.5 {
        (BreathPhase::Inhale, cycle * 2.0 * 100.0)
    } else {
        (BreathPhase::Exhale, (cycle - 0.5) * 2.0 * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuhurtaCalculator {
    pub day_start_minutes: f64,
}

impl Default for MuhurtaCalculator {
    fn default() -> Self {
        Self {
            day_start_minutes: 0.0,
        }
    }
}

impl MuhurtaCalculator {
    pub fn new(day_start_minutes: f64) -> Self {
        Self { day_start_minutes }
    }

    pub fn from_elapsed(&self, minutes: f64) -> Result<MuhurtaInfo, VedicError> {
        let division = muhurta_spec().map(minutes)?;
        Ok(MuhurtaInfo {
            result: division.into_result(Some(division.remaining)),
            name: muhurta_name(division.index),
            minutes_since_day_start: minutes,
        })
    }

    pub fn calculate<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> Result<MuhurtaInfo, VedicError> {
        self.from_elapsed(minutes_since_day_start(dt, self.day_start_minutes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PranaCalculator {
    pub day_start_minutes: f64,
    pub pranas_per_breath: f64,
}

impl Default for PranaCalculator {
    fn default() -> Self {
        Self {
            day_start_minutes: 0.0,
            pranas_per_breath: DEFAULT_PRANAS_PER_BREATH,
        }
    }
}

impl PranaCalculator {
    pub fn new(day_start_minutes: f64, pranas_per_breath: f64) -> Self {
        Self {
            day_start_minutes,
            pranas_per_breath,
        }
    }

    pub fn from_elapsed(&self, minutes: f64) -> Result<PranaInfo, VedicError> {
        validate_breath_period(self.pranas_per_breath)?;
        let division = prana_spec().map(minutes)?;
        let elapsed_pranas = minutes / PRANA_MINUTES;
        let (phase, phase_progress) = breath_phase(elapsed_pranas, self.pranas_per_breath);
        Ok(PranaInfo {
            result: division.into_result(Some(division.remaining)),
            breath_phase: phase,
            breath_phase_progress: phase_progress,
        })
    }

    pub fn calculate<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> Result<PranaInfo, VedicError> {
        self.from_elapsed(minutes_since_day_start(dt, self.day_start_minutes))
    }
}
