use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::muhurta::{validate_breath_period, DEFAULT_PRANAS_PER_BREATH, MINUTES_PER_DAY};
use crate::rate::{RateEstimator, DEFAULT_SAMPLE_MINUTES};
use crate::types::Location;

/// Longest rate sample interval: one day.
pub const MAX_RATE_SAMPLE_MINUTES: i64 = 1440;

/// Engine configuration (TOML).
///
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interval between the two longitude samples used for rate estimates.
    pub rate_sample_minutes: i64,

    /// Start of the civil day for muhurta/prana, in minutes after local
    /// midnight (e.g. 360 for a fixed 06:00 sunrise convention).
    pub day_start_minutes: f64,

    /// Pranas in one full inhale + exhale cycle: n or 1/n for a whole n.
    pub pranas_per_breath: f64,

    /// Worker threads for almanac batches. 0 means one per available CPU.
    pub worker_threads: usize,

    /// Observer location passed through to the position provider.
    pub location: Location,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate_sample_minutes: DEFAULT_SAMPLE_MINUTES,
            day_start_minutes: 0.0,
            pranas_per_breath: DEFAULT_PRANAS_PER_BREATH,
            worker_threads: 0,
            location: Location::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), VedicError> {
        let Location {
            latitude,
            longitude,
        } = self.location;
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(VedicError::Configuration(format!(
                "latitude must be within [-90, 90], got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(VedicError::Configuration(format!(
                "longitude must be within [-180, 180], got {longitude}"
            )));
        }
        if !(1..=MAX_RATE_SAMPLE_MINUTES).contains(&self.rate_sample_minutes) {
            return Err(VedicError::Configuration(format!(
                "rate_sample_minutes must be within [1, {MAX_RATE_SAMPLE_MINUTES}], got {}",
                self.rate_sample_minutes
            )));
        }
        if !self.day_start_minutes.is_finite()
            || !(0.0..MINUTES_PER_DAY).contains(&self.day_start_minutes)
        {
            return Err(VedicError::Configuration(format!(
                "day_start_minutes must be within [0, 1440), got {}",
                self.day_start_minutes
            )));
        }
        validate_breath_period(self.pranas_per_breath)
    }

    pub fn rate_estimator(&self) -> Result<RateEstimator, VedicError> {
        let interval = Duration::try_minutes(self.rate_sample_minutes).ok_or_else(|| {
            VedicError::Configuration(format!(
                "rate_sample_minutes out of range: {}",
                self.rate_sample_minutes
            ))
        })?;
        Ok(RateEstimator::new(interval))
    }

    pub fn effective_worker_threads(&self) -> usize {
        if self.worker_threads > 0 {
            self.worker_threads
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `EngineConfig::default()`.
pub fn load_config(path: &Path) -> Result<EngineConfig, VedicError> {
    if !path.exists() {
        let cfg = EngineConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| VedicError::ConfigFile(format!("read {}: {e}", path.display())))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<EngineConfig, VedicError> {
    let cfg: EngineConfig =
        toml::from_str(contents).map_err(|e| VedicError::ConfigFile(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn write_config(path: &Path, cfg: &EngineConfig) -> Result<(), VedicError> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg)
        .map_err(|e| VedicError::ConfigFile(format!("serialize config: {e}")))?;
    buf.push('\n');
    fs::write(path, buf)
        .map_err(|e| VedicError::ConfigFile(format!("write {}: {e}", path.display())))
}
