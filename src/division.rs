//! Generic mapping from a continuous quantity to a bounded division.

use serde::Serialize;

use crate::angles::{self, FULL_CIRCLE};
use crate::error::VedicError;
use crate::types::DivisionResult;

pub const DEFAULT_SUB_QUARTERS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuantityKind {
    /// Ecliptic angle in degrees.
    Angular,
    /// Elapsed wall-clock minutes.
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisionSpec {
    pub width: f64,
    pub count: u32,
    pub sub_quarters: Option<u32>,
    pub kind: QuantityKind,
}

/// A value placed inside its division, before an ETA is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Division {
    /// 1-based.
    pub index: u32,
    pub remainder: f64,
    pub progress: f64,
    pub sub_quarter: Option<u32>,
    /// Span left until the next boundary, in the quantity's own units.
    pub remaining: f64,
}

impl DivisionSpec {
    /// `count` equal divisions of the full circle.
    pub fn angular(count: u32) -> Self {
        let width = if count == 0 {
            0.0
        } else {
            FULL_CIRCLE / count as f64
        };
        Self {
            width,
            count,
            sub_quarters: None,
            kind: QuantityKind::Angular,
        }
    }

    pub fn linear(width: f64, count: u32) -> Self {
        Self {
            width,
            count,
            sub_quarters: None,
            kind: QuantityKind::Linear,
        }
    }

    pub fn with_sub_quarters(mut self, sub_quarters: u32) -> Self {
        self.sub_quarters = Some(sub_quarters);
        self
    }

    /// Length of one full cycle of the quantity.
    pub fn period(&self) -> f64 {
        match self.kind {
            QuantityKind::Angular => FULL_CIRCLE,
            QuantityKind::Linear => self.width * self.count as f64,
        }
    }

    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(VedicError::Configuration(format!(
                "division width must be positive, got {}",
                self.width
            )));
        }
        if self.count == 0 {
            return Err(VedicError::Configuration(
                "division count must be positive".to_string(),
            ));
        }
        if self.sub_quarters == Some(0) {
            return Err(VedicError::Configuration(
                "sub-quarter count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Place `value` inside its division.
    ///
    /// The value is wrapped into one period first, so callers never need to
    /// pre-normalize. Fails only on an invalid spec.
    pub fn map(&self, value: f64) -> Result<Division, VedicError> {
        self.validate()?;
        if !value.is_finite() {
            return Err(VedicError::Configuration(format!(
                "cannot divide non-finite value {value}"
            )));
        }
        let wrapped = match self.kind {
            QuantityKind::Angular => angles::normalize_angle(value),
            QuantityKind::Linear => {
                let period = self.period();
                let r = value.rem_euclid(period);
                if r >= period {
                    0.0
                } else {
                    r
                }
            }
        };
        let (zero_based, remainder) =
            angles::division_index_and_remainder(wrapped, self.width, self.count);
        let progress = remainder / self.width * 100.0;
        let sub_quarter = self.sub_quarters.map(|q| {
            let quarter_width = self.width / q as f64;
            ((remainder / quarter_width).floor() as u32).min(q - 1) + 1
        });
        Ok(Division {
            index: zero_based + 1,
            remainder,
            progress,
            sub_quarter,
            remaining: self.width - remainder,
        })
    }
}

impl Division {
    pub fn into_result(self, minutes_to_next: Option<f64>) -> DivisionResult {
        DivisionResult {
            index: self.index,
            progress: self.progress,
            sub_quarter: self.sub_quarter,
            minutes_to_next,
        }
    }
}
