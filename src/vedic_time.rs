use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

use crate::angles::FULL_CIRCLE;
use crate::config::EngineConfig;
use crate::ephemeris::{read_longitude, PositionProvider};
use crate::error::VedicError;
use crate::masa::MasaCalculator;
use crate::muhurta::{MuhurtaCalculator, PranaCalculator};
use crate::nakshatra::NakshatraCalculator;
use crate::tithi::{elongation, tithi_display_name, TithiCalculator};
use crate::types::{Body, VedicTime};

/// Runs every calculator once per instant against a shared provider.
#[derive(Debug, Clone)]
pub struct VedicTimeAggregator<P> {
    provider: P,
    config: EngineConfig,
    nakshatra: NakshatraCalculator,
    tithi: TithiCalculator,
    masa: MasaCalculator,
    muhurta: MuhurtaCalculator,
    prana: PranaCalculator,
}

impl<P: PositionProvider> VedicTimeAggregator<P> {
    pub fn new(provider: P, config: EngineConfig) -> Result<Self, VedicError> {
        config.validate()?;
        let rate = config.rate_estimator()?;
        Ok(Self {
            provider,
            config,
            nakshatra: NakshatraCalculator::new(rate),
            tithi: TithiCalculator::new(rate),
            masa: MasaCalculator::new(rate),
            muhurta: MuhurtaCalculator::new(config.day_start_minutes),
            prana: PranaCalculator::new(config.day_start_minutes, config.pranas_per_breath),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot for `dt`. Muhurta and prana use the time zone `dt` carries.
    pub fn compute<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> VedicTime {
        let instant = dt.with_timezone(&Utc);
        let location = self.config.location;
        let sun = read_longitude(&self.provider, Body::Sun, instant, &location);
        let moon = read_longitude(&self.provider, Body::Moon, instant, &location);

        let tithi = match (&sun, &moon) {
            (Ok(s), Ok(m)) => {
                self.tithi
                    .from_longitudes(&self.provider, *s, *m, instant, &location)
            }
            (Err(e), _) | (_, Err(e)) => Err(e.clone()),
        };
        let nakshatra = moon.clone().and_then(|m| {
            self.nakshatra
                .from_longitude(&self.provider, m, instant, &location)
        });
        let masa = sun
            .clone()
            .and_then(|s| self.masa.from_longitude(&self.provider, s, instant, &location));

        let elong = match (&sun, &moon) {
            (Ok(s), Ok(m)) => Some(elongation(*m, *s)),
            _ => None,
        };

        let time = VedicTime {
            instant,
            location,
            sun_longitude: sun.ok(),
            moon_longitude: moon.ok(),
            elongation: elong,
            moon_phase: elong.map(|e| e / FULL_CIRCLE),
            paksha: tithi.as_ref().ok().map(|t| t.paksha),
            tithi,
            nakshatra,
            masa,
            muhurta: self.muhurta.calculate(dt),
            prana: self.prana.calculate(dt),
        };
        for err in time.errors() {
            warn!(%instant, error = %err, "calendar unit unavailable");
        }
        time
    }
}

impl VedicTime {
    pub fn is_complete(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn errors(&self) -> Vec<&VedicError> {
        [
            self.tithi.as_ref().err(),
            self.nakshatra.as_ref().err(),
            self.masa.as_ref().err(),
            self.muhurta.as_ref().err(),
            self.prana.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl fmt::Display for VedicTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format("%Y-%m-%d %H:%M:%S UTC"))?;
        match &self.tithi {
            Ok(t) => write!(
                f,
                " | tithi {} {} ({}) {:.1}%",
                t.result.index,
                tithi_display_name(t.result.index),
                t.paksha.name(),
                t.result.progress
            )?,
            Err(_) => f.write_str(" | tithi unavailable")?,
        }
        match &self.nakshatra {
            Ok(n) => write!(
                f,
                " | nakshatra {} {} pada {}",
                n.result.index,
                n.name,
                n.pada()
            )?,
            Err(_) => f.write_str(" | nakshatra unavailable")?,
        }
        match &self.masa {
            Ok(m) => write!(f, " | masa {}", m.name)?,
            Err(_) => f.write_str(" | masa unavailable")?,
        }
        match &self.muhurta {
            Ok(m) => write!(f, " | muhurta {} {}", m.result.index, m.name)?,
            Err(_) => f.write_str(" | muhurta unavailable")?,
        }
        match &self.prana {
            Ok(p) => write!(f, " | prana {} {:?}", p.result.index, p.breath_phase),
            Err(_) => f.write_str(" | prana unavailable"),
        }
    }
}
