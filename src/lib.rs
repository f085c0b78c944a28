pub mod almanac;
pub mod angles;
pub mod config;
pub mod division;
pub mod ephemeris;
pub mod error;
pub mod logging;
pub mod masa;
pub mod muhurta;
pub mod nakshatra;
pub mod rate;
pub mod tithi;
pub mod types;
pub mod vedic_time;

pub use almanac::{almanac_dates, generate_almanac};

pub use angles::{
    circular_difference, deg_to_rad, division_index_and_remainder, normalize_angle, rad_to_deg,
    FULL_CIRCLE,
};

pub use config::{load_config, parse_config, write_config, EngineConfig};

pub use division::{Division, DivisionSpec, QuantityKind, DEFAULT_SUB_QUARTERS};

pub use ephemeris::{
    julian_day, read_longitude, Ayanamsha, FixedPositions, MeanEphemeris, PositionProvider,
};

pub use error::VedicError;

pub use masa::{masa_from_sun_longitude, masa_name, MasaCalculator, MASA_NAMES};

pub use muhurta::{
    breath_phase, minutes_since_day_start, muhurta_name, MuhurtaCalculator, PranaCalculator,
    MUHURTA_COUNT, PRANA_COUNT,
};

pub use nakshatra::{
    moon_rashi, nakshatra_from_longitude, nakshatra_name, rashi_name, NakshatraCalculator,
    NAKSHATRA_COUNT, NAKSHATRA_NAMES, NAKSHATRA_WIDTH, RASHI_NAMES,
};

pub use rate::{minutes_to_next, speed_from_samples, AngularQuantity, RateEstimator};

pub use tithi::{
    elongation, paksha_for_tithi, tithi_display_name, tithi_from_elongation, tithi_name,
    TithiCalculator, TITHI_COUNT, TITHI_NAMES, TITHI_WIDTH,
};

pub use types::{
    Almanac, AlmanacConfig, AlmanacDay, AlmanacMetadata, Body, BreathPhase, DivisionResult,
    Location, MasaInfo, MuhurtaInfo, NakshatraInfo, Paksha, PranaInfo, TithiInfo, VedicTime,
};

pub use vedic_time::VedicTimeAggregator;
