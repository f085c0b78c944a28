use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;

use vedic_clock::masa::{masa_from_sun_longitude, masa_name, MasaCalculator};
use vedic_clock::muhurta::*;
use vedic_clock::nakshatra::*;
use vedic_clock::rate::RateEstimator;
use vedic_clock::tithi::*;
use vedic_clock::types::{Body, BreathPhase, Location, Paksha};
use vedic_clock::{FixedPositions, PositionProvider, VedicError};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 21, 0, 0, 0).unwrap()
}

/// Moon at 13.2 deg/day, Sun at ~0.9856 deg/day.
fn moving(sun: f64, moon: f64) -> FixedPositions {
    FixedPositions::new(sun, moon).with_speeds(0.041_07, 0.549_0, epoch())
}

struct FailingProvider {
    fail: Body,
}

impl PositionProvider for FailingProvider {
    fn longitude(&self, body: Body, _: DateTime<Utc>, _: &Location) -> Result<f64, VedicError> {
        if body == self.fail {
            Err(VedicError::provider(body, "offline"))
        } else {
            Ok(120.0)
        }
    }
}

/// Valid at `epoch()`, fails for any other instant.
struct FirstSampleOnly;

impl PositionProvider for FirstSampleOnly {
    fn longitude(&self, _: Body, instant: DateTime<Utc>, _: &Location) -> Result<f64, VedicError> {
        if instant == epoch() {
            Ok(100.0)
        } else {
            Err(VedicError::provider(Body::Moon, "timeout"))
        }
    }
}

// ── Nakshatra ──

#[test]
fn test_nakshatra_at_zero() {
    let d = nakshatra_from_longitude(0.0).unwrap();
    assert_eq!(d.index, 1);
    assert_eq!(d.progress, 0.0);
    assert_eq!(d.sub_quarter, Some(1));
}

#[test]
fn test_nakshatra_at_one_width() {
    let d = nakshatra_from_longitude(NAKSHATRA_WIDTH).unwrap();
    assert_eq!(d.index, 2);
    assert_approx!(d.progress, 0.0, 1e-9);
}

#[test]
fn test_nakshatra_just_below_360() {
    let d = nakshatra_from_longitude(359.999_999_9).unwrap();
    assert_eq!(d.index, 27);
    assert!(d.progress < 100.0);
    assert!(d.progress > 99.99);
    assert_eq!(d.sub_quarter, Some(4));
}

#[test]
fn test_nakshatra_bounds_sweep() {
    let mut lon = -720.0;
    while lon < 720.0 {
        let d = nakshatra_from_longitude(lon).unwrap();
        assert!((1..=27).contains(&d.index), "lon={}", lon);
        assert!((1..=4).contains(&d.sub_quarter.unwrap()), "lon={}", lon);
        assert!((0.0..100.0).contains(&d.progress), "lon={}", lon);
        lon += 0.37;
    }
}

#[test]
fn test_nakshatra_names() {
    assert_eq!(nakshatra_name(1), "Ashwini");
    assert_eq!(nakshatra_name(16), "Vishakha");
    assert_eq!(nakshatra_name(27), "Revati");
}

#[test]
fn test_nakshatra_calculator_eta() {
    let calc = NakshatraCalculator::default();
    let info = calc
        .calculate(&moving(50.0, 200.0), epoch(), &Location::default())
        .unwrap();
    assert_eq!(info.result.index, 16);
    assert_eq!(info.name, "Vishakha");
    assert_approx!(info.moon_longitude, 200.0, 1e-9);
    // 16th nakshatra ends at 213.333 deg
    let expected = (16.0 * NAKSHATRA_WIDTH - 200.0) / 0.549 * 60.0;
    assert_approx!(info.result.minutes_to_next.unwrap(), expected, 1e-3);
}

#[test]
fn test_nakshatra_eta_unknown_when_stationary() {
    let calc = NakshatraCalculator::default();
    let info = calc
        .calculate(&FixedPositions::new(50.0, 200.0), epoch(), &Location::default())
        .unwrap();
    assert_eq!(info.result.minutes_to_next, None);
    assert_eq!(info.result.index, 16);
}

#[test]
fn test_nakshatra_eta_unknown_when_second_sample_fails() {
    let calc = NakshatraCalculator::default();
    let info = calc
        .calculate(&FirstSampleOnly, epoch(), &Location::default())
        .unwrap();
    assert_eq!(info.result.minutes_to_next, None);
    assert_eq!(info.result.index, 8);
}

#[test]
fn test_nakshatra_provider_error_propagates() {
    let calc = NakshatraCalculator::default();
    let err = calc
        .calculate(&FailingProvider { fail: Body::Moon }, epoch(), &Location::default())
        .unwrap_err();
    assert!(matches!(err, VedicError::Provider { body: Body::Moon, .. }));
}

#[test]
fn test_nakshatra_eta_with_shorter_interval() {
    let calc = NakshatraCalculator::new(RateEstimator::new(Duration::minutes(10)));
    let info = calc
        .calculate(&moving(50.0, 200.0), epoch(), &Location::default())
        .unwrap();
    let expected = (16.0 * NAKSHATRA_WIDTH - 200.0) / 0.549 * 60.0;
    assert_approx!(info.result.minutes_to_next.unwrap(), expected, 1e-3);
}

// ── Rashi ──

#[test]
fn test_moon_rashi() {
    assert_eq!(moon_rashi(95.0).unwrap(), 4);
    assert_eq!(rashi_name(4), "Karka");
    assert_eq!(moon_rashi(0.0).unwrap(), 1);
    assert_eq!(moon_rashi(30.0).unwrap(), 2);
    assert_eq!(moon_rashi(359.9).unwrap(), 12);
    assert_eq!(moon_rashi(-5.0).unwrap(), 12);
}

#[test]
fn test_moon_rashi_rejects_non_finite() {
    for lon in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(moon_rashi(lon), Err(VedicError::Configuration(_))));
    }
}

#[test]
fn test_rashi_independent_of_nakshatra() {
    let info = NakshatraCalculator::default()
        .calculate(&FixedPositions::new(0.0, 95.0), epoch(), &Location::default())
        .unwrap();
    assert_eq!(info.rashi, 4);
    assert_eq!(info.rashi_name, "Karka");
    assert_eq!(info.result.index, 8);
}

// ── Tithi ──

#[test]
fn test_tithi_boundaries() {
    let t = tithi_from_elongation(0.0).unwrap();
    assert_eq!(t.index, 1);
    assert_eq!(paksha_for_tithi(t.index), Paksha::Shukla);

    let t = tithi_from_elongation(180.0).unwrap();
    assert_eq!(t.index, 16);
    assert_eq!(paksha_for_tithi(t.index), Paksha::Krishna);

    let t = tithi_from_elongation(348.0).unwrap();
    assert_eq!(t.index, 30);
}

#[test]
fn test_tithi_names_repeat_per_paksha() {
    assert_eq!(tithi_name(1), "Pratipada");
    assert_eq!(tithi_name(16), "Pratipada");
    assert_eq!(tithi_name(15), "Purnima");
    assert_eq!(tithi_name(26), "Ekadashi");
    assert_eq!(tithi_display_name(30), "Amavasya");
    assert_eq!(tithi_display_name(15), "Purnima");
}

#[test]
fn test_paksha_not_from_name_index() {
    assert_eq!(paksha_for_tithi(15), Paksha::Shukla);
    assert_eq!(paksha_for_tithi(16), Paksha::Krishna);
    assert_eq!(paksha_for_tithi(30), Paksha::Krishna);
    assert_eq!(tithi_in_paksha(16), 1);
    assert_eq!(tithi_in_paksha(30), 15);
}

#[test]
fn test_elongation_wraps() {
    assert_approx!(elongation(10.0, 350.0), 20.0, 1e-9);
    assert_approx!(elongation(200.0, 50.0), 150.0, 1e-9);
}

#[test]
fn test_tithi_calculator() {
    let info = TithiCalculator::default()
        .calculate(&moving(50.0, 200.0), epoch(), &Location::default())
        .unwrap();
    assert_eq!(info.result.index, 13);
    assert_eq!(info.name, "Trayodashi");
    assert_eq!(info.paksha, Paksha::Shukla);
    assert_approx!(info.elongation, 150.0, 1e-9);
    assert_approx!(info.result.progress, 50.0, 1e-9);
    let relative = 0.549 - 0.041_07;
    assert_approx!(info.result.minutes_to_next.unwrap(), 6.0 / relative * 60.0, 1e-3);
}

#[test]
fn test_tithi_needs_both_bodies() {
    let err = TithiCalculator::default()
        .calculate(&FailingProvider { fail: Body::Sun }, epoch(), &Location::default())
        .unwrap_err();
    assert!(matches!(err, VedicError::Provider { body: Body::Sun, .. }));
}

// ── Masa ──

#[test]
fn test_masa_segments() {
    assert_eq!(masa_from_sun_longitude(0.0).unwrap().index, 1);
    assert_eq!(masa_name(1), "Chaitra");
    assert_eq!(masa_from_sun_longitude(50.0).unwrap().index, 2);
    assert_eq!(masa_name(2), "Vaishakha");
    assert_eq!(masa_from_sun_longitude(359.0).unwrap().index, 12);
    assert_eq!(masa_name(12), "Phalguna");
}

#[test]
fn test_masa_calculator_eta() {
    let info = MasaCalculator::default()
        .calculate(&moving(50.0, 200.0), epoch(), &Location::default())
        .unwrap();
    assert_eq!(info.result.index, 2);
    assert_approx!(info.result.minutes_to_next.unwrap(), 10.0 / 0.041_07 * 60.0, 1e-2);
}

// ── Muhurta ──

#[test]
fn test_muhurta_at_midnight() {
    let m = MuhurtaCalculator::default().from_elapsed(0.0).unwrap();
    assert_eq!(m.result.index, 1);
    assert_eq!(m.name, "Rudra");
    assert_approx!(m.result.minutes_to_next.unwrap(), 48.0, 1e-9);
}

#[test]
fn test_muhurta_from_local_time() {
    let dt = Kolkata.with_ymd_and_hms(2026, 3, 21, 6, 0, 0).unwrap();
    let m = MuhurtaCalculator::default().calculate(&dt).unwrap();
    // 360 minutes / 48 = 7.5
    assert_eq!(m.result.index, 8);
    assert_approx!(m.result.progress, 50.0, 1e-9);
    assert_approx!(m.result.minutes_to_next.unwrap(), 24.0, 1e-9);
}

#[test]
fn test_muhurta_with_sunrise_day_start() {
    let dt = Kolkata.with_ymd_and_hms(2026, 3, 21, 6, 0, 0).unwrap();
    let m = MuhurtaCalculator::new(360.0).calculate(&dt).unwrap();
    assert_eq!(m.result.index, 1);
    assert_approx!(m.minutes_since_day_start, 0.0, 1e-9);

    let before = Kolkata.with_ymd_and_hms(2026, 3, 21, 5, 59, 0).unwrap();
    let m = MuhurtaCalculator::new(360.0).calculate(&before).unwrap();
    assert_eq!(m.result.index, 30);
}

#[test]
fn test_minutes_since_day_start_uses_local_zone() {
    let local = Kolkata.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    let utc = local.with_timezone(&Utc);
    assert_approx!(minutes_since_day_start(&local, 0.0), 720.0, 1e-9);
    assert_approx!(minutes_since_day_start(&utc, 0.0), 390.0, 1e-9);
}

// ── Prana ──

#[test]
fn test_prana_count_and_width() {
    assert_approx!(PRANA_MINUTES * 60.0, 4.0, 1e-9);
    let p = PranaCalculator::default().from_elapsed(MINUTES_PER_DAY - 0.01).unwrap();
    assert_eq!(p.result.index, PRANA_COUNT);
}

#[test]
fn test_prana_progress_from_seconds() {
    let dt = Utc.with_ymd_and_hms(2026, 3, 21, 0, 0, 6).unwrap();
    let p = PranaCalculator::default().calculate(&dt).unwrap();
    // 6 s into the day: second prana, halfway through
    assert_eq!(p.result.index, 2);
    assert_approx!(p.result.progress, 50.0, 1e-6);
    assert_approx!(p.result.minutes_to_next.unwrap(), 2.0 / 60.0, 1e-9);
}

#[test]
fn test_breath_phase_single_prana_cycle() {
    let (phase, progress) = breath_phase(10.25, 1.0);
    assert_eq!(phase, BreathPhase::Inhale);
    assert_approx!(progress, 50.0, 1e-9);
    let (phase, progress) = breath_phase(10.75, 1.0);
    assert_eq!(phase, BreathPhase::Exhale);
    assert_approx!(progress, 50.0, 1e-9);
}

#[test]
fn test_breath_phase_configurable_period() {
    // four pranas per breath: pranas 0-1 inhale, 2-3 exhale
    assert_eq!(breath_phase(1.5, 4.0).0, BreathPhase::Inhale);
    assert_eq!(breath_phase(2.5, 4.0).0, BreathPhase::Exhale);
    assert_approx!(breath_phase(2.5, 4.0).1, 25.0, 1e-9);
    assert_eq!(breath_phase(4.0, 4.0).0, BreathPhase::Inhale);
}

#[test]
fn test_breath_phase_resets_at_prana_boundary() {
    let p = PranaCalculator::default().from_elapsed(PRANA_MINUTES * 5.0).unwrap();
    assert_eq!(p.breath_phase, BreathPhase::Inhale);
    assert!(p.breath_phase_progress < 1e-6);
}

#[test]
fn test_prana_rejects_bad_breath_period() {
    let err = PranaCalculator::new(0.0, 0.0).from_elapsed(10.0).unwrap_err();
    assert!(matches!(err, VedicError::Configuration(_)));
    for unnested in [0.3, 2.5] {
        let err = PranaCalculator::new(0.0, unnested)
            .from_elapsed(10.0)
            .unwrap_err();
        assert!(matches!(err, VedicError::Configuration(_)), "{}", unnested);
    }
}

#[test]
fn test_sub_prana_breaths_restart_on_prana_boundary() {
    let calc = PranaCalculator::new(0.0, 0.5);
    let at_boundary = calc.from_elapsed(PRANA_MINUTES * 7.0).unwrap();
    assert_eq!(at_boundary.breath_phase, BreathPhase::Inhale);
    assert!(at_boundary.breath_phase_progress < 1e-6);
    // past a quarter prana the first breath is exhaling
    let later = calc.from_elapsed(PRANA_MINUTES * 7.3).unwrap();
    assert_eq!(later.breath_phase, BreathPhase::Exhale);
    assert_eq!(later.result.index, 8);
}
