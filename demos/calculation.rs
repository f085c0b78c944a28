use chrono::TimeZone;
use chrono_tz::Asia::Kolkata;

use vedic_clock::{
    logging, tithi_display_name, EngineConfig, Location, MeanEphemeris, VedicTimeAggregator,
    Ayanamsha,
};

fn main() {
    logging::init();

    let config = EngineConfig {
        location: Location::new(25.3, 83.0),
        ..EngineConfig::default()
    };
    let provider = MeanEphemeris::sidereal(Ayanamsha::LAHIRI);
    let aggregator = match VedicTimeAggregator::new(provider, config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return;
        }
    };

    let dt = Kolkata.with_ymd_and_hms(2026, 3, 21, 6, 30, 0).unwrap();
    let vt = aggregator.compute(&dt);

    println!("=== Vedic Time Calculation Example ===");
    println!(
        "Location: Varanasi ({:.1}°N, {:.1}°E)",
        config.location.latitude, config.location.longitude
    );
    println!("Date/Time: {}", dt);
    println!();
    println!("--- Positions ---");
    if let (Some(sun), Some(moon)) = (vt.sun_longitude, vt.moon_longitude) {
        println!("Sun longitude: {:.2}°", sun);
        println!("Moon longitude: {:.2}°", moon);
    }
    if let (Some(elong), Some(phase)) = (vt.elongation, vt.moon_phase) {
        println!("Elongation: {:.2}° (phase {:.3})", elong, phase);
    }
    println!();
    println!("--- Calendar Units ---");
    if let Ok(t) = &vt.tithi {
        println!(
            "Tithi: {} {} ({} paksha), {:.1}% elapsed",
            t.result.index,
            tithi_display_name(t.result.index),
            t.paksha.name(),
            t.result.progress
        );
        print_eta(t.result.minutes_to_next);
    }
    if let Ok(n) = &vt.nakshatra {
        println!(
            "Nakshatra: {} {} pada {}, {:.1}% elapsed",
            n.result.index,
            n.name,
            n.pada(),
            n.result.progress
        );
        print_eta(n.result.minutes_to_next);
        println!("Moon rashi: {} {}", n.rashi, n.rashi_name);
    }
    if let Ok(m) = &vt.masa {
        println!("Masa: {} {}", m.result.index, m.name);
    }
    if let Ok(m) = &vt.muhurta {
        println!(
            "Muhurta: {} {}, {:.1}% elapsed",
            m.result.index, m.name, m.result.progress
        );
    }
    if let Ok(p) = &vt.prana {
        println!(
            "Prana: {} ({:?} {:.0}%)",
            p.result.index, p.breath_phase, p.breath_phase_progress
        );
    }
    println!();
    println!("{vt}");
}

fn print_eta(minutes: Option<f64>) {
    match minutes {
        Some(m) => println!("  next in {:.0} min", m),
        None => println!("  next: unknown"),
    }
}
