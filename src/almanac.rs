use std::thread;

use chrono::{Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::{info, warn};

use crate::ephemeris::PositionProvider;
use crate::types::{Almanac, AlmanacConfig, AlmanacDay, AlmanacMetadata};
use crate::vedic_time::VedicTimeAggregator;

pub fn almanac_dates(config: &AlmanacConfig) -> Vec<NaiveDate> {
    (0..config.days)
        .filter_map(|i| config.start.checked_add_days(Days::new(u64::from(i))))
        .collect()
}

fn almanac_day<P, Tz>(
    aggregator: &VedicTimeAggregator<P>,
    date: NaiveDate,
    sample_time: NaiveTime,
    tz: &Tz,
) -> Option<AlmanacDay>
where
    P: PositionProvider,
    Tz: TimeZone,
{
    let naive = date.and_time(sample_time);
    // A sample time inside a DST gap moves forward by the gap.
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest());
    match local {
        Some(dt) => Some(AlmanacDay {
            date,
            time: aggregator.compute(&dt),
        }),
        None => {
            warn!(%date, %sample_time, "sample time does not exist locally; day skipped");
            None
        }
    }
}

/// One snapshot per day, computed across worker threads.
///
/// Days are independent: each worker takes a contiguous run of dates and the
/// results are stitched back in date order. A unit that fails on one day is
/// recorded in that day's snapshot and does not affect the others.
pub fn generate_almanac<P, Tz>(
    aggregator: &VedicTimeAggregator<P>,
    config: &AlmanacConfig,
    tz: &Tz,
) -> Almanac
where
    P: PositionProvider + Sync,
    Tz: TimeZone + Sync,
{
    let dates = almanac_dates(config);
    let workers = aggregator
        .config()
        .effective_worker_threads()
        .clamp(1, dates.len().max(1));
    let chunk_size = dates.len().div_ceil(workers).max(1);
    info!(days = dates.len(), workers, "generating almanac");

    let days: Vec<AlmanacDay> = thread::scope(|scope| {
        let handles: Vec<_> = dates
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .filter_map(|&date| almanac_day(aggregator, date, config.sample_time, tz))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(days) => days,
                Err(_) => {
                    warn!("almanac worker panicked; its days are missing");
                    Vec::new()
                }
            })
            .collect()
    });

    let incomplete_days = days.iter().filter(|d| !d.time.is_complete()).count();
    Almanac {
        config: *config,
        metadata: AlmanacMetadata {
            generated_at: Utc::now().to_rfc3339(),
            total_days: days.len(),
            incomplete_days,
        },
        days,
    }
}

impl Almanac {
    pub fn lookup(&self, date: NaiveDate) -> Option<&AlmanacDay> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.days[i])
    }

    /// Dates whose tithi differs from the previous available day, with the
    /// new tithi index.
    pub fn tithi_transitions(&self) -> Vec<(NaiveDate, u32)> {
        let mut out = Vec::new();
        let mut previous: Option<u32> = None;
        for day in &self.days {
            let Ok(tithi) = &day.time.tithi else {
                continue;
            };
            let index = tithi.result.index;
            if previous.is_some_and(|p| p != index) {
                out.push((day.date, index));
            }
            previous = Some(index);
        }
        out
    }

    /// Tithi index per day, `None` where it was unavailable.
    pub fn tithi_to_compact(&self) -> Vec<Option<u32>> {
        self.days
            .iter()
            .map(|d| d.time.tithi.as_ref().ok().map(|t| t.result.index))
            .collect()
    }
}
