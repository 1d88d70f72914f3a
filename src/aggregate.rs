//! Temporal re-aggregation of daily trip statistics.
//!
//! Takes the per-day rows delivered by the backend and rolls them up into
//! week, month or quarter buckets with trip-count-weighted averages. Day
//! granularity is the identity: the input already holds one row per day.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::TripStats;
use crate::period::{bucket_start, Granularity};

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Bucket {
    trip_count: i64,
    total_amount: f64,
    tip_amount: f64,
    trip_distance: f64,
    trip_duration_seconds: f64,
}

impl Bucket {
    fn add(&mut self, row: &TripStats) {
        let weight = row.trip_count as f64;
        self.trip_count += row.trip_count;
        self.total_amount += row.avg_total_amount * weight;
        self.tip_amount += row.avg_tip_amount * weight;
        self.trip_distance += row.avg_trip_distance * weight;
        self.trip_duration_seconds += row.avg_trip_duration_seconds * weight;
    }

    fn into_summary(self, date: NaiveDate) -> TripStats {
        // Floor the divisor at 1 so a bucket whose trips sum to zero yields
        // zero averages instead of dividing by zero.
        let divisor = self.trip_count.max(1) as f64;
        TripStats {
            date,
            trip_count: self.trip_count,
            avg_total_amount: self.total_amount / divisor,
            avg_tip_amount: self.tip_amount / divisor,
            avg_trip_distance: self.trip_distance / divisor,
            avg_trip_duration_seconds: self.trip_duration_seconds / divisor,
        }
    }
}

/// Roll daily rows up to `granularity`, sorted ascending by bucket start.
///
/// Each bucket's `trip_count` is the sum over its days; each `avg_*` metric
/// is the trip-count-weighted mean, so a busy day moves the bucket average
/// more than a quiet one and total volume is conserved.
///
/// `Day` granularity returns the input as-is without re-sorting; the primary
/// dataset is already one row per day in date order.
pub fn aggregate(records: &[TripStats], granularity: Granularity) -> Vec<TripStats> {
    if granularity == Granularity::Day {
        return records.to_vec();
    }

    let mut buckets: HashMap<NaiveDate, Bucket> = HashMap::new();
    for row in records {
        buckets
            .entry(bucket_start(row.date, granularity))
            .or_default()
            .add(row);
    }

    let mut summaries: Vec<TripStats> = buckets
        .into_iter()
        .map(|(date, bucket)| bucket.into_summary(date))
        .collect();
    summaries.sort_by_key(|row| row.date);
    summaries
}

// ---------------------------------------------------------------------------
// monthly_profile
// ---------------------------------------------------------------------------

/// Average daily trip volume per calendar month, January first.
///
/// Slot `m` is the mean of `trip_count` over the rows falling in month
/// `m + 1`, rounded to the nearest whole trip; months with no rows stay
/// zero. Feeds the monthly-distribution panel, which shows the seasonal
/// shape of whatever selection is active.
pub fn monthly_profile(records: &[TripStats]) -> [i64; 12] {
    let mut totals = [0i64; 12];
    let mut days = [0i64; 12];
    for row in records {
        let month = row.date.month0() as usize;
        totals[month] += row.trip_count;
        days[month] += 1;
    }

    let mut profile = [0i64; 12];
    for month in 0..12 {
        if days[month] > 0 {
            profile[month] = (totals[month] as f64 / days[month] as f64).round() as i64;
        }
    }
    profile
}
