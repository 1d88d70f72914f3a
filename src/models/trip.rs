use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TripStats — one row of the primary trip-volume dataset
// ---------------------------------------------------------------------------

/// Trip statistics for one period.
///
/// As delivered by `/api/trip_volume` each row covers a single calendar day.
/// The aggregator reuses the same shape for coarser periods: `date` becomes
/// the bucket's start date, `trip_count` the sum over the bucket, and the
/// `avg_*` metrics trip-count-weighted means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStats {
    pub date: NaiveDate,
    pub trip_count: i64,
    pub avg_total_amount: f64,
    pub avg_tip_amount: f64,
    pub avg_trip_distance: f64,
    pub avg_trip_duration_seconds: f64,
}
