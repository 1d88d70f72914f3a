//! Row types for the per-panel endpoints. Each mirrors one backend response
//! schema; the refresh orchestrator treats them as opaque payloads apart from
//! the optional year scoping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PaymentTypeStats — /api/payment_analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTypeStats {
    pub payment_type_name: String,
    pub trip_count: i64,
    pub avg_tip_amount: f64,
}

// ---------------------------------------------------------------------------
// HourlyActivity — /api/hourly_activity
// ---------------------------------------------------------------------------

/// One heatmap cell. `day_of_week` is ISO numbered, Monday = 1 through
/// Sunday = 7. `year` is optional on the wire; rows without it are shown for
/// every year selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyActivity {
    pub day_of_week: i32,
    pub hour_of_day: i32,
    pub trip_count: i64,
    #[serde(default)]
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// PassengerStats — /api/passenger_analysis
// ---------------------------------------------------------------------------

/// `passenger_count` is `None` when the source trip left the field unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerStats {
    pub passenger_count: Option<i32>,
    pub trip_count: i64,
}

// ---------------------------------------------------------------------------
// FinancialBreakdown — /api/financial_breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialBreakdown {
    pub date: NaiveDate,
    pub avg_fare_amount: f64,
    pub avg_tip_amount: f64,
    pub avg_tolls_amount: f64,
    pub avg_mta_tax: f64,
    pub avg_improvement_surcharge: f64,
    pub avg_congestion_surcharge: f64,
    pub avg_total_amount: f64,
}

// ---------------------------------------------------------------------------
// VendorStats — /api/vendor_analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorStats {
    pub vendor_name: String,
    pub trip_count: i64,
    pub avg_total_amount: f64,
    pub avg_trip_distance: f64,
}

// ---------------------------------------------------------------------------
// BoroughFlow — /api/borough_flows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoroughFlow {
    pub pickup_borough: String,
    pub dropoff_borough: String,
    pub trip_count: i64,
    pub avg_fare_amount: f64,
}

// ---------------------------------------------------------------------------
// TripDurations — /api/trip_duration_stats (single object)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDurations {
    pub avg_duration_seconds: f64,
    pub min_duration_seconds: f64,
    pub max_duration_seconds: f64,
    pub p25_duration_seconds: f64,
    pub p50_duration_seconds: f64,
    pub p75_duration_seconds: f64,
}

// ---------------------------------------------------------------------------
// FareEfficiency — /api/fare_efficiency (single object)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareEfficiency {
    pub avg_fare_per_km: f64,
    pub avg_fare_per_minute: f64,
}
