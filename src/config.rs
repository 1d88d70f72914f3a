use std::collections::BTreeSet;
use std::time::Duration;

use crate::period::Granularity;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

pub const TRIP_VOLUME_PATH: &str = "/api/trip_volume";
pub const KPI_TRENDS_PATH: &str = "/api/kpi_trends";
pub const PAYMENT_ANALYSIS_PATH: &str = "/api/payment_analysis";
pub const HOURLY_ACTIVITY_PATH: &str = "/api/hourly_activity";
pub const PASSENGER_ANALYSIS_PATH: &str = "/api/passenger_analysis";
pub const FINANCIAL_BREAKDOWN_PATH: &str = "/api/financial_breakdown";
pub const VENDOR_ANALYSIS_PATH: &str = "/api/vendor_analysis";
pub const BOROUGH_FLOWS_PATH: &str = "/api/borough_flows";
pub const TRIP_DURATION_STATS_PATH: &str = "/api/trip_duration_stats";
pub const FARE_EFFICIENCY_PATH: &str = "/api/fare_efficiency";

pub const DEFAULT_GRANULARITY: Granularity = Granularity::Month;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The year selected when a dashboard is built without an explicit selection.
pub fn default_years() -> BTreeSet<i32> {
    BTreeSet::from([2024])
}
