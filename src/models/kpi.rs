use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TrendValue — current/previous pair with a percentage trend
// ---------------------------------------------------------------------------

/// One headline metric with its previous-period comparison.
///
/// `previous` and `trend` are absent when the backend has no earlier period
/// to compare against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendValue {
    pub current: f64,
    pub previous: Option<f64>,
    pub trend: Option<f64>,
}

// ---------------------------------------------------------------------------
// KpiTrends — headline card metrics from /api/kpi_trends
// ---------------------------------------------------------------------------

/// The four headline KPI cards. `Default` yields all-zero values, which is
/// what the dashboard renders when the KPI fetch fails.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiTrends {
    pub total_trips: TrendValue,
    pub avg_trips_per_period: TrendValue,
    pub max_trips_per_period: TrendValue,
    pub avg_amount_overall: TrendValue,
}
