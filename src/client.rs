//! Typed access to the backend's read-only endpoint surface.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::config;
use crate::error::Result;
use crate::models::{
    BoroughFlow, FareEfficiency, FinancialBreakdown, HourlyActivity, KpiTrends, PassengerStats,
    PaymentTypeStats, TripDurations, TripStats, VendorStats,
};

// ---------------------------------------------------------------------------
// TripSource
// ---------------------------------------------------------------------------

/// The backend surface the dashboard consumes, one method per endpoint.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute an in-memory
/// fixture source. Every response is validated into its typed schema at this
/// boundary, so nothing downstream inspects raw JSON.
pub trait TripSource: Send {
    fn trip_volume(&self) -> Result<Vec<TripStats>>;
    fn kpi_trends(&self) -> Result<KpiTrends>;
    fn payment_analysis(&self) -> Result<Vec<PaymentTypeStats>>;
    fn hourly_activity(&self) -> Result<Vec<HourlyActivity>>;
    fn passenger_analysis(&self) -> Result<Vec<PassengerStats>>;
    fn financial_breakdown(&self) -> Result<Vec<FinancialBreakdown>>;
    fn vendor_analysis(&self) -> Result<Vec<VendorStats>>;
    fn borough_flows(&self) -> Result<Vec<BoroughFlow>>;
    fn trip_duration_stats(&self) -> Result<TripDurations>;
    fn fare_efficiency(&self) -> Result<FareEfficiency>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the trip-statistics backend.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Build a client for the backend at `base_url` (no trailing slash
    /// needed; one is tolerated).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path and decode the JSON body. A non-success status is a
    /// transport error; a body that does not match the schema is a JSON
    /// error.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send()?.error_for_status()?;
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl TripSource for ApiClient {
    fn trip_volume(&self) -> Result<Vec<TripStats>> {
        self.get_json(config::TRIP_VOLUME_PATH)
    }

    fn kpi_trends(&self) -> Result<KpiTrends> {
        self.get_json(config::KPI_TRENDS_PATH)
    }

    fn payment_analysis(&self) -> Result<Vec<PaymentTypeStats>> {
        self.get_json(config::PAYMENT_ANALYSIS_PATH)
    }

    fn hourly_activity(&self) -> Result<Vec<HourlyActivity>> {
        self.get_json(config::HOURLY_ACTIVITY_PATH)
    }

    fn passenger_analysis(&self) -> Result<Vec<PassengerStats>> {
        self.get_json(config::PASSENGER_ANALYSIS_PATH)
    }

    fn financial_breakdown(&self) -> Result<Vec<FinancialBreakdown>> {
        self.get_json(config::FINANCIAL_BREAKDOWN_PATH)
    }

    fn vendor_analysis(&self) -> Result<Vec<VendorStats>> {
        self.get_json(config::VENDOR_ANALYSIS_PATH)
    }

    fn borough_flows(&self) -> Result<Vec<BoroughFlow>> {
        self.get_json(config::BOROUGH_FLOWS_PATH)
    }

    fn trip_duration_stats(&self) -> Result<TripDurations> {
        self.get_json(config::TRIP_DURATION_STATS_PATH)
    }

    fn fare_efficiency(&self) -> Result<FareEfficiency> {
        self.get_json(config::FARE_EFFICIENCY_PATH)
    }
}
