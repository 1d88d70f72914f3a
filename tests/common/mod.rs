//! Shared test fixtures for the dashboard integration tests.
//!
//! Provides `FixtureSource` (an in-memory `TripSource` with deterministic
//! sample data and per-endpoint failure injection) and `RecordingRenderer`
//! (a renderer double that logs every create/update/placeholder call and
//! keeps the last payload pushed to each panel).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tripdash::models::{
    BoroughFlow, FareEfficiency, FinancialBreakdown, HourlyActivity, KpiTrends, PassengerStats,
    PaymentTypeStats, TrendValue, TripDurations, TripStats, VendorStats,
};
use tripdash::{DashboardError, Notice, Panel, PanelData, Renderer, Result, TripSource, Widget};

// ---------------------------------------------------------------------------
// Row builders
// ---------------------------------------------------------------------------

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// One daily row with `avg_total_amount` set and the remaining metrics
/// derived from it, enough for most assertions.
pub fn day(date_str: &str, trip_count: i64, avg_total: f64) -> TripStats {
    TripStats {
        date: date(date_str),
        trip_count,
        avg_total_amount: avg_total,
        avg_tip_amount: avg_total * 0.2,
        avg_trip_distance: 3.0,
        avg_trip_duration_seconds: 900.0,
    }
}

// ---------------------------------------------------------------------------
// FixtureSource
// ---------------------------------------------------------------------------

/// Shared failure-injection switch for a `FixtureSource`.
///
/// Cloneable so a test can keep a handle and flip endpoints to failing after
/// the dashboard has taken ownership of the source.
#[derive(Clone, Default)]
pub struct FailSwitch(Arc<Mutex<HashSet<&'static str>>>);

impl FailSwitch {
    pub fn set(&self, endpoint: &'static str) {
        self.0.lock().unwrap().insert(endpoint);
    }

    pub fn clear(&self, endpoint: &'static str) {
        self.0.lock().unwrap().remove(endpoint);
    }

    fn contains(&self, endpoint: &str) -> bool {
        self.0.lock().unwrap().contains(endpoint)
    }
}

/// In-memory `TripSource` backed by sample rows.
///
/// `failing(endpoint)` makes that endpoint's method return an error, for
/// exercising per-panel degradation. Endpoint names match the trait methods
/// (`"trip_volume"`, `"kpi_trends"`, ...).
pub struct FixtureSource {
    pub volume: Vec<TripStats>,
    pub kpi: KpiTrends,
    pub payments: Vec<PaymentTypeStats>,
    pub hourly: Vec<HourlyActivity>,
    pub passengers: Vec<PassengerStats>,
    pub financial: Vec<FinancialBreakdown>,
    pub vendors: Vec<VendorStats>,
    pub boroughs: Vec<BoroughFlow>,
    pub durations: TripDurations,
    pub fare: FareEfficiency,
    pub fail: FailSwitch,
}

impl FixtureSource {
    /// Sample data mixing 2023 and 2024 rows across every endpoint.
    pub fn sample() -> Self {
        Self {
            volume: vec![
                day("2023-06-01", 40, 18.0),
                day("2024-01-15", 100, 20.0),
                day("2024-01-20", 50, 30.0),
                day("2024-02-10", 80, 25.0),
            ],
            kpi: KpiTrends {
                total_trips: trend(270.0, 250.0, 8.0),
                avg_trips_per_period: trend(67.5, 62.5, 8.0),
                max_trips_per_period: trend(100.0, 90.0, 11.1),
                avg_amount_overall: trend(23.4, 21.0, 11.4),
            },
            payments: vec![
                payment("Cash", 80, 0.5),
                payment("Credit card", 150, 3.5),
            ],
            hourly: vec![
                hourly_cell(1, 8, 40, Some(2024)),
                hourly_cell(5, 18, 60, Some(2024)),
                hourly_cell(7, 23, 25, Some(2023)),
                hourly_cell(3, 12, 30, None),
            ],
            passengers: vec![
                PassengerStats {
                    passenger_count: Some(1),
                    trip_count: 200,
                },
                PassengerStats {
                    passenger_count: Some(2),
                    trip_count: 50,
                },
                PassengerStats {
                    passenger_count: None,
                    trip_count: 20,
                },
            ],
            financial: vec![
                financial_row("2023-06-01", 14.0),
                financial_row("2024-01-15", 16.5),
                financial_row("2024-02-10", 17.2),
            ],
            vendors: vec![
                vendor("Creative Mobile", 160, 24.0, 3.1),
                vendor("VeriFone", 110, 22.5, 2.8),
            ],
            boroughs: vec![
                borough("Manhattan", "Brooklyn", 90, 21.0),
                borough("Queens", "Manhattan", 70, 28.5),
            ],
            durations: TripDurations {
                avg_duration_seconds: 950.0,
                min_duration_seconds: 60.0,
                max_duration_seconds: 7200.0,
                p25_duration_seconds: 480.0,
                p50_duration_seconds: 840.0,
                p75_duration_seconds: 1260.0,
            },
            fare: FareEfficiency {
                avg_fare_per_km: 3.2,
                avg_fare_per_minute: 1.1,
            },
            fail: FailSwitch::default(),
        }
    }

    /// Make `endpoint` fail with a simulated fetch error.
    pub fn failing(self, endpoint: &'static str) -> Self {
        self.fail.set(endpoint);
        self
    }

    /// Handle for flipping endpoint failures after handing the source off.
    pub fn fail_switch(&self) -> FailSwitch {
        self.fail.clone()
    }

    fn guard(&self, endpoint: &'static str) -> Result<()> {
        if self.fail.contains(endpoint) {
            return Err(DashboardError::InvalidArgument(format!(
                "simulated {endpoint} failure"
            )));
        }
        Ok(())
    }
}

fn trend(current: f64, previous: f64, trend: f64) -> TrendValue {
    TrendValue {
        current,
        previous: Some(previous),
        trend: Some(trend),
    }
}

fn payment(name: &str, trip_count: i64, avg_tip: f64) -> PaymentTypeStats {
    PaymentTypeStats {
        payment_type_name: name.to_string(),
        trip_count,
        avg_tip_amount: avg_tip,
    }
}

fn hourly_cell(day_of_week: i32, hour_of_day: i32, trip_count: i64, year: Option<i32>) -> HourlyActivity {
    HourlyActivity {
        day_of_week,
        hour_of_day,
        trip_count,
        year,
    }
}

fn financial_row(date_str: &str, fare: f64) -> FinancialBreakdown {
    FinancialBreakdown {
        date: date(date_str),
        avg_fare_amount: fare,
        avg_tip_amount: fare * 0.2,
        avg_tolls_amount: 0.8,
        avg_mta_tax: 0.5,
        avg_improvement_surcharge: 0.3,
        avg_congestion_surcharge: 2.5,
        avg_total_amount: fare + 4.1,
    }
}

fn vendor(name: &str, trip_count: i64, avg_total: f64, avg_distance: f64) -> VendorStats {
    VendorStats {
        vendor_name: name.to_string(),
        trip_count,
        avg_total_amount: avg_total,
        avg_trip_distance: avg_distance,
    }
}

fn borough(pickup: &str, dropoff: &str, trip_count: i64, avg_fare: f64) -> BoroughFlow {
    BoroughFlow {
        pickup_borough: pickup.to_string(),
        dropoff_borough: dropoff.to_string(),
        trip_count,
        avg_fare_amount: avg_fare,
    }
}

impl TripSource for FixtureSource {
    fn trip_volume(&self) -> Result<Vec<TripStats>> {
        self.guard("trip_volume")?;
        Ok(self.volume.clone())
    }

    fn kpi_trends(&self) -> Result<KpiTrends> {
        self.guard("kpi_trends")?;
        Ok(self.kpi.clone())
    }

    fn payment_analysis(&self) -> Result<Vec<PaymentTypeStats>> {
        self.guard("payment_analysis")?;
        Ok(self.payments.clone())
    }

    fn hourly_activity(&self) -> Result<Vec<HourlyActivity>> {
        self.guard("hourly_activity")?;
        Ok(self.hourly.clone())
    }

    fn passenger_analysis(&self) -> Result<Vec<PassengerStats>> {
        self.guard("passenger_analysis")?;
        Ok(self.passengers.clone())
    }

    fn financial_breakdown(&self) -> Result<Vec<FinancialBreakdown>> {
        self.guard("financial_breakdown")?;
        Ok(self.financial.clone())
    }

    fn vendor_analysis(&self) -> Result<Vec<VendorStats>> {
        self.guard("vendor_analysis")?;
        Ok(self.vendors.clone())
    }

    fn borough_flows(&self) -> Result<Vec<BoroughFlow>> {
        self.guard("borough_flows")?;
        Ok(self.boroughs.clone())
    }

    fn trip_duration_stats(&self) -> Result<TripDurations> {
        self.guard("trip_duration_stats")?;
        Ok(self.durations.clone())
    }

    fn fare_efficiency(&self) -> Result<FareEfficiency> {
        self.guard("fare_efficiency")?;
        Ok(self.fare.clone())
    }
}

// ---------------------------------------------------------------------------
// RecordingRenderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Created(Panel),
    Updated(Panel),
    Placeholder(Panel, String),
}

/// Handle onto the renderer's call log, cloneable so tests keep one after
/// handing the renderer to the dashboard.
#[derive(Clone, Default)]
pub struct RenderLog {
    events: Arc<Mutex<Vec<RenderEvent>>>,
    data: Arc<Mutex<HashMap<Panel, PanelData>>>,
}

impl RenderLog {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The most recent payload pushed to a panel, whether by create or
    /// update.
    pub fn last_data(&self, panel: Panel) -> Option<PanelData> {
        self.data.lock().unwrap().get(&panel).cloned()
    }

    pub fn created_count(&self, panel: Panel) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, RenderEvent::Created(p) if *p == panel))
            .count()
    }

    pub fn updated_count(&self, panel: Panel) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, RenderEvent::Updated(p) if *p == panel))
            .count()
    }

    /// Placeholder messages shown for a panel, oldest first.
    pub fn placeholders(&self, panel: Panel) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Placeholder(p, message) if *p == panel => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn store(&self, panel: Panel, data: &PanelData) {
        self.data.lock().unwrap().insert(panel, data.clone());
    }
}

/// Renderer double. `fail_create(panel)` makes widget construction for that
/// panel return an error; `fail_update(panel)` hands out widgets that refuse
/// their in-place updates. Both exercise widget-level degradation.
pub struct RecordingRenderer {
    log: RenderLog,
    fail_create: HashSet<Panel>,
    fail_update: HashSet<Panel>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, RenderLog) {
        let log = RenderLog::default();
        (
            Self {
                log: log.clone(),
                fail_create: HashSet::new(),
                fail_update: HashSet::new(),
            },
            log,
        )
    }

    pub fn fail_create(mut self, panel: Panel) -> Self {
        self.fail_create.insert(panel);
        self
    }

    pub fn fail_update(mut self, panel: Panel) -> Self {
        self.fail_update.insert(panel);
        self
    }
}

impl Renderer for RecordingRenderer {
    fn create(&mut self, panel: Panel, data: &PanelData) -> Result<Box<dyn Widget>> {
        if self.fail_create.contains(&panel) {
            return Err(DashboardError::Widget(format!("refused to create {panel}")));
        }
        self.log.push(RenderEvent::Created(panel));
        self.log.store(panel, data);
        Ok(Box::new(RecordingWidget {
            panel,
            log: self.log.clone(),
            fail_update: self.fail_update.contains(&panel),
        }))
    }

    fn placeholder(&mut self, panel: Panel, notice: &Notice) {
        self.log.push(RenderEvent::Placeholder(panel, notice.to_string()));
    }
}

struct RecordingWidget {
    panel: Panel,
    log: RenderLog,
    fail_update: bool,
}

impl Widget for RecordingWidget {
    fn update(&mut self, data: &PanelData) -> Result<()> {
        if self.fail_update {
            return Err(DashboardError::Widget(format!(
                "refused to update {}",
                self.panel
            )));
        }
        self.log.push(RenderEvent::Updated(self.panel));
        self.log.store(self.panel, data);
        Ok(())
    }
}
