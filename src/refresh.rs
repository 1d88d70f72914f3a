//! The refresh orchestrator.
//!
//! Every state-affecting event funnels through [`refresh`]: recompute the
//! filtered dataset, re-aggregate it for the panels that consume it, then
//! give each endpoint-backed panel its own fetch-restrict-render cycle.
//! Panels are fault-isolated. A failed fetch or a refusing widget degrades
//! that one panel to a placeholder and the loop moves on.

use tracing::{error, warn};

use crate::aggregate::{aggregate, monthly_profile};
use crate::client::TripSource;
use crate::error::DashboardError;
use crate::filter::restrict_to_years;
use crate::models::KpiTrends;
use crate::state::DashboardState;
use crate::widgets::{Notice, Panel, PanelData, Renderer};

// ---------------------------------------------------------------------------
// RefreshReport
// ---------------------------------------------------------------------------

/// What happened to each panel during one refresh cycle.
///
/// The dashboard never aborts a refresh over a single panel; hosts that want
/// to react to failures read them from here.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Set when a full reload could not fetch the primary dataset. The
    /// previously loaded rows stay in place and the refresh still runs.
    pub source_error: Option<DashboardError>,
    /// Per-panel outcomes in render order.
    pub panels: Vec<(Panel, PanelOutcome)>,
}

#[derive(Debug)]
pub enum PanelOutcome {
    /// The widget was created or updated with fresh data.
    Rendered,
    /// No rows matched; the panel shows a no-data placeholder.
    Empty,
    /// Fetch or render failed. The panel shows a failure placeholder, except
    /// the KPI cards, which render zeroed values instead.
    Failed(DashboardError),
}

impl RefreshReport {
    pub fn outcome(&self, panel: Panel) -> Option<&PanelOutcome> {
        self.panels
            .iter()
            .find(|(candidate, _)| *candidate == panel)
            .map(|(_, outcome)| outcome)
    }

    pub fn all_rendered(&self) -> bool {
        self.source_error.is_none()
            && self
                .panels
                .iter()
                .all(|(_, outcome)| matches!(outcome, PanelOutcome::Rendered))
    }

    fn record(&mut self, panel: Panel, outcome: PanelOutcome) {
        self.panels.push((panel, outcome));
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Re-fetch the primary dataset, then run a full refresh.
///
/// A failed fetch keeps the previous rows, records the error in the report,
/// and still refreshes so endpoint-backed panels stay current.
pub(crate) fn load(
    source: &dyn TripSource,
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
) -> RefreshReport {
    match source.trip_volume() {
        Ok(rows) => {
            state.set_raw(rows);
            refresh(source, state, renderer)
        }
        Err(e) => {
            error!("trip volume fetch failed, keeping the previous dataset: {e}");
            let mut report = refresh(source, state, renderer);
            report.source_error = Some(e);
            report
        }
    }
}

/// One full refresh cycle over every panel.
pub(crate) fn refresh(
    source: &dyn TripSource,
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
) -> RefreshReport {
    let mut report = RefreshReport::default();
    refresh_filtered_panels(state, renderer, &mut report);
    refresh_endpoint_panels(source, state, renderer, &mut report);
    report
}

/// Destroy every live widget and show loading placeholders.
///
/// Used when the host switches dashboard sections and wants a clean slate
/// before the next load; ordinary filter changes update widgets in place.
pub(crate) fn teardown(state: &mut DashboardState, renderer: &mut dyn Renderer) {
    for panel in Panel::ALL {
        state.slot_mut(panel).clear();
        renderer.placeholder(panel, &Notice::Loading);
    }
}

// ---------------------------------------------------------------------------
// Filtered-dataset panels
// ---------------------------------------------------------------------------

/// Filter, aggregate, and push to the panels that consume the primary
/// dataset. The filter runs synchronously before anything renders, so every
/// panel in this pass sees the same filtered rows.
fn refresh_filtered_panels(
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
    report: &mut RefreshReport,
) {
    state.refilter();

    if state.filtered().is_empty() {
        let notice = Notice::NoData {
            years: state.years().to_vec(),
        };
        for panel in Panel::FILTERED {
            state.slot_mut(panel).clear();
            renderer.placeholder(panel, &notice);
            report.record(panel, PanelOutcome::Empty);
        }
        return;
    }

    let granularity = state.granularity();
    let summaries = aggregate(state.filtered(), granularity);
    let profile = monthly_profile(state.filtered());

    render(
        state,
        renderer,
        report,
        Panel::TrendChart,
        PanelData::Trend {
            granularity,
            rows: summaries.clone(),
        },
    );
    render(
        state,
        renderer,
        report,
        Panel::MonthlyDistribution,
        PanelData::MonthlyDistribution { profile },
    );
    render(
        state,
        renderer,
        report,
        Panel::DataTable,
        PanelData::Table {
            granularity,
            rows: summaries,
        },
    );
}

// ---------------------------------------------------------------------------
// Endpoint-backed panels
// ---------------------------------------------------------------------------

/// Fetch and render every panel that owns its own endpoint. Not gated on the
/// filtered dataset being non-empty.
fn refresh_endpoint_panels(
    source: &dyn TripSource,
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
    report: &mut RefreshReport,
) {
    let selection_notice = Notice::NoData {
        years: state.years().to_vec(),
    };
    // Plain empty datasets are not a selection problem, so their notice
    // carries no year list.
    let empty_notice = Notice::NoData { years: Vec::new() };

    // KPI cards keep their card row on failure by rendering zeroed values.
    match source.kpi_trends() {
        Ok(kpi) => render(state, renderer, report, Panel::KpiCards, PanelData::Kpi(kpi)),
        Err(e) => {
            error!("KPI trends fetch failed, rendering zeroed values: {e}");
            let data = PanelData::Kpi(KpiTrends::default());
            let slot = state.slot_mut(Panel::KpiCards);
            if let Err(render_err) = slot.render(Panel::KpiCards, &data, renderer) {
                error!("{} render failed: {render_err}", Panel::KpiCards);
                slot.clear();
                renderer.placeholder(Panel::KpiCards, &Notice::Failed);
            }
            report.record(Panel::KpiCards, PanelOutcome::Failed(e));
        }
    }

    match source.payment_analysis() {
        Ok(mut rows) => {
            rows.sort_by(|a, b| b.trip_count.cmp(&a.trip_count));
            push_rows(
                state,
                renderer,
                report,
                Panel::PaymentTypes,
                rows,
                PanelData::Payments,
                &empty_notice,
            );
        }
        Err(e) => fail(state, renderer, report, Panel::PaymentTypes, e),
    }

    match source.hourly_activity() {
        Ok(rows) => {
            let rows = restrict_to_years(&rows, state.years());
            push_rows(
                state,
                renderer,
                report,
                Panel::HourlyHeatmap,
                rows,
                PanelData::HourlyHeatmap,
                &selection_notice,
            );
        }
        Err(e) => fail(state, renderer, report, Panel::HourlyHeatmap, e),
    }

    match source.passenger_analysis() {
        Ok(rows) => push_rows(
            state,
            renderer,
            report,
            Panel::PassengerCounts,
            rows,
            PanelData::Passengers,
            &empty_notice,
        ),
        Err(e) => fail(state, renderer, report, Panel::PassengerCounts, e),
    }

    match source.financial_breakdown() {
        Ok(rows) => {
            let mut rows = restrict_to_years(&rows, state.years());
            rows.sort_by_key(|row| row.date);
            push_rows(
                state,
                renderer,
                report,
                Panel::FinancialBreakdown,
                rows,
                PanelData::Financial,
                &selection_notice,
            );
        }
        Err(e) => fail(state, renderer, report, Panel::FinancialBreakdown, e),
    }

    match source.vendor_analysis() {
        Ok(rows) => push_rows(
            state,
            renderer,
            report,
            Panel::VendorComparison,
            rows,
            PanelData::Vendors,
            &empty_notice,
        ),
        Err(e) => fail(state, renderer, report, Panel::VendorComparison, e),
    }

    match source.borough_flows() {
        Ok(rows) => push_rows(
            state,
            renderer,
            report,
            Panel::BoroughFlows,
            rows,
            PanelData::BoroughFlows,
            &empty_notice,
        ),
        Err(e) => fail(state, renderer, report, Panel::BoroughFlows, e),
    }

    match source.trip_duration_stats() {
        Ok(stats) => render(
            state,
            renderer,
            report,
            Panel::TripDurations,
            PanelData::TripDurations(stats),
        ),
        Err(e) => fail(state, renderer, report, Panel::TripDurations, e),
    }

    match source.fare_efficiency() {
        Ok(stats) => render(
            state,
            renderer,
            report,
            Panel::FareEfficiency,
            PanelData::FareEfficiency(stats),
        ),
        Err(e) => fail(state, renderer, report, Panel::FareEfficiency, e),
    }
}

// ---------------------------------------------------------------------------
// Per-panel helpers
// ---------------------------------------------------------------------------

/// Create-or-update the panel's widget; on a widget failure, degrade to a
/// failure placeholder and drop the instance so the next refresh starts
/// clean.
fn render(
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
    report: &mut RefreshReport,
    panel: Panel,
    data: PanelData,
) {
    let slot = state.slot_mut(panel);
    match slot.render(panel, &data, renderer) {
        Ok(()) => report.record(panel, PanelOutcome::Rendered),
        Err(e) => {
            error!("{panel} render failed: {e}");
            slot.clear();
            renderer.placeholder(panel, &Notice::Failed);
            report.record(panel, PanelOutcome::Failed(e));
        }
    }
}

/// Render a row set, or show `empty_notice` when there is nothing to draw.
fn push_rows<T>(
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
    report: &mut RefreshReport,
    panel: Panel,
    rows: Vec<T>,
    wrap: impl FnOnce(Vec<T>) -> PanelData,
    empty_notice: &Notice,
) {
    if rows.is_empty() {
        warn!("{panel}: no rows to display");
        state.slot_mut(panel).clear();
        renderer.placeholder(panel, empty_notice);
        report.record(panel, PanelOutcome::Empty);
    } else {
        render(state, renderer, report, panel, wrap(rows));
    }
}

/// Degrade a panel whose fetch failed.
fn fail(
    state: &mut DashboardState,
    renderer: &mut dyn Renderer,
    report: &mut RefreshReport,
    panel: Panel,
    error: DashboardError,
) {
    error!("{panel} fetch failed: {error}");
    state.slot_mut(panel).clear();
    renderer.placeholder(panel, &Notice::Failed);
    report.record(panel, PanelOutcome::Failed(error));
}
