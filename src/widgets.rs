//! Panels, widget slots, and the traits the host's rendering layer plugs into.
//!
//! The engine never draws anything itself. It hands each panel's typed data
//! to a host-supplied [`Renderer`], which builds a widget on first render;
//! after that the widget instance is kept in the panel's [`WidgetSlot`] and
//! fed updates in place.

use std::fmt;

use crate::error::Result;
use crate::models::{
    BoroughFlow, FareEfficiency, FinancialBreakdown, HourlyActivity, KpiTrends, PassengerStats,
    PaymentTypeStats, TripDurations, TripStats, VendorStats,
};
use crate::period::Granularity;

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Every visualization position on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    TrendChart,
    MonthlyDistribution,
    DataTable,
    KpiCards,
    PaymentTypes,
    HourlyHeatmap,
    PassengerCounts,
    FinancialBreakdown,
    VendorComparison,
    BoroughFlows,
    TripDurations,
    FareEfficiency,
}

impl Panel {
    pub const ALL: [Panel; 12] = [
        Panel::TrendChart,
        Panel::MonthlyDistribution,
        Panel::DataTable,
        Panel::KpiCards,
        Panel::PaymentTypes,
        Panel::HourlyHeatmap,
        Panel::PassengerCounts,
        Panel::FinancialBreakdown,
        Panel::VendorComparison,
        Panel::BoroughFlows,
        Panel::TripDurations,
        Panel::FareEfficiency,
    ];

    /// Panels fed from the filtered primary dataset. These are the ones a
    /// granularity or year change recomputes locally; the rest fetch their
    /// own endpoint.
    pub const FILTERED: [Panel; 3] = [
        Panel::TrendChart,
        Panel::MonthlyDistribution,
        Panel::DataTable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::TrendChart => "trend_chart",
            Panel::MonthlyDistribution => "monthly_distribution",
            Panel::DataTable => "data_table",
            Panel::KpiCards => "kpi_cards",
            Panel::PaymentTypes => "payment_types",
            Panel::HourlyHeatmap => "hourly_heatmap",
            Panel::PassengerCounts => "passenger_counts",
            Panel::FinancialBreakdown => "financial_breakdown",
            Panel::VendorComparison => "vendor_comparison",
            Panel::BoroughFlows => "borough_flows",
            Panel::TripDurations => "trip_durations",
            Panel::FareEfficiency => "fare_efficiency",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PanelData
// ---------------------------------------------------------------------------

/// The typed payload pushed to a panel on each render.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelData {
    Trend {
        granularity: Granularity,
        rows: Vec<TripStats>,
    },
    MonthlyDistribution {
        /// Average daily trips per calendar month, January first.
        profile: [i64; 12],
    },
    Table {
        granularity: Granularity,
        rows: Vec<TripStats>,
    },
    Kpi(KpiTrends),
    Payments(Vec<PaymentTypeStats>),
    HourlyHeatmap(Vec<HourlyActivity>),
    Passengers(Vec<PassengerStats>),
    Financial(Vec<FinancialBreakdown>),
    Vendors(Vec<VendorStats>),
    BoroughFlows(Vec<BoroughFlow>),
    TripDurations(TripDurations),
    FareEfficiency(FareEfficiency),
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// What a panel shows instead of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A fresh load is underway (shown after teardown).
    Loading,
    /// The current selection matched no rows; carries the years that were
    /// tried so the message can name them.
    NoData { years: Vec<i32> },
    /// The panel's fetch or render failed.
    Failed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loading => f.write_str("loading"),
            Notice::NoData { years } if years.is_empty() => f.write_str("no data available"),
            Notice::NoData { years } => {
                let list: Vec<String> = years.iter().map(|y| y.to_string()).collect();
                write!(f, "no data available for the selected years ({})", list.join(", "))
            }
            Notice::Failed => f.write_str("error loading data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Host traits
// ---------------------------------------------------------------------------

/// One live chart, table, or card set owned by a [`WidgetSlot`].
pub trait Widget: Send {
    /// Re-render in place with fresh data.
    fn update(&mut self, data: &PanelData) -> Result<()>;
}

/// The host's rendering layer.
pub trait Renderer: Send {
    /// Construct the widget for a panel the first time it receives data.
    fn create(&mut self, panel: Panel, data: &PanelData) -> Result<Box<dyn Widget>>;

    /// Show a notice in the panel's container in place of a widget.
    fn placeholder(&mut self, panel: Panel, notice: &Notice);
}

// ---------------------------------------------------------------------------
// WidgetSlot
// ---------------------------------------------------------------------------

/// Per-panel widget holder: either nothing has been rendered yet, or the
/// slot owns a live instance to update in place.
pub enum WidgetSlot {
    Uninitialized,
    Live(Box<dyn Widget>),
}

impl WidgetSlot {
    pub fn is_live(&self) -> bool {
        matches!(self, WidgetSlot::Live(_))
    }

    /// Drop any live widget and return the slot to `Uninitialized`.
    pub fn clear(&mut self) {
        *self = WidgetSlot::Uninitialized;
    }

    /// Create-or-update dispatch: a live widget is updated in place, an
    /// uninitialized slot asks the renderer for a new instance and goes live.
    pub(crate) fn render(
        &mut self,
        panel: Panel,
        data: &PanelData,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        match self {
            WidgetSlot::Live(widget) => widget.update(data),
            WidgetSlot::Uninitialized => {
                let widget = renderer.create(panel, data)?;
                *self = WidgetSlot::Live(widget);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for WidgetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetSlot::Uninitialized => f.write_str("Uninitialized"),
            WidgetSlot::Live(_) => f.write_str("Live"),
        }
    }
}
