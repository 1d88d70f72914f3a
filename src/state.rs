//! The dashboard's single mutable state object.
//!
//! All mutation goes through the [`Dashboard`](crate::Dashboard) methods and
//! the refresh orchestrator; nothing else writes here. Reads are open.

use std::collections::HashMap;

use crate::filter::{filter_by_years, YearSelection};
use crate::models::TripStats;
use crate::period::Granularity;
use crate::widgets::{Panel, WidgetSlot};

/// Raw and filtered datasets, the active selection, and one widget slot per
/// panel.
pub struct DashboardState {
    raw: Vec<TripStats>,
    filtered: Vec<TripStats>,
    years: YearSelection,
    granularity: Granularity,
    slots: HashMap<Panel, WidgetSlot>,
}

impl DashboardState {
    pub(crate) fn new(years: YearSelection, granularity: Granularity) -> Self {
        let slots = Panel::ALL
            .into_iter()
            .map(|panel| (panel, WidgetSlot::Uninitialized))
            .collect();
        Self {
            raw: Vec::new(),
            filtered: Vec::new(),
            years,
            granularity,
            slots,
        }
    }

    // -- Reads -------------------------------------------------------------

    /// The primary dataset as last fetched, unfiltered.
    pub fn raw(&self) -> &[TripStats] {
        &self.raw
    }

    /// The year-filtered view of [`raw`](Self::raw), date-ascending. Kept in
    /// sync by the orchestrator: recomputed before every render pass.
    pub fn filtered(&self) -> &[TripStats] {
        &self.filtered
    }

    pub fn years(&self) -> &YearSelection {
        &self.years
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Whether a panel currently owns a live widget instance.
    pub fn is_live(&self, panel: Panel) -> bool {
        self.slots
            .get(&panel)
            .map_or(false, |slot| slot.is_live())
    }

    /// Panels with a live widget, in a fixed order.
    pub fn live_panels(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|panel| self.is_live(*panel))
            .collect()
    }

    // -- Orchestrator-owned mutations --------------------------------------

    /// Replace the primary dataset wholesale after a fetch.
    pub(crate) fn set_raw(&mut self, rows: Vec<TripStats>) {
        self.raw = rows;
    }

    /// Recompute `filtered` from the current raw data and selection.
    pub(crate) fn refilter(&mut self) {
        self.filtered = filter_by_years(&self.raw, &self.years);
    }

    pub(crate) fn years_mut(&mut self) -> &mut YearSelection {
        &mut self.years
    }

    pub(crate) fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub(crate) fn slot_mut(&mut self, panel: Panel) -> &mut WidgetSlot {
        self.slots.entry(panel).or_insert(WidgetSlot::Uninitialized)
    }
}
