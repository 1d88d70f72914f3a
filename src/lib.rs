//! Client-side analytics engine for a taxi trip-volume dashboard.
//!
//! Fetches aggregated trip statistics from a read-only REST backend, narrows
//! them to the selected years, re-aggregates them into day/week/month/quarter
//! periods with trip-count-weighted averages, and drives the host's chart and
//! table widgets through the [`widgets::Renderer`] trait. Panels are
//! fault-isolated: a failing endpoint or widget degrades to an inline
//! placeholder while the rest of the dashboard keeps rendering.
//!
//! # Quick start
//!
//! ```no_run
//! use tripdash::{Dashboard, Granularity};
//! # use tripdash::widgets::{Notice, Panel, PanelData, Renderer, Widget};
//! # struct NullRenderer;
//! # impl Renderer for NullRenderer {
//! #     fn create(&mut self, _: Panel, _: &PanelData) -> tripdash::Result<Box<dyn Widget>> {
//! #         unimplemented!()
//! #     }
//! #     fn placeholder(&mut self, _: Panel, _: &Notice) {}
//! # }
//!
//! let mut dashboard = Dashboard::builder()
//!     .base_url("http://127.0.0.1:3000")
//!     .years([2024])
//!     .build(Box::new(NullRenderer))
//!     .unwrap();
//!
//! // Fetch the primary dataset and render every panel.
//! dashboard.load();
//!
//! // Filter events re-run the same refresh sequence.
//! dashboard.set_granularity(Granularity::Week);
//! dashboard.select_year(2023);
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod period;
pub mod refresh;
pub mod state;
pub mod widgets;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboard;
pub use client::{ApiClient, TripSource};
pub use error::{DashboardError, Result};
pub use filter::YearSelection;
pub use models::TripStats;
pub use period::Granularity;
pub use refresh::{PanelOutcome, RefreshReport};
pub use state::DashboardState;
pub use widgets::{Notice, Panel, PanelData, Renderer, Widget, WidgetSlot};

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain one, chain configuration methods,
/// and call [`build()`](DashboardBuilder::build) with the host's renderer.
pub struct DashboardBuilder {
    base_url: String,
    years: BTreeSet<i32>,
    granularity: Granularity,
    timeout: Duration,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            years: config::default_years(),
            granularity: config::DEFAULT_GRANULARITY,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl DashboardBuilder {
    /// Set the backend base URL. Defaults to `http://127.0.0.1:3000`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the initially selected years. Defaults to `{2024}`.
    pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    /// Set the initial aggregation granularity. Defaults to
    /// [`Granularity::Month`].
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the dashboard against the HTTP backend.
    ///
    /// Constructing the client does not touch the network; nothing is
    /// fetched until [`Dashboard::load()`] runs.
    pub fn build(self, renderer: Box<dyn Renderer>) -> Result<Dashboard> {
        let client = ApiClient::new(self.base_url.as_str(), self.timeout)?;
        Ok(self.build_with_source(Box::new(client), renderer))
    }

    /// Build the dashboard against any [`TripSource`] implementation.
    ///
    /// This is how tests plug in fixture data; the configured base URL and
    /// timeout are ignored since no HTTP client is constructed.
    pub fn build_with_source(
        self,
        source: Box<dyn TripSource>,
        renderer: Box<dyn Renderer>,
    ) -> Dashboard {
        Dashboard {
            source,
            renderer,
            state: DashboardState::new(YearSelection::new(self.years), self.granularity),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The dashboard engine: owns the view state, the data source, and the
/// host's renderer.
///
/// Created via [`Dashboard::builder()`]. All state mutation happens through
/// the methods here; every trigger runs the same filter → aggregate → render
/// sequence and returns a [`RefreshReport`] describing each panel's outcome.
pub struct Dashboard {
    source: Box<dyn TripSource>,
    renderer: Box<dyn Renderer>,
    state: DashboardState,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    // -- Refresh triggers --------------------------------------------------

    /// Fetch the primary dataset wholesale and render every panel.
    ///
    /// If the fetch fails the previously loaded rows stay in place, the
    /// error lands in [`RefreshReport::source_error`], and the refresh still
    /// runs so endpoint-backed panels stay current.
    pub fn load(&mut self) -> RefreshReport {
        refresh::load(&*self.source, &mut self.state, &mut *self.renderer)
    }

    /// Re-run the full refresh sequence against the already loaded data.
    pub fn refresh(&mut self) -> RefreshReport {
        refresh::refresh(&*self.source, &mut self.state, &mut *self.renderer)
    }

    /// Add a year to the selection and refresh.
    ///
    /// Returns `None` without refreshing if the year was already selected.
    pub fn select_year(&mut self, year: i32) -> Option<RefreshReport> {
        if !self.state.years_mut().select(year) {
            return None;
        }
        Some(self.refresh())
    }

    /// Remove a year from the selection and refresh.
    ///
    /// Deselecting the last remaining year is rejected: the selection is
    /// left unchanged and `None` is returned without a refresh.
    pub fn deselect_year(&mut self, year: i32) -> Option<RefreshReport> {
        if !self.state.years_mut().deselect(year) {
            return None;
        }
        Some(self.refresh())
    }

    /// Replace the whole year selection and refresh.
    ///
    /// An empty replacement is rejected the same way as deselecting the last
    /// year.
    pub fn set_years(&mut self, years: impl IntoIterator<Item = i32>) -> Option<RefreshReport> {
        if !self.state.years_mut().replace(years) {
            return None;
        }
        Some(self.refresh())
    }

    /// Switch the aggregation granularity and refresh.
    pub fn set_granularity(&mut self, granularity: Granularity) -> RefreshReport {
        self.state.set_granularity(granularity);
        self.refresh()
    }

    /// Destroy every live widget and show loading placeholders, leaving the
    /// loaded data in place for the next [`load()`](Self::load).
    pub fn teardown(&mut self) {
        refresh::teardown(&mut self.state, &mut *self.renderer);
    }

    // -- Reads -------------------------------------------------------------

    /// The full view state, read-only.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The primary dataset as last fetched.
    pub fn raw_data(&self) -> &[TripStats] {
        self.state.raw()
    }

    /// The year-filtered view of the primary dataset.
    pub fn filtered_data(&self) -> &[TripStats] {
        self.state.filtered()
    }

    /// The selected years in ascending order.
    pub fn selected_years(&self) -> Vec<i32> {
        self.state.years().to_vec()
    }

    pub fn granularity(&self) -> Granularity {
        self.state.granularity()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard(years=[{}], granularity={}, raw_rows={}, live_panels={})",
            self.state.years(),
            self.state.granularity(),
            self.state.raw().len(),
            self.state.live_panels().len()
        )
    }
}
