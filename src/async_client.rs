//! Async wrapper around [`Dashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all dashboard operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client and the synchronous render pass do their work.
//!
//! # Example
//!
//! ```no_run
//! use tripdash::AsyncDashboard;
//! # use tripdash::{Notice, Panel, PanelData, Renderer, Widget};
//! # struct NullRenderer;
//! # impl Renderer for NullRenderer {
//! #     fn create(&mut self, _: Panel, _: &PanelData) -> tripdash::Result<Box<dyn Widget>> {
//! #         unimplemented!()
//! #     }
//! #     fn placeholder(&mut self, _: Panel, _: &Notice) {}
//! # }
//! # async fn example() -> tripdash::Result<()> {
//! let dashboard = AsyncDashboard::builder()
//!     .build(Box::new(NullRenderer))
//!     .await?;
//!
//! let report = dashboard.load().await?;
//! println!("{} panels refreshed", report.panels.len());
//!
//! // Run any sync dashboard method via closure
//! let years = dashboard.run(|d| Ok(d.selected_years())).await?;
//! println!("selected: {years:?}");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{DashboardError, Result};
use crate::period::Granularity;
use crate::refresh::RefreshReport;
use crate::widgets::Renderer;
use crate::{config, Dashboard};

// ---------------------------------------------------------------------------
// AsyncDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboard`] instance.
pub struct AsyncDashboardBuilder {
    base_url: String,
    years: BTreeSet<i32>,
    granularity: Granularity,
    timeout: Duration,
}

impl Default for AsyncDashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            years: config::default_years(),
            granularity: config::DEFAULT_GRANULARITY,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncDashboardBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the initially selected years.
    pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    /// Set the initial aggregation granularity.
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async dashboard.
    ///
    /// Construction runs on the blocking thread pool; the blocking HTTP
    /// client must not be created on the async event loop.
    pub async fn build(self, renderer: Box<dyn Renderer>) -> Result<AsyncDashboard> {
        tokio::task::spawn_blocking(move || {
            let dashboard = Dashboard::builder()
                .base_url(self.base_url)
                .years(self.years)
                .granularity(self.granularity)
                .timeout(self.timeout)
                .build(renderer)?;
            Ok(AsyncDashboard {
                inner: Arc::new(Mutex::new(dashboard)),
            })
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`Dashboard`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]; the underlying [`Dashboard`] sits behind
/// a [`Mutex`], so calls are serialized in the order the pool runs them.
pub struct AsyncDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

impl AsyncDashboard {
    /// Create a new builder for configuring the async dashboard.
    pub fn builder() -> AsyncDashboardBuilder {
        AsyncDashboardBuilder::default()
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    ///
    /// The closure receives `&mut Dashboard` and should return a
    /// `Result<T>`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tripdash::AsyncDashboard;
    /// # async fn example(dashboard: &AsyncDashboard) -> tripdash::Result<()> {
    /// let filtered_rows = dashboard.run(|d| Ok(d.filtered_data().len())).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Dashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = dashboard
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("dashboard lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch the primary dataset and render every panel.
    pub async fn load(&self) -> Result<RefreshReport> {
        self.run(|d| Ok(d.load())).await
    }

    /// Re-run the full refresh sequence.
    pub async fn refresh(&self) -> Result<RefreshReport> {
        self.run(|d| Ok(d.refresh())).await
    }

    /// Add a year to the selection; `Ok(None)` means it was already selected.
    pub async fn select_year(&self, year: i32) -> Result<Option<RefreshReport>> {
        self.run(move |d| Ok(d.select_year(year))).await
    }

    /// Remove a year from the selection; `Ok(None)` means the change was
    /// rejected (not selected, or last remaining year).
    pub async fn deselect_year(&self, year: i32) -> Result<Option<RefreshReport>> {
        self.run(move |d| Ok(d.deselect_year(year))).await
    }

    /// Switch the aggregation granularity and refresh.
    pub async fn set_granularity(&self, granularity: Granularity) -> Result<RefreshReport> {
        self.run(move |d| Ok(d.set_granularity(granularity))).await
    }

    /// Destroy every live widget and show loading placeholders.
    pub async fn teardown(&self) -> Result<()> {
        self.run(|d| {
            d.teardown();
            Ok(())
        })
        .await
    }

    /// Close the dashboard, dropping the widgets and the HTTP client.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let dashboard = self
                .inner
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("dashboard lock poisoned".into()))?;
            // Dropping the MutexGuard drops the Dashboard
            drop(dashboard);
            Ok(())
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
