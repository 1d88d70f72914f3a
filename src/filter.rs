//! Year selection and the record filters driven by it.

use std::collections::BTreeSet;
use std::fmt;

use chrono::Datelike;
use tracing::warn;

use crate::models::{FinancialBreakdown, HourlyActivity, TripStats};

// ---------------------------------------------------------------------------
// YearSelection
// ---------------------------------------------------------------------------

/// The set of years the dashboard is narrowed to.
///
/// Transitions keep the set non-empty: deselecting the last remaining year
/// or replacing the selection with an empty set is rejected and leaves the
/// selection unchanged. An empty selection can only exist on a freshly
/// constructed value, and the filters below treat it as "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearSelection {
    years: BTreeSet<i32>,
}

impl YearSelection {
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            years: years.into_iter().collect(),
        }
    }

    /// Add a year. Returns `false` if it was already selected.
    pub fn select(&mut self, year: i32) -> bool {
        self.years.insert(year)
    }

    /// Remove a year. Returns `false` without changing the selection if the
    /// year is not selected or is the last one remaining.
    pub fn deselect(&mut self, year: i32) -> bool {
        if !self.years.contains(&year) {
            return false;
        }
        if self.years.len() == 1 {
            warn!(year, "rejected deselecting the last selected year");
            return false;
        }
        self.years.remove(&year)
    }

    /// Replace the whole selection. Returns `false` without changing the
    /// selection if the replacement is empty.
    pub fn replace(&mut self, years: impl IntoIterator<Item = i32>) -> bool {
        let replacement: BTreeSet<i32> = years.into_iter().collect();
        if replacement.is_empty() {
            warn!("rejected replacing the year selection with an empty set");
            return false;
        }
        self.years = replacement;
        true
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Selected years in ascending order.
    pub fn to_vec(&self) -> Vec<i32> {
        self.years.iter().copied().collect()
    }
}

impl fmt::Display for YearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for year in &self.years {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{year}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Primary dataset filter
// ---------------------------------------------------------------------------

/// Keep the rows whose calendar year is selected, sorted ascending by date.
///
/// An empty selection returns the input unchanged (the selection invariant
/// keeps this from arising out of user actions, but a fresh state may hit
/// it). An empty result is not an error; it is logged here and surfaced by
/// the orchestrator as a no-data notice.
pub fn filter_by_years(records: &[TripStats], years: &YearSelection) -> Vec<TripStats> {
    if years.is_empty() {
        return records.to_vec();
    }

    let mut rows: Vec<TripStats> = records
        .iter()
        .filter(|row| years.contains(row.date.year()))
        .cloned()
        .collect();
    rows.sort_by_key(|row| row.date);

    if rows.is_empty() {
        warn!(years = %years, "no trip records match the selected years");
    }
    rows
}

// ---------------------------------------------------------------------------
// Per-endpoint year scoping
// ---------------------------------------------------------------------------

/// Implemented by endpoint rows that can attribute themselves to a year.
///
/// Rows answering `None` are kept under every selection; endpoint types with
/// no year dimension at all simply do not implement this and skip the
/// restriction step entirely.
pub trait YearScoped {
    fn year(&self) -> Option<i32>;
}

impl YearScoped for TripStats {
    fn year(&self) -> Option<i32> {
        Some(self.date.year())
    }
}

impl YearScoped for FinancialBreakdown {
    fn year(&self) -> Option<i32> {
        Some(self.date.year())
    }
}

impl YearScoped for HourlyActivity {
    fn year(&self) -> Option<i32> {
        self.year
    }
}

/// Keep the rows whose year is selected, passing year-less rows through.
pub fn restrict_to_years<T: YearScoped + Clone>(rows: &[T], years: &YearSelection) -> Vec<T> {
    if years.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| row.year().map_or(true, |year| years.contains(year)))
        .cloned()
        .collect()
}
