//! Aggregation granularities and the mapping from a date to its bucket key.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

/// The period unit records are bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bucket keys
// ---------------------------------------------------------------------------

/// Return the canonical start date of the bucket containing `date`.
///
/// - `Day`: the date itself.
/// - `Week`: the Monday on or before the date. Weekday numbering is ISO
///   (Monday = 1 .. Sunday = 7), so a Sunday moves back six days.
/// - `Month`: the first of the date's month.
/// - `Quarter`: the first of the quarter's opening month (January, April,
///   July or October).
///
/// Bucket keys are plain dates; their `YYYY-MM-DD` rendering sorts lexically
/// in chronological order, so grouping and ordering agree.
pub fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Granularity::Month => first_of_month(date.year(), date.month()),
        Granularity::Quarter => first_of_month(date.year(), (date.month() - 1) / 3 * 3 + 1),
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}
