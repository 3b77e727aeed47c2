//! Half-open calendar date ranges.
//!
//! A range `[start, end)` covers the nights from `start` up to but not
//! including `end`, so a stay checking out on the day another checks in does
//! not overlap it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A range of calendar days, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of nights between `start` and `end`. Zero or negative for an
    /// empty or inverted range.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// True when the range covers no nights.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Two ranges overlap iff their intersection has positive length.
    ///
    /// Touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Whether `day` falls inside `[start, end)`.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

