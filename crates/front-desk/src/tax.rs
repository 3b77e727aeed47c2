//! Seasonal tourist tax.

use chrono::{Datelike, NaiveDate};

use crate::types::TouristTaxStatus;

/// Per adult per night, check-in May through October.
pub const HIGH_SEASON_RATE: f64 = 2.0;
/// Per adult per night, check-in November through April.
pub const LOW_SEASON_RATE: f64 = 1.5;

/// Nightly rate for a stay starting on `check_in`.
///
/// Only the check-in month counts; a stay that crosses into the other season
/// keeps its check-in rate.
pub fn season_rate(check_in: NaiveDate) -> f64 {
    match check_in.month() {
        5..=10 => HIGH_SEASON_RATE,
        _ => LOW_SEASON_RATE,
    }
}

/// Tourist tax owed by `taxable_adults` for `nights` nights.
///
/// Returns 0 when nobody is taxable or `nights <= 0`.
pub fn tourist_tax(taxable_adults: u32, nights: i64, check_in: NaiveDate) -> f64 {
    if taxable_adults == 0 || nights <= 0 {
        return 0.0;
    }
    season_rate(check_in) * f64::from(taxable_adults) * nights as f64
}

/// Adults liable for the tax. Children are never taxed, and an exempt
/// booking has no taxable guests at all.
pub fn taxable_adults(adults: u32, status: TouristTaxStatus) -> u32 {
    match status {
        TouristTaxStatus::Normal => adults,
        TouristTaxStatus::Exempt => 0,
    }
}
