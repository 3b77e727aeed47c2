//! Tests for room pricing and the seasonal tourist tax.

use chrono::NaiveDate;
use front_desk::tax::{season_rate, HIGH_SEASON_RATE, LOW_SEASON_RATE};
use front_desk::{
    booking_price, price, taxable_adults, tourist_tax, AssignedRoom, Settings, TouristTaxStatus,
};

fn settings() -> Settings {
    Settings {
        single_room: 35.0,
        double_room: 45.0,
        third_adult: 15.0,
        fourth_adult: 15.0,
        child: 10.0,
    }
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ── Room price ──────────────────────────────────────────────────────────────

#[test]
fn default_settings_match_house_rates() {
    assert_eq!(Settings::default(), settings());
}

#[test]
fn couple_three_nights() {
    assert_eq!(price(2, 0, 3, &settings()), 135.0);
}

#[test]
fn single_adult_uses_single_rate() {
    assert_eq!(price(1, 0, 2, &settings()), 70.0);
}

#[test]
fn third_adult_adds_surcharge() {
    assert_eq!(price(3, 0, 1, &settings()), 60.0);
}

#[test]
fn four_adults_bill_fourth_rate_per_adult_beyond_two() {
    // 45 + 15 + 15 * 2
    assert_eq!(price(4, 0, 1, &settings()), 90.0);
    // 45 + 15 + 15 * 3
    assert_eq!(price(5, 0, 1, &settings()), 105.0);
}

#[test]
fn children_priced_per_head() {
    assert_eq!(price(2, 2, 2, &settings()), 130.0);
    assert_eq!(price(0, 2, 1, &settings()), 20.0);
}

#[test]
fn empty_room_or_no_nights_is_free() {
    assert_eq!(price(0, 0, 3, &settings()), 0.0);
    assert_eq!(price(2, 0, 0, &settings()), 0.0);
    assert_eq!(price(2, 1, -2, &settings()), 0.0);
}

#[test]
fn custom_rates_are_used() {
    let custom = Settings {
        single_room: 50.0,
        double_room: 80.0,
        third_adult: 20.0,
        fourth_adult: 10.0,
        child: 5.0,
    };
    assert_eq!(price(1, 0, 1, &custom), 50.0);
    assert_eq!(price(4, 1, 1, &custom), 80.0 + 20.0 + 20.0 + 5.0);
}

#[test]
fn booking_priced_room_by_room() {
    let rooms = vec![
        AssignedRoom {
            room_id: 4,
            guests_adults: 2,
            guests_children: 0,
        },
        AssignedRoom {
            room_id: 1,
            guests_adults: 1,
            guests_children: 1,
        },
    ];

    // 45 * 2 + (35 + 10) * 2, not the price of three adults and a child together.
    assert_eq!(booking_price(&rooms, 2, &settings()), 180.0);
    assert_ne!(booking_price(&rooms, 2, &settings()), price(3, 1, 2, &settings()));
}

#[test]
fn booking_without_rooms_is_free() {
    assert_eq!(booking_price(&[], 3, &settings()), 0.0);
}

// ── Tourist tax ─────────────────────────────────────────────────────────────

#[test]
fn summer_stay_taxed_at_high_rate() {
    assert_eq!(tourist_tax(2, 3, day("2024-07-01")), 12.0);
}

#[test]
fn winter_stay_taxed_at_low_rate() {
    assert_eq!(tourist_tax(2, 3, day("2024-12-01")), 9.0);
}

#[test]
fn season_boundaries() {
    assert_eq!(season_rate(day("2024-04-30")), LOW_SEASON_RATE);
    assert_eq!(season_rate(day("2024-05-01")), HIGH_SEASON_RATE);
    assert_eq!(season_rate(day("2024-10-31")), HIGH_SEASON_RATE);
    assert_eq!(season_rate(day("2024-11-01")), LOW_SEASON_RATE);
}

#[test]
fn check_in_month_decides_rate_for_whole_stay() {
    // Checks in October, stays into November.
    assert_eq!(tourist_tax(1, 5, day("2024-10-30")), 10.0);
    // Checks in April, stays into May.
    assert_eq!(tourist_tax(1, 4, day("2024-04-29")), 6.0);
}

#[test]
fn no_taxable_adults_or_nights_is_zero() {
    assert_eq!(tourist_tax(0, 3, day("2024-07-01")), 0.0);
    assert_eq!(tourist_tax(2, 0, day("2024-07-01")), 0.0);
    assert_eq!(tourist_tax(2, -1, day("2024-07-01")), 0.0);
}

#[test]
fn exemption_zeroes_every_adult() {
    assert_eq!(taxable_adults(3, TouristTaxStatus::Normal), 3);
    assert_eq!(taxable_adults(3, TouristTaxStatus::Exempt), 0);
    assert_eq!(
        tourist_tax(
            taxable_adults(3, TouristTaxStatus::Exempt),
            4,
            day("2024-08-01")
        ),
        0.0
    );
}
