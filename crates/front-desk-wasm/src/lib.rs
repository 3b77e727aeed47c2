//! WASM bindings for front-desk.
//!
//! Exposes availability checks, room allocation, pricing and the daily room
//! board to the browser calendar. The caller owns persistence and passes its
//! current bookings and closures on every call; all complex types cross the
//! boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p front-desk-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/front_desk_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate};
use front_desk::{
    report, standard_rooms, AssignedRoom, Booking, Closure, DateRange, GuestGroup, Settings,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum AllocationDto {
    Assigned { rooms: Vec<AssignedRoom> },
    Rejected { message: String },
}

// ---------------------------------------------------------------------------
// Helpers: parse dates and JSON collections
// ---------------------------------------------------------------------------

/// Parse a calendar date.
///
/// Accepts a plain date (`"2024-07-01"`) or an RFC 3339 timestamp
/// (`"2024-07-01T00:00:00.000Z"`), whose date part is used as written.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_stay(check_in: &str, check_out: &str) -> Result<DateRange, JsValue> {
    Ok(DateRange::new(parse_date(check_in)?, parse_date(check_out)?))
}

fn parse_json<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether a room is free between `check_in` and `check_out` (exclusive).
///
/// `bookings_json` and `closures_json` are JSON arrays in the ledger format.
/// `exclude_booking_id` skips the booking being edited.
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(
    room_id: u32,
    check_in: &str,
    check_out: &str,
    bookings_json: &str,
    closures_json: &str,
    exclude_booking_id: Option<String>,
) -> Result<bool, JsValue> {
    let stay = parse_stay(check_in, check_out)?;
    let bookings: Vec<Booking> = parse_json("bookings", bookings_json)?;
    let closures: Vec<Closure> = parse_json("closures", closures_json)?;

    Ok(front_desk::is_available(
        room_id,
        &stay,
        &bookings,
        &closures,
        exclude_booking_id.as_deref(),
    ))
}

/// Assign rooms to guest groups over the standard inventory.
///
/// `groups_json` is an array of `{adults, children}`. Returns a JSON object
/// tagged by `outcome`: `{"outcome":"assigned","rooms":[...]}` or
/// `{"outcome":"rejected","message":"..."}`. A rejection is a normal result,
/// not a thrown error.
#[wasm_bindgen(js_name = "allocateRooms")]
pub fn allocate_rooms(
    groups_json: &str,
    check_in: &str,
    check_out: &str,
    bookings_json: &str,
    closures_json: &str,
    exclude_booking_id: Option<String>,
) -> Result<String, JsValue> {
    let groups: Vec<GuestGroup> = parse_json("groups", groups_json)?;
    let stay = parse_stay(check_in, check_out)?;
    let bookings: Vec<Booking> = parse_json("bookings", bookings_json)?;
    let closures: Vec<Closure> = parse_json("closures", closures_json)?;

    let dto = match front_desk::find_best_rooms(
        &groups,
        &stay,
        &bookings,
        &closures,
        exclude_booking_id.as_deref(),
    ) {
        Ok(rooms) => AllocationDto::Assigned { rooms },
        Err(e) => AllocationDto::Rejected {
            message: e.to_string(),
        },
    };
    to_json(&dto)
}

/// Price one room's occupants for `nights` nights with the given rates.
#[wasm_bindgen(js_name = "calculatePrice")]
pub fn calculate_price(
    adults: u32,
    children: u32,
    nights: i32,
    settings_json: &str,
) -> Result<f64, JsValue> {
    let settings: Settings = parse_json("settings", settings_json)?;
    Ok(front_desk::price(adults, children, i64::from(nights), &settings))
}

/// Price every assigned room of a booking and sum the results.
#[wasm_bindgen(js_name = "calculateBookingPrice")]
pub fn calculate_booking_price(
    assigned_rooms_json: &str,
    nights: i32,
    settings_json: &str,
) -> Result<f64, JsValue> {
    let rooms: Vec<AssignedRoom> = parse_json("assigned rooms", assigned_rooms_json)?;
    let settings: Settings = parse_json("settings", settings_json)?;
    Ok(front_desk::booking_price(&rooms, i64::from(nights), &settings))
}

/// Tourist tax for `taxable_adults` staying `nights` nights from `check_in`.
#[wasm_bindgen(js_name = "calculateTouristTax")]
pub fn calculate_tourist_tax(
    taxable_adults: u32,
    nights: i32,
    check_in: &str,
) -> Result<f64, JsValue> {
    let check_in = parse_date(check_in)?;
    Ok(front_desk::tourist_tax(
        taxable_adults,
        i64::from(nights),
        check_in,
    ))
}

/// Room board for `day`: a JSON array with one `{room_id, room_name, status, ...}`
/// entry per room.
#[wasm_bindgen(js_name = "roomOverview")]
pub fn room_overview(day: &str, bookings_json: &str, closures_json: &str) -> Result<String, JsValue> {
    let day = parse_date(day)?;
    let bookings: Vec<Booking> = parse_json("bookings", bookings_json)?;
    let closures: Vec<Closure> = parse_json("closures", closures_json)?;

    let board = report::room_overview(&standard_rooms(), day, &bookings, &closures);
    to_json(&board)
}

/// The standard room inventory as a JSON array of `{id, name, capacity}`.
#[wasm_bindgen(js_name = "listRooms")]
pub fn list_rooms() -> Result<String, JsValue> {
    to_json(&standard_rooms())
}
