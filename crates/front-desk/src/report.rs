//! Read-only views over the ledger: the day's room board, arrivals and
//! departures, revenue analytics and the arrival notification sheet.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::availability::{find_conflict, Conflict};
use crate::rooms::{find_room, Room, RoomId};
use crate::stay::DateRange;
use crate::types::{Booking, Closure, CustomerType};

/// State of one room on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoomState {
    Occupied {
        booking_id: String,
        guest_name: String,
        adults: u32,
        children: u32,
    },
    Closed {
        closure_id: String,
        reason: String,
    },
    Available,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomStatus {
    pub room_id: RoomId,
    pub room_name: String,
    #[serde(flatten)]
    pub state: RoomState,
}

/// Occupancy of every room on `day`, sorted by room id.
///
/// A room counts as occupied on the nights `[check_in, check_out)`. When a
/// booking and a closure both cover the room, the booking is reported.
pub fn room_overview(
    rooms: &[Room],
    day: NaiveDate,
    bookings: &[Booking],
    closures: &[Closure],
) -> Vec<RoomStatus> {
    let night = match day.succ_opt() {
        Some(next) => DateRange::new(day, next),
        None => return Vec::new(),
    };

    let mut sorted: Vec<&Room> = rooms.iter().collect();
    sorted.sort_by_key(|r| r.id);

    sorted
        .into_iter()
        .map(|room| {
            let state = match find_conflict(room.id, &night, bookings, closures, None) {
                Some(Conflict::Booking(b)) => {
                    let (adults, children) = b
                        .assignment_for(room.id)
                        .map(|ar| (ar.guests_adults, ar.guests_children))
                        .unwrap_or_default();
                    RoomState::Occupied {
                        booking_id: b.id.clone(),
                        guest_name: b.name.clone(),
                        adults,
                        children,
                    }
                }
                Some(Conflict::Closure(c)) => RoomState::Closed {
                    closure_id: c.id.clone(),
                    reason: c.reason.clone(),
                },
                None => RoomState::Available,
            };
            RoomStatus {
                room_id: room.id,
                room_name: room.name.clone(),
                state,
            }
        })
        .collect()
}

/// Active bookings checking in on `day`.
pub fn arrivals_on(day: NaiveDate, bookings: &[Booking]) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| b.is_active() && b.stay.start == day)
        .collect()
}

/// Active bookings checking out on `day`.
pub fn departures_on(day: NaiveDate, bookings: &[Booking]) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| b.is_active() && b.stay.end == day)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// `YYYY-MM` of the check-in date.
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub total_guests: u32,
    /// Private bookings only; channel bookings are settled elsewhere.
    pub total_revenue: f64,
    /// Ascending by month.
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

/// Guest and revenue totals over every active booking.
pub fn analytics(bookings: &[Booking]) -> Analytics {
    let active = || bookings.iter().filter(|b| b.is_active());
    let private = || active().filter(|b| b.customer_type == CustomerType::Private);

    let total_guests: u32 = active().map(Booking::total_guests).sum();
    let total_revenue: f64 = private().map(|b| b.price).sum();

    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for b in private().filter(|b| b.price > 0.0) {
        let key = (b.stay.start.year(), b.stay.start.month());
        *by_month.entry(key).or_insert(0.0) += b.price;
    }

    let monthly_revenue = by_month
        .into_iter()
        .map(|((year, month), revenue)| MonthlyRevenue {
            month: format!("{:04}-{:02}", year, month),
            revenue,
        })
        .collect();

    Analytics {
        total_guests,
        total_revenue,
        monthly_revenue,
    }
}

/// Plain-text notification sheet for the guests arriving on `day`.
///
/// Returns `None` when nobody arrives.
pub fn arrival_sheet(day: NaiveDate, bookings: &[Booking], rooms: &[Room]) -> Option<String> {
    let arrivals = arrivals_on(day, bookings);
    if arrivals.is_empty() {
        return None;
    }

    let mut out = format!("Guest notifications for {}\n\n", day.format("%d/%m/%Y"));
    for (index, b) in arrivals.iter().enumerate() {
        let room_names: Vec<&str> = b
            .assigned_rooms
            .iter()
            .filter_map(|ar| find_room(rooms, ar.room_id).map(|r| r.name.as_str()))
            .collect();
        let room_names = if room_names.is_empty() {
            "N/A".to_string()
        } else {
            room_names.join(", ")
        };

        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "Guest {}:\nName: {}\nArrival: {}\nDeparture: {}\nGuests: {} adults, {} children\nRooms: {}\n\n",
            index + 1,
            b.name,
            b.stay.start.format("%d/%m/%Y"),
            b.stay.end.format("%d/%m/%Y"),
            b.guests_adults,
            b.guests_children,
            room_names,
        );
    }

    Some(out)
}
