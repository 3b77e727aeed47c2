//! Per-room availability against existing bookings and closures.
//!
//! A room is available over a stay when no active booking assigned to it and
//! no closure covering it overlaps the stay. Overlap is half-open: a booking
//! that checks out on the requested check-in day does not conflict.

use crate::rooms::{Room, RoomId};
use crate::stay::DateRange;
use crate::types::{Booking, Closure};

/// What blocks a room over a requested stay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conflict<'a> {
    Booking(&'a Booking),
    Closure(&'a Closure),
}

/// Find the first booking, then the first closure, that blocks `room_id`
/// during `stay`.
///
/// The booking whose id equals `exclude_booking_id` is skipped so that an
/// existing booking can be re-allocated without conflicting with itself.
/// Cancelled bookings never conflict.
pub fn find_conflict<'a>(
    room_id: RoomId,
    stay: &DateRange,
    bookings: &'a [Booking],
    closures: &'a [Closure],
    exclude_booking_id: Option<&str>,
) -> Option<Conflict<'a>> {
    let booking = bookings.iter().find(|b| {
        b.is_active()
            && exclude_booking_id != Some(b.id.as_str())
            && b.occupies(room_id)
            && b.stay.overlaps(stay)
    });
    if let Some(b) = booking {
        return Some(Conflict::Booking(b));
    }

    closures
        .iter()
        .find(|c| c.scope.covers(room_id) && c.period.overlaps(stay))
        .map(Conflict::Closure)
}

/// Whether `room_id` is free for the whole of `stay`.
pub fn is_available(
    room_id: RoomId,
    stay: &DateRange,
    bookings: &[Booking],
    closures: &[Closure],
    exclude_booking_id: Option<&str>,
) -> bool {
    find_conflict(room_id, stay, bookings, closures, exclude_booking_id).is_none()
}

/// Rooms free for the whole of `stay`, in inventory order.
pub fn available_rooms<'r>(
    rooms: &'r [Room],
    stay: &DateRange,
    bookings: &[Booking],
    closures: &[Closure],
    exclude_booking_id: Option<&str>,
) -> Vec<&'r Room> {
    rooms
        .iter()
        .filter(|room| is_available(room.id, stay, bookings, closures, exclude_booking_id))
        .collect()
}
