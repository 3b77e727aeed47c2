//! Greedy room assignment for the guest groups of one booking.
//!
//! Groups are placed largest first, each into the smallest free room that
//! holds it. The heuristic is not globally optimal: some distributions that a
//! different ordering could satisfy are rejected.
//!
//! Allocation is all-or-nothing. If any group cannot be placed, no partial
//! assignment is returned.

use std::cmp::Reverse;

use tracing::{debug, warn};

use crate::availability::available_rooms;
use crate::error::AllocationError;
use crate::rooms::{standard_rooms, Room};
use crate::stay::DateRange;
use crate::types::{AssignedRoom, Booking, Closure, GuestGroup};

/// Assign one room from `rooms` to each non-empty guest group for `stay`.
///
/// # Algorithm
/// 1. Candidate pool: rooms available over `stay` (see
///    [`crate::availability::is_available`]).
/// 2. Groups are stable-sorted by total occupants, descending.
/// 3. Each group takes the remaining candidate with the smallest capacity
///    that fits it, ties going to the lower room id. The room leaves the pool.
/// 4. Groups with no occupants are skipped and produce no assignment.
///
/// The result lists assignments in placement order (largest group first).
///
/// # Errors
/// Returns [`AllocationError::NoFeasibleAssignment`] naming the first group
/// (by its index in `groups`) that no remaining room can hold.
pub fn allocate(
    rooms: &[Room],
    groups: &[GuestGroup],
    stay: &DateRange,
    bookings: &[Booking],
    closures: &[Closure],
    exclude_booking_id: Option<&str>,
) -> Result<Vec<AssignedRoom>, AllocationError> {
    let mut pool = available_rooms(rooms, stay, bookings, closures, exclude_booking_id);

    let mut order: Vec<(usize, &GuestGroup)> = groups.iter().enumerate().collect();
    order.sort_by_key(|(_, group)| Reverse(group.total()));

    let mut assigned = Vec::with_capacity(groups.len());
    for (group_index, group) in order {
        let occupants = group.total();
        if occupants == 0 {
            continue;
        }

        let tightest = pool
            .iter()
            .enumerate()
            .filter(|(_, room)| room.capacity >= occupants)
            .min_by_key(|(_, room)| (room.capacity, room.id))
            .map(|(pos, _)| pos);

        let Some(pos) = tightest else {
            warn!(
                group_index,
                occupants,
                free_rooms = pool.len(),
                "no room fits guest group"
            );
            return Err(AllocationError::NoFeasibleAssignment {
                group_index,
                occupants,
            });
        };

        let room = pool.remove(pos);
        debug!(room_id = room.id, capacity = room.capacity, occupants, "assigned room");
        assigned.push(AssignedRoom {
            room_id: room.id,
            guests_adults: group.adults,
            guests_children: group.children,
        });
    }

    Ok(assigned)
}

/// [`allocate`] against the property's standard six-room inventory.
pub fn find_best_rooms(
    groups: &[GuestGroup],
    stay: &DateRange,
    bookings: &[Booking],
    closures: &[Closure],
    exclude_booking_id: Option<&str>,
) -> Result<Vec<AssignedRoom>, AllocationError> {
    allocate(
        &standard_rooms(),
        groups,
        stay,
        bookings,
        closures,
        exclude_booking_id,
    )
}
