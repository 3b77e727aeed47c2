//! Property-based tests for availability and allocation using proptest.
//!
//! These check invariants that must hold for any guest distribution and any
//! mix of existing bookings, not just the examples in `allocator_tests.rs`.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use front_desk::{
    available_rooms, find_best_rooms, is_available, standard_rooms, AssignedRoom, Booking,
    BookingStatus, Closure, ClosureScope, CustomerType, DateRange, GuestGroup, TouristTaxStatus,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

/// A stay of 1-7 nights starting within the first 20 days of July 2024.
fn arb_range() -> impl Strategy<Value = DateRange> {
    (0i64..20, 1i64..=7).prop_map(|(offset, nights)| {
        let start = base() + Duration::days(offset);
        DateRange::new(start, start + Duration::days(nights))
    })
}

fn arb_group() -> impl Strategy<Value = GuestGroup> {
    (0u32..=5, 0u32..=3).prop_map(|(adults, children)| GuestGroup::new(adults, children))
}

fn arb_groups() -> impl Strategy<Value = Vec<GuestGroup>> {
    prop::collection::vec(arb_group(), 0..=7)
}

fn arb_booking() -> impl Strategy<Value = Booking> {
    (1u32..=6, arb_range(), 0u8..3).prop_map(|(room_id, stay, status)| Booking {
        id: format!("b-{}-{}", room_id, stay.start),
        name: "Guest".to_string(),
        phone: String::new(),
        email: None,
        notes: None,
        customer_type: CustomerType::Private,
        stay,
        guests_adults: 2,
        guests_children: 0,
        assigned_rooms: vec![AssignedRoom {
            room_id,
            guests_adults: 2,
            guests_children: 0,
        }],
        price: 0.0,
        tourist_tax: 0.0,
        tourist_tax_status: TouristTaxStatus::Normal,
        status: if status == 0 {
            BookingStatus::Cancelled
        } else {
            BookingStatus::Confirmed
        },
    })
}

fn arb_bookings() -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec(arb_booking(), 0..8)
}

fn arb_closures() -> impl Strategy<Value = Vec<Closure>> {
    prop::collection::vec(
        (prop::option::of(1u32..=6), arb_range()).prop_map(|(room, period)| Closure {
            id: "c".to_string(),
            scope: room.map_or(ClosureScope::All, ClosureScope::Room),
            period,
            reason: "works".to_string(),
        }),
        0..2,
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// A room is unavailable exactly when an active booking on it, or a
    /// closure covering it, has a positive-length intersection with the stay.
    #[test]
    fn availability_matches_overlap_definition(
        room_id in 1u32..=6,
        stay in arb_range(),
        bookings in arb_bookings(),
        closures in arb_closures(),
    ) {
        let overlap = |r: &DateRange| r.start.max(stay.start) < r.end.min(stay.end);
        let blocked = bookings.iter().any(|b| {
            b.status != BookingStatus::Cancelled && b.occupies(room_id) && overlap(&b.stay)
        }) || closures.iter().any(|c| c.scope.covers(room_id) && overlap(&c.period));

        prop_assert_eq!(is_available(room_id, &stay, &bookings, &closures, None), !blocked);
    }

    /// Allocation is deterministic.
    #[test]
    fn allocation_is_deterministic(
        groups in arb_groups(),
        stay in arb_range(),
        bookings in arb_bookings(),
    ) {
        let a = find_best_rooms(&groups, &stay, &bookings, &[], None);
        let b = find_best_rooms(&groups, &stay, &bookings, &[], None);
        prop_assert_eq!(a, b);
    }

    /// Every successful assignment uses distinct, available rooms that fit
    /// their group, and places every non-empty group exactly once.
    #[test]
    fn successful_assignment_is_valid(
        groups in arb_groups(),
        stay in arb_range(),
        bookings in arb_bookings(),
        closures in arb_closures(),
    ) {
        let rooms = standard_rooms();
        if let Ok(assigned) = find_best_rooms(&groups, &stay, &bookings, &closures, None) {
            let ids: HashSet<u32> = assigned.iter().map(|a| a.room_id).collect();
            prop_assert_eq!(ids.len(), assigned.len(), "room used twice");

            for a in &assigned {
                prop_assert!(is_available(a.room_id, &stay, &bookings, &closures, None));
                let room = rooms.iter().find(|r| r.id == a.room_id).unwrap();
                prop_assert!(room.capacity >= a.guests_adults + a.guests_children);
            }

            let placed = groups.iter().filter(|g| g.total() > 0).count();
            prop_assert_eq!(assigned.len(), placed);

            let requested: u32 = groups.iter().map(|g| g.total()).sum();
            let seated: u32 = assigned.iter().map(|a| a.guests_adults + a.guests_children).sum();
            prop_assert_eq!(requested, seated);
        }
    }

    /// A group bigger than every free room always fails the whole request.
    #[test]
    fn oversized_group_always_fails(
        mut groups in arb_groups(),
        stay in arb_range(),
        bookings in arb_bookings(),
    ) {
        let rooms = standard_rooms();
        let free = available_rooms(&rooms, &stay, &bookings, &[], None);
        let largest = free.iter().map(|r| r.capacity).max().unwrap_or(0);

        groups.push(GuestGroup::new(largest + 1, 0));
        prop_assert!(find_best_rooms(&groups, &stay, &bookings, &[], None).is_err());
    }

    /// Rooms booked on disjoint dates stay available for a third disjoint stay.
    #[test]
    fn disjoint_stays_do_not_interfere(room_id in 1u32..=6, gap in 0i64..5) {
        let first = DateRange::new(base(), base() + Duration::days(3));
        let second_start = first.end + Duration::days(gap);
        let second = DateRange::new(second_start, second_start + Duration::days(2));
        let third = DateRange::new(second.end, second.end + Duration::days(4));

        let make = |id: &str, stay: DateRange| Booking {
            id: id.to_string(),
            name: "Guest".to_string(),
            phone: String::new(),
            email: None,
            notes: None,
            customer_type: CustomerType::Private,
            stay,
            guests_adults: 1,
            guests_children: 0,
            assigned_rooms: vec![AssignedRoom { room_id, guests_adults: 1, guests_children: 0 }],
            price: 0.0,
            tourist_tax: 0.0,
            tourist_tax_status: TouristTaxStatus::Normal,
            status: BookingStatus::Confirmed,
        };
        let bookings = vec![make("a", first), make("b", second)];

        prop_assert!(is_available(room_id, &third, &bookings, &[], None));
    }
}
