//! Tests for date ranges, the room inventory and ledger serialization.

use front_desk::rooms::find_room;
use front_desk::{standard_rooms, ClosureScope, DateRange, Ledger, RoomId};

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(start.parse().unwrap(), end.parse().unwrap())
}

// ── DateRange ───────────────────────────────────────────────────────────────

#[test]
fn nights_counts_days() {
    assert_eq!(range("2024-07-01", "2024-07-04").nights(), 3);
    assert_eq!(range("2024-02-28", "2024-03-01").nights(), 2);
    assert_eq!(range("2024-07-04", "2024-07-01").nights(), -3);
    assert!(range("2024-07-01", "2024-07-01").is_empty());
    assert!(range("2024-07-04", "2024-07-01").is_empty());
}

#[test]
fn touching_ranges_do_not_overlap() {
    let a = range("2024-07-01", "2024-07-04");
    let b = range("2024-07-04", "2024-07-06");
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn partial_and_nested_ranges_overlap() {
    let stay = range("2024-07-01", "2024-07-10");
    assert!(stay.overlaps(&range("2024-06-25", "2024-07-02")));
    assert!(stay.overlaps(&range("2024-07-03", "2024-07-04")));
    assert!(range("2024-07-03", "2024-07-04").overlaps(&stay));
}

#[test]
fn empty_range_never_overlaps() {
    let stay = range("2024-07-01", "2024-07-05");
    let empty = range("2024-07-03", "2024-07-03");
    assert!(!stay.overlaps(&empty));
    assert!(!empty.overlaps(&stay));
}

#[test]
fn contains_is_end_exclusive() {
    let stay = range("2024-07-01", "2024-07-03");
    assert!(stay.contains("2024-07-01".parse().unwrap()));
    assert!(stay.contains("2024-07-02".parse().unwrap()));
    assert!(!stay.contains("2024-07-03".parse().unwrap()));
}

// ── Rooms ───────────────────────────────────────────────────────────────────

#[test]
fn standard_inventory_matches_property() {
    let rooms = standard_rooms();
    let layout: Vec<(RoomId, u32)> = rooms.iter().map(|r| (r.id, r.capacity)).collect();
    assert_eq!(layout, vec![(1, 3), (2, 3), (3, 4), (4, 2), (5, 4), (6, 3)]);
    assert_eq!(rooms[3].name, "Room 4");
}

#[test]
fn find_room_by_id() {
    let rooms = standard_rooms();
    assert_eq!(find_room(&rooms, 5).map(|r| r.capacity), Some(4));
    assert!(find_room(&rooms, 7).is_none());
}

// ── Serialization ───────────────────────────────────────────────────────────

#[test]
fn closure_scope_serializes_as_number_or_all() {
    assert_eq!(serde_json::to_string(&ClosureScope::Room(3)).unwrap(), "3");
    assert_eq!(serde_json::to_string(&ClosureScope::All).unwrap(), "\"all\"");

    let room: ClosureScope = serde_json::from_str("2").unwrap();
    assert_eq!(room, ClosureScope::Room(2));
    let all: ClosureScope = serde_json::from_str("\"all\"").unwrap();
    assert_eq!(all, ClosureScope::All);
    assert!(serde_json::from_str::<ClosureScope>("\"lobby\"").is_err());
}

#[test]
fn date_range_serializes_iso_dates() {
    let json = serde_json::to_string(&range("2024-07-01", "2024-07-04")).unwrap();
    assert_eq!(json, r#"{"start":"2024-07-01","end":"2024-07-04"}"#);
}

#[test]
fn empty_object_loads_default_ledger() {
    let ledger: Ledger = serde_json::from_str("{}").unwrap();
    assert_eq!(ledger, Ledger::default());
    assert_eq!(ledger.settings.double_room, 45.0);
}
