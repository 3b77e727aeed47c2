//! The property's room inventory.

use serde::{Deserialize, Serialize};

pub type RoomId = u32;

/// A physical room. Reference data, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
        }
    }
}

/// Capacities of rooms 1 through 6, in id order.
const STANDARD_CAPACITIES: [u32; 6] = [3, 3, 4, 2, 4, 3];

/// The six rooms of the property, sorted by id.
pub fn standard_rooms() -> Vec<Room> {
    STANDARD_CAPACITIES
        .iter()
        .zip(1..)
        .map(|(&capacity, id)| Room::new(id, format!("Room {id}"), capacity))
        .collect()
}

/// Look up a room by id.
pub fn find_room(rooms: &[Room], id: RoomId) -> Option<&Room> {
    rooms.iter().find(|r| r.id == id)
}

