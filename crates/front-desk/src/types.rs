//! Bookings, closures, settings and the persisted ledger.

use serde::{Deserialize, Serialize};

use crate::error::DeskError;
use crate::rooms::RoomId;
use crate::stay::DateRange;

/// How the booking reached the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Direct customer, priced from [`Settings`].
    #[default]
    Private,
    /// Booking.com reservation, settled by the channel.
    BookingCom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouristTaxStatus {
    #[default]
    Normal,
    /// Every guest of the booking is exempt.
    Exempt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    CheckedIn,
    /// Kept for the record; occupies no room.
    Cancelled,
}

/// Occupants requested for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuestGroup {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

impl GuestGroup {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// One physical room used by a booking and the guests placed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedRoom {
    pub room_id: RoomId,
    pub guests_adults: u32,
    pub guests_children: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub customer_type: CustomerType,
    pub stay: DateRange,
    pub guests_adults: u32,
    pub guests_children: u32,
    pub assigned_rooms: Vec<AssignedRoom>,
    pub price: f64,
    pub tourist_tax: f64,
    pub tourist_tax_status: TouristTaxStatus,
    pub status: BookingStatus,
}

impl Booking {
    pub fn total_guests(&self) -> u32 {
        self.guests_adults.saturating_add(self.guests_children)
    }

    /// Whether the booking still holds its rooms.
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    pub fn occupies(&self, room_id: RoomId) -> bool {
        self.assigned_rooms.iter().any(|ar| ar.room_id == room_id)
    }

    pub fn assignment_for(&self, room_id: RoomId) -> Option<&AssignedRoom> {
        self.assigned_rooms.iter().find(|ar| ar.room_id == room_id)
    }
}

/// What a closure blocks: one room or the whole property.
///
/// Serialized as the room number or the string `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScopeRepr", into = "ScopeRepr")]
pub enum ClosureScope {
    All,
    Room(RoomId),
}

impl ClosureScope {
    pub fn covers(&self, room_id: RoomId) -> bool {
        match self {
            ClosureScope::All => true,
            ClosureScope::Room(id) => *id == room_id,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScopeRepr {
    Room(RoomId),
    Keyword(String),
}

impl TryFrom<ScopeRepr> for ClosureScope {
    type Error = String;

    fn try_from(repr: ScopeRepr) -> Result<Self, Self::Error> {
        match repr {
            ScopeRepr::Room(id) => Ok(ClosureScope::Room(id)),
            ScopeRepr::Keyword(k) if k == "all" => Ok(ClosureScope::All),
            ScopeRepr::Keyword(k) => Err(format!("invalid closure scope '{}'", k)),
        }
    }
}

impl From<ClosureScope> for ScopeRepr {
    fn from(scope: ClosureScope) -> Self {
        match scope {
            ClosureScope::All => ScopeRepr::Keyword("all".to_string()),
            ClosureScope::Room(id) => ScopeRepr::Room(id),
        }
    }
}

/// An administrative block on a room or the whole property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    pub id: String,
    pub scope: ClosureScope,
    pub period: DateRange,
    pub reason: String,
}

/// Nightly rates used by [`crate::pricing::price`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// One adult alone in a room.
    pub single_room: f64,
    /// Base rate for two adults.
    pub double_room: f64,
    pub third_adult: f64,
    /// Charged `adults - 2` times once a room holds four or more adults.
    pub fourth_adult: f64,
    pub child: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            single_room: 35.0,
            double_room: 45.0,
            third_adult: 15.0,
            fourth_adult: 15.0,
            child: 10.0,
        }
    }
}

impl Settings {
    /// Apply a partial update, field by field.
    pub fn merged(mut self, patch: &SettingsPatch) -> Self {
        if let Some(v) = patch.single_room {
            self.single_room = v;
        }
        if let Some(v) = patch.double_room {
            self.double_room = v;
        }
        if let Some(v) = patch.third_adult {
            self.third_adult = v;
        }
        if let Some(v) = patch.fourth_adult {
            self.fourth_adult = v;
        }
        if let Some(v) = patch.child {
            self.child = v;
        }
        self
    }

    /// Every rate must be finite and non-negative.
    ///
    /// # Errors
    /// Returns [`DeskError::InvalidSettings`] naming the first offending rate.
    pub fn validate(&self) -> Result<(), DeskError> {
        let rates = [
            ("single_room", self.single_room),
            ("double_room", self.double_room),
            ("third_adult", self.third_adult),
            ("fourth_adult", self.fourth_adult),
            ("child", self.child),
        ];
        match rates.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some((field, value)) => Err(DeskError::InvalidSettings(format!(
                "{} must be a non-negative amount, got {}",
                field, value
            ))),
            None => Ok(()),
        }
    }
}

/// Partial settings update. `None` leaves the current value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub single_room: Option<f64>,
    pub double_room: Option<f64>,
    pub third_adult: Option<f64>,
    pub fourth_adult: Option<f64>,
    pub child: Option<f64>,
}

/// Everything the desk persists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    pub bookings: Vec<Booking>,
    pub closures: Vec<Closure>,
    pub settings: Settings,
    /// Last issued id sequence number, shared by bookings and closures.
    pub next_id: u64,
}

impl Ledger {
    pub(crate) fn issue_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{:04}", prefix, self.next_id)
    }
}
