//! # front-desk
//!
//! Room allocation, availability checks and stay pricing for a small hotel
//! front desk with a fixed inventory of rooms.
//!
//! The pure functions ([`is_available`], [`allocate`], [`price`],
//! [`tourist_tax`]) take full collections as arguments and never perform I/O.
//! The [`Desk`] wraps them with an injected [`Repository`] so that every
//! booking change is computed against one snapshot and written back once.
//!
//! ## Modules
//!
//! - [`types`]: bookings, closures, settings and the persisted ledger
//! - [`rooms`]: the room inventory
//! - [`stay`]: half-open date ranges and night counts
//! - [`availability`]: booking/closure overlap checks per room
//! - [`allocator`]: greedy tightest-fit room assignment for guest groups
//! - [`pricing`]: nightly room pricing from settings
//! - [`tax`]: seasonal tourist tax
//! - [`desk`]: booking workflows over a repository
//! - [`store`]: repository trait with in-memory and JSON file backends
//! - [`report`]: room overview, arrivals and revenue analytics
//! - [`error`]: Error types

pub mod allocator;
pub mod availability;
pub mod desk;
pub mod error;
pub mod pricing;
pub mod report;
pub mod rooms;
pub mod stay;
pub mod store;
pub mod tax;
pub mod types;

pub use allocator::{allocate, find_best_rooms};
pub use availability::{available_rooms, find_conflict, is_available, Conflict};
pub use desk::{BookingRequest, Desk, Quote};
pub use error::{AllocationError, DeskError, StoreError};
pub use pricing::{booking_price, price};
pub use rooms::{standard_rooms, Room, RoomId};
pub use stay::DateRange;
pub use store::{JsonFileRepository, MemoryRepository, Repository};
pub use tax::{taxable_adults, tourist_tax};
pub use types::{
    AssignedRoom, Booking, BookingStatus, Closure, ClosureScope, CustomerType, GuestGroup,
    Ledger, Settings, SettingsPatch, TouristTaxStatus,
};
