//! Error types for front-desk operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::rooms::RoomId;

/// No feasible room combination exists for the requested guest distribution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("no available room fits guest group {group_index} ({occupants} guests)")]
    NoFeasibleAssignment { group_index: usize, occupants: u32 },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("ledger I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt ledger at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum DeskError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid stay: check-out {end} must be after check-in {start}")]
    InvalidStay {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Invalid period: end {end} must be after start {start}")]
    InvalidPeriod {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Booking has no guests")]
    NoGuests,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown room: {0}")]
    UnknownRoom(RoomId),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Closure not found: {0}")]
    ClosureNotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, DeskError>;
