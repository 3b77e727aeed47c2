//! Booking workflows over an injected [`Repository`].
//!
//! Every write loads the ledger once, computes against that snapshot and
//! saves it back once. A rejected request (validation or allocation failure)
//! saves nothing. The desk is the single writer: callers that share a ledger
//! between clients must serialize access to it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::allocator::allocate;
use crate::availability::{find_conflict, Conflict};
use crate::error::{DeskError, Result};
use crate::pricing::booking_price;
use crate::rooms::{find_room, standard_rooms, Room};
use crate::stay::DateRange;
use crate::store::Repository;
use crate::tax::{taxable_adults, tourist_tax};
use crate::types::{
    AssignedRoom, Booking, BookingStatus, Closure, ClosureScope, CustomerType, GuestGroup, Ledger,
    Settings, SettingsPatch, TouristTaxStatus,
};

/// Guest details and room distribution for a new or updated booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub customer_type: CustomerType,
    #[serde(default)]
    pub tourist_tax_status: TouristTaxStatus,
    pub stay: DateRange,
    /// One entry per room wanted.
    pub groups: Vec<GuestGroup>,
}

impl BookingRequest {
    /// A private, tax-paying request with no contact details.
    pub fn new(name: impl Into<String>, stay: DateRange, groups: Vec<GuestGroup>) -> Self {
        Self {
            name: name.into(),
            phone: String::new(),
            email: None,
            notes: None,
            customer_type: CustomerType::default(),
            tourist_tax_status: TouristTaxStatus::default(),
            stay,
            groups,
        }
    }
}

/// Price, tax and tentative rooms for a stay, without persisting anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub nights: i64,
    pub assigned_rooms: Vec<AssignedRoom>,
    pub price: f64,
    pub tourist_tax: f64,
}

impl Quote {
    pub fn total(&self) -> f64 {
        self.price + self.tourist_tax
    }
}

pub struct Desk<R> {
    repo: R,
    rooms: Vec<Room>,
}

impl<R: Repository> Desk<R> {
    /// A desk over the standard six-room inventory.
    pub fn new(repo: R) -> Self {
        Self::with_rooms(repo, standard_rooms())
    }

    pub fn with_rooms(repo: R, rooms: Vec<Room>) -> Self {
        Self { repo, rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    pub fn ledger(&self) -> Result<Ledger> {
        Ok(self.repo.load()?)
    }

    pub fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.ledger()?.bookings)
    }

    pub fn closures(&self) -> Result<Vec<Closure>> {
        Ok(self.ledger()?.closures)
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.ledger()?.settings)
    }

    pub fn get_booking(&self, id: &str) -> Result<Option<Booking>> {
        Ok(self.ledger()?.bookings.into_iter().find(|b| b.id == id))
    }

    /// Price a stay and find its rooms against the current ledger.
    ///
    /// `exclude_booking_id` lets an existing booking be re-quoted without
    /// conflicting with its own rooms.
    pub fn quote(
        &self,
        request: &BookingRequest,
        exclude_booking_id: Option<&str>,
    ) -> Result<Quote> {
        validate_stay(&request.stay, &request.groups)?;
        let ledger = self.ledger()?;
        self.quote_against(&ledger, request, exclude_booking_id)
    }

    pub fn create_booking(&mut self, request: BookingRequest) -> Result<Booking> {
        validate_request(&request)?;
        let mut ledger = self.ledger()?;

        let quote = self.quote_against(&ledger, &request, None)?;
        let id = ledger.issue_id("bk");
        let booking = build_booking(id, request, quote, BookingStatus::Confirmed);

        ledger.bookings.push(booking.clone());
        sort_bookings(&mut ledger.bookings);
        self.repo.save(&ledger)?;

        info!(
            id = %booking.id,
            rooms = booking.assigned_rooms.len(),
            price = booking.price,
            "booking created"
        );
        Ok(booking)
    }

    /// Replace a booking's details and re-allocate its rooms.
    ///
    /// The booking keeps its id and status. Its current rooms count as free
    /// for the re-allocation.
    pub fn update_booking(&mut self, id: &str, request: BookingRequest) -> Result<Booking> {
        validate_request(&request)?;
        let mut ledger = self.ledger()?;

        let pos = position_of(&ledger, id)?;
        let status = ledger.bookings[pos].status;
        if status == BookingStatus::Cancelled {
            return Err(DeskError::InvalidTransition(format!(
                "booking {} is cancelled and cannot be updated",
                id
            )));
        }

        let quote = self.quote_against(&ledger, &request, Some(id))?;
        let booking = build_booking(id.to_string(), request, quote, status);

        ledger.bookings[pos] = booking.clone();
        sort_bookings(&mut ledger.bookings);
        self.repo.save(&ledger)?;

        info!(id, rooms = booking.assigned_rooms.len(), "booking updated");
        Ok(booking)
    }

    /// Mark a booking cancelled. Its rooms become free; the record stays.
    pub fn cancel_booking(&mut self, id: &str) -> Result<Booking> {
        self.transition(id, BookingStatus::Cancelled, |from| {
            matches!(from, BookingStatus::Confirmed | BookingStatus::CheckedIn)
        })
    }

    pub fn check_in(&mut self, id: &str) -> Result<Booking> {
        self.transition(id, BookingStatus::CheckedIn, |from| {
            from == BookingStatus::Confirmed
        })
    }

    pub fn delete_booking(&mut self, id: &str) -> Result<Booking> {
        let mut ledger = self.ledger()?;
        let pos = position_of(&ledger, id)?;
        let removed = ledger.bookings.remove(pos);
        self.repo.save(&ledger)?;

        info!(id, "booking deleted");
        Ok(removed)
    }

    pub fn add_closure(
        &mut self,
        scope: ClosureScope,
        period: DateRange,
        reason: impl Into<String>,
    ) -> Result<Closure> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DeskError::MissingField("reason"));
        }
        if period.is_empty() {
            return Err(DeskError::InvalidPeriod {
                start: period.start,
                end: period.end,
            });
        }
        if let ClosureScope::Room(room_id) = scope {
            if find_room(&self.rooms, room_id).is_none() {
                return Err(DeskError::UnknownRoom(room_id));
            }
        }

        let mut ledger = self.ledger()?;
        let closure = Closure {
            id: ledger.issue_id("cl"),
            scope,
            period,
            reason,
        };

        let affected = ledger
            .bookings
            .iter()
            .filter(|b| {
                b.is_active()
                    && b.stay.overlaps(&period)
                    && b.assigned_rooms.iter().any(|ar| scope.covers(ar.room_id))
            })
            .count();
        if affected > 0 {
            warn!(id = %closure.id, affected, "closure overlaps existing bookings");
        }

        ledger.closures.push(closure.clone());
        self.repo.save(&ledger)?;

        info!(id = %closure.id, "closure added");
        Ok(closure)
    }

    pub fn remove_closure(&mut self, id: &str) -> Result<Closure> {
        let mut ledger = self.ledger()?;
        let pos = ledger
            .closures
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DeskError::ClosureNotFound(id.to_string()))?;
        let removed = ledger.closures.remove(pos);
        self.repo.save(&ledger)?;

        info!(id, "closure removed");
        Ok(removed)
    }

    /// Merge `patch` into the stored rates. Rates must be finite and
    /// non-negative; see [`Settings::validate`].
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<Settings> {
        let mut ledger = self.ledger()?;
        let settings = ledger.settings.merged(patch);
        settings.validate()?;

        ledger.settings = settings;
        self.repo.save(&ledger)?;

        info!("settings updated");
        Ok(settings)
    }

    fn quote_against(
        &self,
        ledger: &Ledger,
        request: &BookingRequest,
        exclude_booking_id: Option<&str>,
    ) -> Result<Quote> {
        ledger.settings.validate()?;

        let stay = &request.stay;
        let assigned_rooms = allocate(
            &self.rooms,
            &request.groups,
            stay,
            &ledger.bookings,
            &ledger.closures,
            exclude_booking_id,
        )?;

        let nights = stay.nights();
        let price = match request.customer_type {
            CustomerType::Private => booking_price(&assigned_rooms, nights, &ledger.settings),
            CustomerType::BookingCom => 0.0,
        };
        let adults: u32 = request.groups.iter().map(|g| g.adults).sum();
        let tax = tourist_tax(
            taxable_adults(adults, request.tourist_tax_status),
            nights,
            stay.start,
        );

        Ok(Quote {
            nights,
            assigned_rooms,
            price,
            tourist_tax: tax,
        })
    }

    fn transition(
        &mut self,
        id: &str,
        to: BookingStatus,
        allowed: impl Fn(BookingStatus) -> bool,
    ) -> Result<Booking> {
        let mut ledger = self.ledger()?;
        let pos = position_of(&ledger, id)?;
        let booking = &mut ledger.bookings[pos];

        if !allowed(booking.status) {
            return Err(DeskError::InvalidTransition(format!(
                "booking {} cannot go from {:?} to {:?}",
                id, booking.status, to
            )));
        }

        booking.status = to;
        let updated = booking.clone();
        self.repo.save(&ledger)?;

        info!(id, status = ?to, "booking status changed");
        Ok(updated)
    }
}

/// Which booking or closure blocks `room` over `stay`, if any.
pub fn blocking_reason(
    room: &Room,
    stay: &DateRange,
    ledger: &Ledger,
    exclude_booking_id: Option<&str>,
) -> Option<String> {
    find_conflict(
        room.id,
        stay,
        &ledger.bookings,
        &ledger.closures,
        exclude_booking_id,
    )
    .map(|conflict| match conflict {
        Conflict::Booking(b) => format!("{} booked by {} ({})", room.name, b.name, b.id),
        Conflict::Closure(c) => format!("{} closed: {}", room.name, c.reason),
    })
}

fn validate_stay(stay: &DateRange, groups: &[GuestGroup]) -> Result<()> {
    if stay.is_empty() {
        return Err(DeskError::InvalidStay {
            start: stay.start,
            end: stay.end,
        });
    }
    if groups.iter().all(|g| g.total() == 0) {
        return Err(DeskError::NoGuests);
    }
    Ok(())
}

fn validate_request(request: &BookingRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(DeskError::MissingField("name"));
    }
    if request.phone.trim().is_empty() && request.customer_type != CustomerType::BookingCom {
        return Err(DeskError::MissingField("phone"));
    }
    validate_stay(&request.stay, &request.groups)
}

fn position_of(ledger: &Ledger, id: &str) -> Result<usize> {
    ledger
        .bookings
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| DeskError::BookingNotFound(id.to_string()))
}

fn build_booking(
    id: String,
    request: BookingRequest,
    quote: Quote,
    status: BookingStatus,
) -> Booking {
    let guests_adults = quote.assigned_rooms.iter().map(|r| r.guests_adults).sum();
    let guests_children = quote.assigned_rooms.iter().map(|r| r.guests_children).sum();

    Booking {
        id,
        name: request.name,
        phone: request.phone,
        email: request.email,
        notes: request.notes,
        customer_type: request.customer_type,
        stay: request.stay,
        guests_adults,
        guests_children,
        assigned_rooms: quote.assigned_rooms,
        price: quote.price,
        tourist_tax: quote.tourist_tax,
        tourist_tax_status: request.tourist_tax_status,
        status,
    }
}

fn sort_bookings(bookings: &mut [Booking]) {
    bookings.sort_by_key(|b| b.stay.start);
}
