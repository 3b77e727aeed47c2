//! Nightly room pricing.
//!
//! Prices a single room's occupants. A booking spread over several rooms is
//! priced room by room and summed, never from the booking's guest totals.

use crate::types::{AssignedRoom, Settings};

/// Price of one room for `nights` nights.
///
/// The adult component is the single rate for one adult, the double rate for
/// two, plus the third-adult surcharge for three, plus the fourth-adult rate
/// for every adult beyond two from four upwards. Each child adds the child
/// rate. The nightly total is multiplied by `nights`.
///
/// Returns 0 when the room is empty or `nights <= 0`.
pub fn price(adults: u32, children: u32, nights: i64, settings: &Settings) -> f64 {
    if (adults == 0 && children == 0) || nights <= 0 {
        return 0.0;
    }

    let adult_price = match adults {
        0 => 0.0,
        1 => settings.single_room,
        2 => settings.double_room,
        3 => settings.double_room + settings.third_adult,
        n => {
            settings.double_room + settings.third_adult + settings.fourth_adult * f64::from(n - 2)
        }
    };
    let children_price = f64::from(children) * settings.child;

    (adult_price + children_price) * nights as f64
}

/// Sum of [`price`] over every assigned room.
pub fn booking_price(rooms: &[AssignedRoom], nights: i64, settings: &Settings) -> f64 {
    rooms
        .iter()
        .map(|r| price(r.guests_adults, r.guests_children, nights, settings))
        .sum()
}
