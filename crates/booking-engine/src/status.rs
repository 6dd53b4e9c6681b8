//! Booking status classification and summary-view ordering.
//!
//! Status is a pure function of wall-clock time, re-derived on every tick by
//! the host's one-second clock; nothing here is stored on the booking.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::normalize::Booking;

/// Where a booking sits relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    Upcoming,
    Running,
    Finished,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upcoming => "Upcoming",
            Self::Running => "Running",
            Self::Finished => "Finished",
        };
        f.write_str(label)
    }
}

/// Classify a half-open `[start, end)` interval against `now`:
/// `now < start` is upcoming, `start <= now < end` is running,
/// `now >= end` is finished.
pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> BookingStatus {
    if now < start {
        BookingStatus::Upcoming
    } else if now < end {
        BookingStatus::Running
    } else {
        BookingStatus::Finished
    }
}

/// Status of a booking at `now`. Bookings without a parseable interval read
/// as upcoming, matching how unparseable remote data renders.
pub fn status_at(booking: &Booking, now: DateTime<Utc>) -> BookingStatus {
    match booking.interval() {
        Some((start, end)) => classify(start, end, now),
        None => BookingStatus::Upcoming,
    }
}

/// Bookings that have not yet ended, sorted by start time -- the order the
/// summary cards render in. Bookings without a parseable interval are
/// omitted.
pub fn upcoming<'a>(bookings: &'a [Booking], now: DateTime<Utc>) -> Vec<&'a Booking> {
    let mut upcoming: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| matches!(booking.interval(), Some((_, end)) if end > now))
        .collect();
    upcoming.sort_by_key(|booking| booking.start);
    upcoming
}

/// [`upcoming`], restricted to one room.
pub fn upcoming_in_room<'a>(
    bookings: &'a [Booking],
    room: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Booking> {
    upcoming(bookings, now)
        .into_iter()
        .filter(|booking| booking.room == room)
        .collect()
}
