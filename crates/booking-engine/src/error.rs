//! Error types for booking-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// The candidate slot starts before "now" minus the grace margin.
    #[error("start time cannot be in the past")]
    StartInPast,

    /// The candidate slot ends at or before its own start.
    #[error("end time must be after start time")]
    EndNotAfterStart,

    /// The candidate slot overlaps an existing booking in the same room.
    /// Carries the clashing booking so callers can cite it.
    #[error("time slot conflicts with \"{title}\" ({start} - {end})")]
    SlotTaken {
        id: String,
        title: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A required draft field was empty after trimming.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The identity is not allowed to modify the targeted booking.
    #[error("you do not have permission to modify this booking")]
    NotPermitted,

    /// An edit or delete referenced an id absent from the current snapshot.
    #[error("unknown booking id: {0}")]
    UnknownBooking(String),

    /// The timezone name did not resolve to an IANA zone.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A remote fetch failed. Surfaced by store implementations; the board
    /// reacts by keeping its last-known snapshot.
    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;
