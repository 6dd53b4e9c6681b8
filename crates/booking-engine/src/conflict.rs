//! Conflict detection for candidate booking slots.
//!
//! Two bookings conflict when their half-open `[start, end)` intervals
//! overlap in the same room. Back-to-back bookings (one ends exactly when the
//! other starts) are NOT conflicts. Policy is reject-only: a conflicting
//! candidate is surfaced as a validation failure, never auto-resolved or
//! overridden.

use chrono::{DateTime, Duration, Utc};

use crate::error::{BookingError, Result};
use crate::normalize::Booking;

/// A proposed `[start, end)` slot in a room, checked against the current
/// booking snapshot before a create or update is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCandidate {
    /// Canonical room label the slot targets.
    pub room: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Booking id to skip during the scan; set when re-validating an edit so
    /// the booking being moved does not collide with itself.
    pub exclude_id: Option<String>,
}

impl SlotCandidate {
    pub fn new(room: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            room: room.into(),
            start,
            end,
            exclude_id: None,
        }
    }

    pub fn excluding(mut self, id: impl Into<String>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }
}

/// Find the first existing booking the candidate overlaps.
///
/// The overlap test is the standard half-open comparison:
/// `candidate.start < b.end && candidate.end > b.start`. Bookings in other
/// rooms, the excluded id, and bookings without a parseable interval are
/// skipped.
pub fn find_conflict<'a>(candidate: &SlotCandidate, existing: &'a [Booking]) -> Option<&'a Booking> {
    existing.iter().find(|booking| {
        if booking.room != candidate.room {
            return false;
        }
        if let Some(exclude_id) = &candidate.exclude_id {
            if booking.id == *exclude_id {
                return false;
            }
        }
        match booking.interval() {
            Some((start, end)) => candidate.start < end && candidate.end > start,
            None => false,
        }
    })
}

/// Whether the candidate overlaps any existing booking in its room.
pub fn has_conflict(candidate: &SlotCandidate, existing: &[Booking]) -> bool {
    find_conflict(candidate, existing).is_some()
}

/// Validate a candidate slot: temporal rules first, then the conflict scan.
///
/// Checks in order:
/// 1. `end > start` -- rejected as [`BookingError::EndNotAfterStart`];
/// 2. `start >= now - grace` -- rejected as [`BookingError::StartInPast`];
/// 3. the conflict scan -- rejected as [`BookingError::SlotTaken`], citing
///    the clashing booking.
///
/// The conflict scan is skipped when a temporal rule already failed.
pub fn validate_slot(
    candidate: &SlotCandidate,
    existing: &[Booking],
    now: DateTime<Utc>,
    grace: Duration,
) -> Result<()> {
    if candidate.end <= candidate.start {
        return Err(BookingError::EndNotAfterStart);
    }
    if candidate.start < now - grace {
        return Err(BookingError::StartInPast);
    }
    if let Some(clash) = find_conflict(candidate, existing) {
        let (start, end) = clash.interval().unwrap_or((candidate.start, candidate.end));
        return Err(BookingError::SlotTaken {
            id: clash.id.clone(),
            title: clash.title.clone(),
            start,
            end,
        });
    }
    Ok(())
}
