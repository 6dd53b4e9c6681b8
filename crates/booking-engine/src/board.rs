//! The booking board -- owner of the authoritative in-memory snapshot.
//!
//! The board holds the one booking set everything else reads. Reloads
//! replace the set wholesale (never merge); user actions validate against
//! the current snapshot and produce a mutation payload for the store, with
//! no optimistic local insert -- the snapshot only changes when the next
//! reload lands. Whichever reload resolves last wins; there is no
//! generation tracking and no cancellation.
//!
//! On a failed reload the board keeps its last-known snapshot rather than
//! clearing it, so a transient network error degrades to a stale list
//! instead of an empty one.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::warn;

use crate::conflict::{validate_slot, SlotCandidate};
use crate::error::{BookingError, Result};
use crate::normalize::{normalize_payload, Booking};
use crate::room;
use crate::store::{iso_utc, MutationPayload, UserInfo};

/// Who is acting. Obtained from the auth handshake; the engine never stores
/// or verifies credentials itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub name: String,
    pub role: String,
    pub email: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl From<UserInfo> for Identity {
    fn from(user: UserInfo) -> Self {
        Self {
            name: user.name,
            role: user.role,
            email: user.email,
        }
    }
}

/// External capability check consulted before edits and deletes. The board
/// consults this; it never implements authorization itself.
pub trait AccessPolicy {
    fn can_edit(&self, booking: &Booking, identity: &Identity) -> bool;
}

/// Default policy: admins may edit anything, everyone else only their own
/// bookings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleBased;

impl AccessPolicy for RoleBased {
    fn can_edit(&self, booking: &Booking, identity: &Identity) -> bool {
        identity.is_admin() || booking.booked_by == identity.name
    }
}

/// An in-progress create or edit, as collected from the booking form.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    /// Target room, as a label ("Room A") or bare key ("A").
    pub room: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub note: String,
    pub participants: String,
    pub send_email: bool,
    /// Set when editing an existing booking; excludes it from the conflict
    /// scan and turns the mutation into an update.
    pub edit_id: Option<String>,
}

/// The authoritative booking snapshot plus submission validation.
#[derive(Debug, Clone)]
pub struct BookingBoard {
    bookings: Vec<Booking>,
    grace: Duration,
}

impl Default for BookingBoard {
    /// Five-minute grace margin, the richer deployment's setting.
    fn default() -> Self {
        Self::new(Duration::minutes(5))
    }
}

impl BookingBoard {
    /// An empty board with the given grace margin for past-start validation.
    pub fn new(grace: Duration) -> Self {
        Self {
            bookings: Vec::new(),
            grace,
        }
    }

    /// The current snapshot.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn find(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == id)
    }

    /// Replace the snapshot with a freshly fetched payload.
    ///
    /// A transport failure keeps the last-known set in place; the stale list
    /// keeps rendering until a reload succeeds.
    pub fn apply_reload(&mut self, fetched: Result<Value>) {
        match fetched {
            Ok(payload) => self.bookings = normalize_payload(&payload),
            Err(error) => {
                warn!(%error, "booking reload failed; keeping last snapshot");
            }
        }
    }

    /// Validate a draft against the current snapshot and build the
    /// create/update payload for the store.
    ///
    /// Checks, in order: required fields; edit permission (when `edit_id` is
    /// set); `end > start`; past-start with the grace margin; the conflict
    /// scan excluding the booking under edit. First failure wins; the form
    /// state stays with the caller for correction.
    pub fn submit(
        &self,
        draft: &BookingDraft,
        identity: &Identity,
        policy: &dyn AccessPolicy,
        now: DateTime<Utc>,
    ) -> Result<MutationPayload> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(BookingError::MissingField("title"));
        }
        if draft.room.trim().is_empty() {
            return Err(BookingError::MissingField("room"));
        }
        if identity.name.trim().is_empty() {
            return Err(BookingError::MissingField("bookedBy"));
        }

        let (room, room_key) = room::canonicalize(&draft.room);

        if let Some(edit_id) = &draft.edit_id {
            let existing = self
                .find(edit_id)
                .ok_or_else(|| BookingError::UnknownBooking(edit_id.clone()))?;
            if !policy.can_edit(existing, identity) {
                return Err(BookingError::NotPermitted);
            }
        }

        let mut candidate = SlotCandidate::new(room.clone(), draft.start, draft.end);
        if let Some(edit_id) = &draft.edit_id {
            candidate = candidate.excluding(edit_id.clone());
        }
        validate_slot(&candidate, &self.bookings, now, self.grace)?;

        let payload = match &draft.edit_id {
            Some(edit_id) => MutationPayload::Update {
                id: edit_id.clone(),
                room,
                room_key,
                title: title.to_string(),
                start: iso_utc(draft.start),
                end: iso_utc(draft.end),
                booked_by: identity.name.clone(),
                created_by: identity.name.clone(),
                updated_by: identity.name.clone(),
                note: draft.note.clone(),
                participants: draft.participants.clone(),
                send_email: draft.send_email,
            },
            None => MutationPayload::Create {
                room,
                room_key,
                title: title.to_string(),
                start: iso_utc(draft.start),
                end: iso_utc(draft.end),
                booked_by: identity.name.clone(),
                created_by: identity.name.clone(),
                note: draft.note.clone(),
                participants: draft.participants.clone(),
                send_email: draft.send_email,
            },
        };
        Ok(payload)
    }

    /// Build the delete payload for a booking, after the capability check.
    /// `send_cancellation` asks the store to mail participants.
    pub fn delete(
        &self,
        id: &str,
        identity: &Identity,
        policy: &dyn AccessPolicy,
        send_cancellation: bool,
    ) -> Result<MutationPayload> {
        let booking = self
            .find(id)
            .ok_or_else(|| BookingError::UnknownBooking(id.to_string()))?;
        if !policy.can_edit(booking, identity) {
            return Err(BookingError::NotPermitted);
        }
        Ok(MutationPayload::Delete {
            id: id.to_string(),
            send_cancellation,
            deleted_by: identity.name.clone(),
        })
    }
}
