//! Remote store contract -- wire shapes and the collaborator interface.
//!
//! The booking store is a spreadsheet-backed web endpoint: one GET returns
//! every record, one POST carries a create/update/delete mutation, and an
//! auth GET exchanges a name and access code for a user profile. Writes are
//! fire-and-forget -- the caller never reads the response, always assumes
//! success, and schedules a delayed reload instead.
//!
//! The engine itself performs no I/O. [`BookingStore`] isolates the
//! transport so tests inject [`RecordingStore`] and assert the exact payload
//! that would have gone over the wire.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BookingError, Result};

/// A mutation POSTed to the remote store. Internally tagged on `action`;
/// field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum MutationPayload {
    #[serde(rename = "create", rename_all = "camelCase")]
    Create {
        room: String,
        room_key: String,
        title: String,
        /// ISO-8601 UTC timestamp.
        start: String,
        end: String,
        booked_by: String,
        created_by: String,
        note: String,
        participants: String,
        send_email: bool,
    },
    #[serde(rename = "update", rename_all = "camelCase")]
    Update {
        id: String,
        room: String,
        room_key: String,
        title: String,
        start: String,
        end: String,
        booked_by: String,
        created_by: String,
        updated_by: String,
        note: String,
        participants: String,
        send_email: bool,
    },
    #[serde(rename = "delete", rename_all = "camelCase")]
    Delete {
        id: String,
        send_cancellation: bool,
        deleted_by: String,
    },
}

/// Query parameters of the `?action=auth` handshake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub name: String,
    pub access_code: String,
}

/// The authenticated profile returned on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub role: String,
    pub email: String,
}

/// Response body of the auth handshake. Anything but `status: "success"`
/// with a user attached is a failed login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

impl AuthResponse {
    /// The user profile, when the handshake succeeded.
    pub fn authenticated_user(self) -> Option<UserInfo> {
        if self.status == "success" {
            self.user
        } else {
            None
        }
    }
}

/// Collaborator interface over the remote store.
pub trait BookingStore {
    /// Fetch the full raw record set. The payload is untrusted JSON; it goes
    /// through normalization before anything touches it.
    fn fetch_all(&mut self) -> Result<Value>;

    /// Fire-and-forget write. No acknowledgment; success is assumed and the
    /// host schedules a delayed re-fetch.
    fn submit(&mut self, payload: &MutationPayload);
}

/// In-memory store double: serves a canned fetch payload and records every
/// submitted mutation verbatim.
#[derive(Debug, Default)]
pub struct RecordingStore {
    /// Payload returned by [`BookingStore::fetch_all`]. Defaults to `null`,
    /// which normalizes to zero bookings.
    pub records: Value,
    /// When set, `fetch_all` fails with this transport error instead.
    pub fail_fetch: Option<String>,
    /// Every payload submitted so far, oldest first.
    pub submitted: Vec<MutationPayload>,
}

impl RecordingStore {
    pub fn with_records(records: Value) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }
}

impl BookingStore for RecordingStore {
    fn fetch_all(&mut self) -> Result<Value> {
        match &self.fail_fetch {
            Some(message) => Err(BookingError::Transport(message.clone())),
            None => Ok(self.records.clone()),
        }
    }

    fn submit(&mut self, payload: &MutationPayload) {
        self.submitted.push(payload.clone());
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, the form the store
/// expects in mutation payloads (`2026-03-16T09:00:00.000Z`).
pub fn iso_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
