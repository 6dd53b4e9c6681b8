//! Booking normalization -- converts raw remote records into canonical bookings.
//!
//! Records arrive from the remote store as arbitrary JSON; every field may be
//! missing, empty, or the wrong type. Normalization is total: it never fails,
//! it applies the documented default for anything absent or malformed, and it
//! derives a stable id when the record carries none. Timestamps are kept
//! verbatim alongside their parsed form so unparseable values degrade to
//! "renders as-is, never conflicts" instead of an error.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::room;

/// Candidate keys scanned, in priority order, when deriving a booking id.
/// The first present, non-empty, stringifiable value wins.
const ID_CANDIDATE_KEYS: &[&str] = &[
    "id",
    "bookingId",
    "recordId",
    "uid",
    "key",
    "timestamp",
    "createdAt",
];

/// Default title for records with an empty or missing title.
pub const DEFAULT_TITLE: &str = "Untitled Meeting";

/// Default owner for records with an empty or missing bookedBy.
pub const DEFAULT_BOOKED_BY: &str = "Unknown";

/// A canonical booking. Immutable once constructed; the in-memory set is
/// wholly replaced on every reload, never merged or mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Stable identifier, unique among currently loaded bookings.
    pub id: String,
    /// Canonical room label, e.g. "Room A".
    pub room: String,
    /// Short room code, e.g. "A". Mutually derivable with `room`.
    pub room_key: String,
    pub title: String,
    /// Raw start timestamp as received, kept for display and resubmission.
    pub start_raw: String,
    /// Raw end timestamp as received.
    pub end_raw: String,
    /// Parsed start instant; `None` when `start_raw` does not parse.
    pub start: Option<DateTime<Utc>>,
    /// Parsed end instant; `None` when `end_raw` does not parse.
    pub end: Option<DateTime<Utc>>,
    pub booked_by: String,
    pub note: String,
    pub participants: String,
    pub email_sent: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Booking {
    /// The half-open `[start, end)` interval, when both endpoints parsed.
    /// Bookings without a valid interval never conflict and never lay out.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Long-form room name for detail views.
    pub fn room_display_name(&self) -> String {
        room::display_name(&self.room_key, &self.room)
    }
}

/// Normalize one raw record into a canonical [`Booking`]. Total: never fails.
///
/// String fields are trimmed; empty-after-trim counts as absent and is
/// replaced by the documented default. Numbers and booleans stringify where a
/// string is expected (spreadsheet backends are loose about cell types).
pub fn normalize_record(raw: &Value) -> Booking {
    let (room, room_key) = room::canonical_pair(
        text(raw, "room").as_deref(),
        text(raw, "roomKey").as_deref(),
    );

    let start_raw = text(raw, "start").unwrap_or_default();
    let end_raw = text(raw, "end").unwrap_or_default();

    Booking {
        id: derive_id(raw),
        room,
        room_key,
        title: text(raw, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        start: parse_instant(&start_raw),
        end: parse_instant(&end_raw),
        start_raw,
        end_raw,
        booked_by: text(raw, "bookedBy").unwrap_or_else(|| DEFAULT_BOOKED_BY.to_string()),
        note: text(raw, "note").unwrap_or_default(),
        participants: text(raw, "participants").unwrap_or_default(),
        email_sent: flag(raw, "emailSent"),
        created_by: text(raw, "createdBy").unwrap_or_default(),
        updated_by: text(raw, "updatedBy").unwrap_or_default(),
        created_at: text(raw, "createdAt").unwrap_or_default(),
        updated_at: text(raw, "updatedAt").unwrap_or_default(),
    }
}

/// Normalize a whole fetch payload. A non-array top level (error page, null,
/// object) is treated as zero bookings -- malformed input is never an error.
pub fn normalize_payload(payload: &Value) -> Vec<Booking> {
    match payload.as_array() {
        Some(records) => records.iter().map(normalize_record).collect(),
        None => Vec::new(),
    }
}

/// Parse a timestamp the remote store might hand us.
///
/// Accepts RFC 3339 (with offset or `Z`) and the bare local forms the
/// spreadsheet emits (`2026-03-16T09:00:00`, with or without seconds or
/// fractional seconds, `T` or space separator). Bare values are taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Fetch `key` as a trimmed, non-empty string. Numbers and booleans are
/// stringified; everything else counts as absent.
fn text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Fetch `key` as a boolean. Accepts real booleans and the "TRUE"/"true"
/// strings spreadsheet exports produce.
fn flag(raw: &Value, key: &str) -> bool {
    match raw.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Derive the stable id for a record.
///
/// Scan the candidate keys in priority order; fall back to a composite of the
/// identifying raw fields (lower-cased, pipe-joined); synthesize a
/// `{millis}-{random}` id only when the record is entirely anonymous.
fn derive_id(raw: &Value) -> String {
    for key in ID_CANDIDATE_KEYS {
        if let Some(value) = text(raw, key) {
            return value;
        }
    }

    let parts: Vec<String> = ["room", "start", "end", "title", "bookedBy"]
        .iter()
        .map(|key| text(raw, key).unwrap_or_default().to_lowercase())
        .collect();
    if parts.iter().any(|part| !part.is_empty()) {
        return parts.join("|");
    }

    synthesize_id()
}

/// `{currentTimeMillis}-{randomSuffix}`. Two anonymous records normalized in
/// the same millisecond still get distinct ids via the random suffix.
fn synthesize_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", millis, &suffix[..8])
}
