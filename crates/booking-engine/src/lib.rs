//! # booking-engine
//!
//! Conflict detection and week-grid layout for meeting-room bookings.
//!
//! The engine is the pure core of a room-booking calendar: it normalizes the
//! untrusted records a spreadsheet-backed store returns, decides whether a
//! proposed slot collides with an existing booking, and positions bookings
//! inside a 7-day grid at a one-unit-per-minute scale. All functions are
//! synchronous and perform no I/O; the surrounding host drives them from its
//! reload timer, clock tick, and form submissions.
//!
//! ## Modules
//!
//! - [`normalize`] — raw remote records → canonical [`Booking`]s
//! - [`conflict`] — half-open interval overlap checks and slot validation
//! - [`layout`] — week-grid block positioning and the current-time indicator
//! - [`status`] — upcoming/running/finished classification per clock tick
//! - [`grid`] — timezone, week-start, and visible-hours parameterization
//! - [`board`] — the authoritative snapshot and submission flows
//! - [`store`] — remote store wire shapes and the collaborator interface
//! - [`room`] — room label/key canonicalization
//! - [`error`] — error types

pub mod board;
pub mod conflict;
pub mod error;
pub mod grid;
pub mod layout;
pub mod normalize;
pub mod room;
pub mod status;
pub mod store;

pub use board::{AccessPolicy, BookingBoard, BookingDraft, Identity, RoleBased};
pub use conflict::{find_conflict, has_conflict, validate_slot, SlotCandidate};
pub use error::{BookingError, Result};
pub use grid::{GridConfig, TimeZoneSpec, WeekStartRule};
pub use layout::{layout_day, layout_week, time_indicator_offset, DayLayout, RenderBlock};
pub use normalize::{normalize_payload, normalize_record, parse_instant, Booking};
pub use status::{classify, status_at, BookingStatus};
pub use store::{AuthRequest, AuthResponse, BookingStore, MutationPayload, RecordingStore, UserInfo};
