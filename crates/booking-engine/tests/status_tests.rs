//! Tests for status classification and summary-view ordering.

use booking_engine::normalize::{normalize_record, Booking};
use booking_engine::status::{classify, status_at, upcoming, upcoming_in_room, BookingStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

fn booking(id: &str, room: &str, start: &str, end: &str) -> Booking {
    normalize_record(&json!({
        "id": id,
        "room": room,
        "title": id,
        "start": start,
        "end": end,
    }))
}

#[test]
fn status_transitions_at_the_interval_boundaries() {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    let end = start + Duration::hours(1);
    let second = Duration::seconds(1);

    assert_eq!(classify(start, end, start - second), BookingStatus::Upcoming);
    assert_eq!(classify(start, end, start), BookingStatus::Running);
    assert_eq!(classify(start, end, end - second), BookingStatus::Running);
    assert_eq!(classify(start, end, end), BookingStatus::Finished);
}

#[test]
fn status_labels_match_the_badges() {
    assert_eq!(BookingStatus::Upcoming.to_string(), "Upcoming");
    assert_eq!(BookingStatus::Running.to_string(), "Running");
    assert_eq!(BookingStatus::Finished.to_string(), "Finished");
}

#[test]
fn unparseable_interval_reads_as_upcoming() {
    let stale = booking("x", "Room A", "???", "???");
    let now: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    assert_eq!(status_at(&stale, now), BookingStatus::Upcoming);
}

#[test]
fn upcoming_filters_finished_and_sorts_by_start() {
    let bookings = vec![
        booking("late", "Room A", "2026-03-16T15:00:00Z", "2026-03-16T16:00:00Z"),
        booking("done", "Room A", "2026-03-16T07:00:00Z", "2026-03-16T08:00:00Z"),
        booking("soon", "Room B", "2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z"),
        booking("running", "Room A", "2026-03-16T08:30:00Z", "2026-03-16T09:30:00Z"),
    ];
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();

    let ids: Vec<&str> = upcoming(&bookings, now)
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    // A running booking has not ended, so it still shows; "done" does not.
    assert_eq!(ids, ["running", "soon", "late"]);
}

#[test]
fn upcoming_in_room_also_filters_by_room() {
    let bookings = vec![
        booking("a", "Room A", "2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z"),
        booking("b", "Room B", "2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z"),
    ];
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();

    let ids: Vec<&str> = upcoming_in_room(&bookings, "Room B", now)
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(ids, ["b"]);
}
