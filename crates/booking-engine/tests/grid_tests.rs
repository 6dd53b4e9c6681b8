//! Tests for grid parameters: timezone resolution, week-start rules, hour
//! labels, and grid-click slot helpers.

use booking_engine::grid::{hour_label, slot_in_past, suggested_slot};
use booking_engine::{BookingError, GridConfig, TimeZoneSpec, WeekStartRule};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, minute, 0).unwrap()
}

// ── Timezone resolution ─────────────────────────────────────────────────────

#[test]
fn utc_aliases_resolve_without_chrono_tz() {
    assert_eq!(TimeZoneSpec::parse("UTC"), Ok(TimeZoneSpec::Utc));
    assert_eq!(TimeZoneSpec::parse("utc"), Ok(TimeZoneSpec::Utc));
    assert_eq!(TimeZoneSpec::parse(""), Ok(TimeZoneSpec::Utc));
}

#[test]
fn iana_names_resolve_and_junk_is_rejected() {
    assert!(matches!(
        TimeZoneSpec::parse("Asia/Kolkata"),
        Ok(TimeZoneSpec::Named(_))
    ));
    assert_eq!(
        TimeZoneSpec::parse("Mars/Olympus_Mons"),
        Err(BookingError::InvalidTimezone("Mars/Olympus_Mons".to_string()))
    );
}

#[test]
fn named_zone_round_trips_wall_clock_time() {
    let tz = TimeZoneSpec::parse("Asia/Kolkata").expect("IANA zone");
    let instant = at(3, 0); // 08:30 IST

    let local = tz.to_local(instant);
    assert_eq!(local.to_string(), "2026-03-16 08:30:00");
    assert_eq!(tz.to_utc(local), instant);
}

// ── Week-start rules ────────────────────────────────────────────────────────

#[test]
fn sunday_rule_snaps_to_the_preceding_sunday() {
    let rule = WeekStartRule::Sunday;
    assert_eq!(rule.week_start(date(2026, 3, 18)), date(2026, 3, 15));
    assert_eq!(
        rule.week_start(date(2026, 3, 15)),
        date(2026, 3, 15),
        "a Sunday anchor is already the week start"
    );
}

#[test]
fn anchored_rule_backs_up_by_lead_days() {
    let rule = WeekStartRule::Anchored { lead_days: 1 };
    assert_eq!(rule.week_start(date(2026, 3, 18)), date(2026, 3, 17));

    let rule = WeekStartRule::Anchored { lead_days: 0 };
    assert_eq!(rule.week_start(date(2026, 3, 18)), date(2026, 3, 18));
}

#[test]
fn week_range_spans_seven_days_inclusive() {
    let config = GridConfig::default();
    let (first, last) = config.week_range(date(2026, 3, 18));
    assert_eq!(first, date(2026, 3, 15));
    assert_eq!(last, date(2026, 3, 21));
}

// ── Hour labels ─────────────────────────────────────────────────────────────

#[test]
fn hour_labels_use_twelve_hour_clock() {
    assert_eq!(hour_label(0), "12 AM");
    assert_eq!(hour_label(8), "8 AM");
    assert_eq!(hour_label(12), "12 PM");
    assert_eq!(hour_label(19), "7 PM");
}

// ── Grid-click slot helpers ─────────────────────────────────────────────────

#[test]
fn past_dates_and_hours_are_flagged() {
    let now = at(10, 30);

    assert!(slot_in_past(date(2026, 3, 15), 9, now, TimeZoneSpec::Utc));
    assert!(slot_in_past(date(2026, 3, 16), 9, now, TimeZoneSpec::Utc));
    assert!(
        !slot_in_past(date(2026, 3, 16), 10, now, TimeZoneSpec::Utc),
        "the current hour is still bookable"
    );
    assert!(!slot_in_past(date(2026, 3, 17), 9, now, TimeZoneSpec::Utc));
}

#[test]
fn suggested_slot_is_one_hour_at_the_clicked_cell() {
    let now = at(10, 30);
    let (start, end) = suggested_slot(date(2026, 3, 17), 14, now, TimeZoneSpec::Utc);

    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 17, 14, 0, 0).unwrap());
    assert_eq!(end - start, Duration::hours(1));
}

#[test]
fn clicking_the_current_hour_starts_at_the_current_minute() {
    let now = at(10, 30);
    let (start, _) = suggested_slot(date(2026, 3, 16), 10, now, TimeZoneSpec::Utc);
    assert_eq!(start, at(10, 30));
}
