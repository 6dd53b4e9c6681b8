//! Week-grid layout -- positions bookings inside a 7-day calendar grid.
//!
//! For each visible day, bookings intersecting that day are clipped to the
//! visible-hours window and mapped to a vertical offset and height at a fixed
//! one-unit-per-minute scale. That linear mapping is the contract the
//! renderer depends on: a block 90 minutes long is 90 units tall, wherever
//! the grid is drawn.
//!
//! Layout is recomputed in full on every call; there is no incremental
//! update. [`layout_week`] is lazy and restartable -- each day is computed
//! when the iterator reaches it, and calling again starts over.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::grid::GridConfig;
use crate::normalize::Booking;

/// One booking positioned inside a day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderBlock {
    pub booking_id: String,
    pub title: String,
    /// Booking's real start, before clipping. Time labels show this.
    pub start: DateTime<Utc>,
    /// Booking's real end, before clipping.
    pub end: DateTime<Utc>,
    /// Minutes from the day's visible start to the clipped block top.
    pub offset_minutes: i64,
    /// Clipped block height in minutes.
    pub duration_minutes: i64,
    /// Whether the booking's interval contains "now". Display-only styling;
    /// not a stored property of the booking.
    pub is_running: bool,
}

/// All positioned blocks for a single day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    /// Whether `date` is "today" in the grid's timezone.
    pub is_today: bool,
    pub blocks: Vec<RenderBlock>,
}

/// Lay out a 7-day week of bookings for one room.
///
/// The week runs from the week containing `anchor` per the configured
/// [`WeekStartRule`](crate::grid::WeekStartRule). Yields exactly 7
/// [`DayLayout`]s.
pub fn layout_week<'a>(
    anchor: NaiveDate,
    bookings: &'a [Booking],
    room: &'a str,
    config: &'a GridConfig,
    now: DateTime<Utc>,
) -> impl Iterator<Item = DayLayout> + 'a {
    config
        .week_days(anchor)
        .map(move |date| layout_day(date, bookings, room, config, now))
}

/// Lay out a single day column.
///
/// Selects same-room bookings whose interval intersects the day
/// (`[00:00, 23:59:59.999)` local), clips each to the visible-hours window,
/// and discards clips that come out empty -- a booking entirely outside the
/// window emits nothing.
pub fn layout_day(
    date: NaiveDate,
    bookings: &[Booking],
    room: &str,
    config: &GridConfig,
    now: DateTime<Utc>,
) -> DayLayout {
    let day_start = config.timezone.to_utc(date.and_time(NaiveTime::MIN));
    let next_midnight = config
        .timezone
        .to_utc((date + Days::new(1)).and_time(NaiveTime::MIN));
    let day_end = next_midnight - Duration::milliseconds(1);
    let visible_start = config.visible_start(date);
    let visible_end = config.visible_end(date);

    let mut blocks = Vec::new();
    for booking in bookings {
        if booking.room != room {
            continue;
        }
        let Some((start, end)) = booking.interval() else {
            continue;
        };
        if start >= day_end || end <= day_start {
            continue;
        }

        let clamped_start = start.max(visible_start);
        let clamped_end = end.min(visible_end);
        if clamped_end <= clamped_start {
            continue;
        }

        blocks.push(RenderBlock {
            booking_id: booking.id.clone(),
            title: booking.title.clone(),
            start,
            end,
            offset_minutes: (clamped_start - visible_start).num_minutes(),
            duration_minutes: (clamped_end - clamped_start).num_minutes(),
            is_running: start <= now && end > now,
        });
    }

    DayLayout {
        date,
        is_today: date == config.timezone.local_date(now),
        blocks,
    }
}

/// Vertical position of the current-time line, in minutes from the visible
/// start of today's column. `None` outside the visible window, which removes
/// the line entirely.
pub fn time_indicator_offset(now: DateTime<Utc>, config: &GridConfig) -> Option<i64> {
    let local = config.timezone.to_local(now);
    let (start_hour, end_hour) = config.visible_hours;
    let minutes = (local.hour() * 60 + local.minute()) as i64;
    let window = (start_hour as i64 * 60)..(end_hour as i64 * 60);
    window
        .contains(&minutes)
        .then(|| minutes - start_hour as i64 * 60)
}
