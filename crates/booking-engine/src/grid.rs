//! Calendar grid parameters -- timezone, week-start convention, visible hours.
//!
//! The deployed variants disagreed on all three: fixed IST vs. viewer-local
//! time, calendar-Sunday weeks vs. a week anchored one day before a floating
//! reference date, and the displayed hour range. Rather than baking any of
//! those in, the layout engine takes an explicit [`GridConfig`] and the
//! caller picks a policy per surface.

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

use crate::error::{BookingError, Result};

/// Which wall clock the grid is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneSpec {
    /// Interpret grid coordinates as UTC.
    #[default]
    Utc,
    /// A fixed IANA zone, e.g. `Asia/Kolkata` for the IST deployment.
    Named(Tz),
}

impl TimeZoneSpec {
    /// Resolve a zone name. `"UTC"` and the empty string mean [`TimeZoneSpec::Utc`].
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("utc") {
            return Ok(Self::Utc);
        }
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| BookingError::InvalidTimezone(name.to_string()))
    }

    /// Wall-clock datetime of `instant` in this zone.
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Utc => instant.naive_utc(),
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Calendar date of `instant` in this zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date()
    }

    /// Instant corresponding to a wall-clock datetime in this zone.
    ///
    /// DST ambiguity resolves to the earlier offset; a wall-clock value
    /// inside a spring-forward gap shifts forward an hour at a time until it
    /// exists.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Self::Utc => Utc.from_utc_datetime(&local),
            Self::Named(tz) => {
                let mut probe = local;
                loop {
                    match tz.from_local_datetime(&probe) {
                        LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                        LocalResult::Ambiguous(earlier, _) => return earlier.with_timezone(&Utc),
                        LocalResult::None => probe += Duration::hours(1),
                    }
                }
            }
        }
    }
}

/// How a 7-day week is derived from an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStartRule {
    /// Snap to the most recent calendar Sunday on or before the anchor.
    #[default]
    Sunday,
    /// Start the week a fixed number of days before the anchor itself --
    /// the "day -1 through day 5" convention keeps yesterday visible while
    /// the anchor advances one day per navigation step.
    Anchored { lead_days: u32 },
}

impl WeekStartRule {
    /// First day of the week containing (or anchored at) `anchor`.
    pub fn week_start(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Self::Sunday => {
                let back = anchor.weekday().num_days_from_sunday() as u64;
                anchor - Days::new(back)
            }
            Self::Anchored { lead_days } => anchor - Days::new(*lead_days as u64),
        }
    }
}

/// Grid parameters shared by layout, the current-time indicator, and
/// slot-selection helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub timezone: TimeZoneSpec,
    pub week_start: WeekStartRule,
    /// Visible hour window `[start_hour, end_hour)`, e.g. `(8, 20)` for an
    /// 8 AM - 8 PM grid. `end_hour` may be 24.
    pub visible_hours: (u32, u32),
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            timezone: TimeZoneSpec::Utc,
            week_start: WeekStartRule::Sunday,
            visible_hours: (8, 20),
        }
    }
}

impl GridConfig {
    /// Start of the visible window on `date`, as an instant.
    pub fn visible_start(&self, date: NaiveDate) -> DateTime<Utc> {
        self.timezone.to_utc(at_hour(date, self.visible_hours.0))
    }

    /// End of the visible window on `date`, as an instant.
    pub fn visible_end(&self, date: NaiveDate) -> DateTime<Utc> {
        self.timezone.to_utc(at_hour(date, self.visible_hours.1))
    }

    /// 7 consecutive days starting from the week containing `anchor`.
    pub fn week_days(&self, anchor: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let start = self.week_start.week_start(anchor);
        (0..7u64).map(move |offset| start + Days::new(offset))
    }

    /// Inclusive first/last dates shown for the week at `anchor`, for the
    /// "Mar 15 - Mar 21, 2026" range label above the grid.
    pub fn week_range(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.week_start.week_start(anchor);
        (start, start + Days::new(6))
    }
}

/// Whether a clicked grid cell (a date plus an hour) is already in the past.
/// A cell in the current hour is still bookable.
pub fn slot_in_past(date: NaiveDate, hour: u32, now: DateTime<Utc>, tz: TimeZoneSpec) -> bool {
    let local_now = tz.to_local(now);
    let today = local_now.date();
    if date < today {
        return true;
    }
    date == today && hour < local_now.hour()
}

/// Suggested `[start, end)` slot for a clicked grid cell: one hour starting
/// at the cell, except that clicking the current hour starts at the current
/// minute instead of the top of the hour.
pub fn suggested_slot(
    date: NaiveDate,
    hour: u32,
    now: DateTime<Utc>,
    tz: TimeZoneSpec,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_now = tz.to_local(now);
    let minute = if date == local_now.date() && hour == local_now.hour() {
        local_now.minute()
    } else {
        0
    };
    let local_start = date.and_time(
        NaiveTime::from_hms_opt(hour.min(23), minute, 0).unwrap_or(NaiveTime::MIN),
    );
    let start = tz.to_utc(local_start);
    (start, start + Duration::hours(1))
}

/// 12-hour label for an hour-of-day: `8` -> "8 AM", `12` -> "12 PM".
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        h if h < 12 => format!("{} AM", h),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

/// Wall-clock datetime at `hour:00` on `date`; hour 24 rolls into the next day.
fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    if hour >= 24 {
        (date + Days::new(1)).and_time(NaiveTime::MIN)
    } else {
        date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}
