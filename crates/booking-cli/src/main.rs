//! `bookings` CLI — validate slots, print week grids, and list upcoming
//! bookings from a raw records dump.
//!
//! ## Usage
//!
//! ```sh
//! # Check a candidate slot against a records file
//! bookings check -i records.json --room "Room A" \
//!     --start 2026-03-16T10:00:00Z --end 2026-03-16T11:00:00Z
//!
//! # Same, reading the records from stdin
//! curl -s "$ENDPOINT" | bookings check --room A --start ... --end ...
//!
//! # Print the week grid around a date, in IST
//! bookings week -i records.json --room "Room A" \
//!     --date 2026-03-16 --timezone Asia/Kolkata
//!
//! # Upcoming bookings across all rooms
//! bookings agenda -i records.json
//! ```

use anyhow::{bail, Context, Result};
use booking_engine::normalize::{normalize_payload, parse_instant, Booking};
use booking_engine::{
    layout_week, status_at, validate_slot, GridConfig, SlotCandidate, TimeZoneSpec, WeekStartRule,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "bookings", version, about = "Meeting-room booking toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a candidate slot against the current bookings
    Check {
        /// Records file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target room, as a label ("Room A") or bare key ("A")
        #[arg(long)]
        room: String,
        /// Slot start (ISO-8601)
        #[arg(long)]
        start: String,
        /// Slot end (ISO-8601)
        #[arg(long)]
        end: String,
        /// Booking id to exclude, when re-validating an edit
        #[arg(long)]
        exclude: Option<String>,
        /// Minutes of grace for starts slightly in the past
        #[arg(long, default_value_t = 5)]
        grace_minutes: i64,
        /// Reference instant instead of the wall clock (for scripting)
        #[arg(long)]
        now: Option<String>,
    },
    /// Print the week grid for a room
    Week {
        /// Records file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Room to lay out
        #[arg(long)]
        room: String,
        /// Anchor date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// IANA timezone the grid is drawn in
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// Start the week this many days before the anchor instead of
        /// snapping to the preceding Sunday
        #[arg(long)]
        lead_days: Option<u32>,
        /// Reference instant instead of the wall clock (for scripting)
        #[arg(long)]
        now: Option<String>,
    },
    /// List upcoming bookings, soonest first
    Agenda {
        /// Records file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Restrict to one room
        #[arg(long)]
        room: Option<String>,
        /// Reference instant instead of the wall clock (for scripting)
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            room,
            start,
            end,
            exclude,
            grace_minutes,
            now,
        } => {
            let bookings = load_bookings(input.as_deref())?;
            let start = parse_timestamp(&start)?;
            let end = parse_timestamp(&end)?;
            let now = resolve_now(now.as_deref())?;

            let (room, _) = booking_engine::room::canonicalize(&room);
            let mut candidate = SlotCandidate::new(room.clone(), start, end);
            if let Some(id) = exclude {
                candidate = candidate.excluding(id);
            }

            validate_slot(&candidate, &bookings, now, Duration::minutes(grace_minutes))?;
            println!(
                "OK: {} is free from {} to {}",
                room,
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M"),
            );
        }
        Commands::Week {
            input,
            room,
            date,
            timezone,
            lead_days,
            now,
        } => {
            let bookings = load_bookings(input.as_deref())?;
            let now = resolve_now(now.as_deref())?;
            let config = GridConfig {
                timezone: TimeZoneSpec::parse(&timezone)?,
                week_start: match lead_days {
                    Some(lead_days) => WeekStartRule::Anchored { lead_days },
                    None => WeekStartRule::Sunday,
                },
                ..GridConfig::default()
            };
            let anchor = match date {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("Unrecognized date: {}", date))?,
                None => config.timezone.local_date(now),
            };

            let (room, _) = booking_engine::room::canonicalize(&room);
            let (first, last) = config.week_range(anchor);
            println!(
                "Week of {} - {} · {}",
                first.format("%b %-d"),
                last.format("%b %-d, %Y"),
                room,
            );

            for day in layout_week(anchor, &bookings, &room, &config, now) {
                let marker = if day.is_today { "  <- today" } else { "" };
                println!("{}{}", day.date.format("%a %Y-%m-%d"), marker);
                if day.blocks.is_empty() {
                    println!("  (no bookings)");
                    continue;
                }
                for block in &day.blocks {
                    let running = if block.is_running { "  (running)" } else { "" };
                    println!(
                        "  {}-{}  [offset {:>4}, height {:>4}]  {}{}",
                        config.timezone.to_local(block.start).format("%H:%M"),
                        config.timezone.to_local(block.end).format("%H:%M"),
                        block.offset_minutes,
                        block.duration_minutes,
                        block.title,
                        running,
                    );
                }
            }
        }
        Commands::Agenda { input, room, now } => {
            let bookings = load_bookings(input.as_deref())?;
            let now = resolve_now(now.as_deref())?;

            let room = room
                .as_deref()
                .map(|value| booking_engine::room::canonicalize(value).0);
            let upcoming = match &room {
                Some(room) => booking_engine::status::upcoming_in_room(&bookings, room, now),
                None => booking_engine::status::upcoming(&bookings, now),
            };

            if upcoming.is_empty() {
                println!("No upcoming bookings");
                return Ok(());
            }
            for booking in upcoming {
                print_agenda_line(booking, now);
            }
        }
    }

    Ok(())
}

fn print_agenda_line(booking: &Booking, now: DateTime<Utc>) {
    let times = match booking.interval() {
        Some((start, end)) => format!(
            "{} - {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%H:%M")
        ),
        None => format!("{} - {}", booking.start_raw, booking.end_raw),
    };
    println!(
        "{}  {}  {} [{}] (booked by {})",
        times,
        booking.room,
        booking.title,
        status_at(booking, now),
        booking.booked_by,
    );
}

/// Read and normalize the records payload from a file or stdin.
fn load_bookings(path: Option<&str>) -> Result<Vec<Booking>> {
    let raw = read_input(path)?;
    let payload: serde_json::Value =
        serde_json::from_str(&raw).context("Records input is not valid JSON")?;
    Ok(normalize_payload(&payload))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    match parse_instant(raw) {
        Some(instant) => Ok(instant),
        None => bail!("Unrecognized timestamp: {}", raw),
    }
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_timestamp(raw),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
