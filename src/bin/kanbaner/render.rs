//! Plain-text rendering of the board for `kanbaner list`.

use std::io::{self, Write};

use chrono::{DateTime, TimeZone, Utc};
use kanbaner::board::domain::{Board, Stage};

const SECONDS_PER_DAY: i64 = 86_400;

/// Formats a creation timestamp relative to `now`, in `now`'s time zone.
///
/// Whole elapsed days decide the label: zero is `today`, one is
/// `yesterday`, anything else (including timestamps in the future) shows
/// the date.
#[must_use]
pub fn relative_date<Tz>(created: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let elapsed_days = now
        .with_timezone(&Utc)
        .signed_duration_since(created)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY);
    let local = created.with_timezone(&now.timezone());
    match elapsed_days {
        0 => format!("today {}", local.format("%H:%M")),
        1 => format!("yesterday {}", local.format("%H:%M")),
        _ => local.format("%-d %b %H:%M").to_string(),
    }
}

/// Writes every stage with its tasks, numbered by index.
pub fn render_board<Tz>(out: &mut impl Write, board: &Board, now: &DateTime<Tz>) -> io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    for stage in Stage::ALL {
        let tasks = board.tasks(stage);
        writeln!(out, "{stage} ({})", tasks.len())?;
        for (index, task) in tasks.iter().enumerate() {
            writeln!(
                out,
                "  [{index}] {}  ({})",
                task.title(),
                relative_date(task.created_at(), now)
            )?;
            if !task.description().is_empty() {
                writeln!(out, "      {}", task.description())?;
            }
        }
    }
    Ok(())
}
