//! Letter-based date formatting (`Y-m-d H:i:s`, `c`, `r`, ...).
//!
//! Every ASCII letter with a meaning is replaced by the matching field of the
//! date; a backslash emits the next character verbatim; anything else is
//! copied as is.

use std::fmt::Write;

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeDelta, Timelike};
use chrono_tz::{OffsetComponents, Tz};

/// Render `dt` according to `format`.
pub fn format_date(dt: &DateTime<Tz>, format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        if !push_field(&mut out, dt, c) {
            out.push(c);
        }
    }

    out
}

/// Append the field for `letter`; returns `false` if it has no meaning.
fn push_field(out: &mut String, dt: &DateTime<Tz>, letter: char) -> bool {
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };

    let _ = match letter {
        // Day
        'd' => write!(out, "{:02}", dt.day()),
        'D' => write!(out, "{}", dt.format("%a")),
        'j' => write!(out, "{}", dt.day()),
        'l' => write!(out, "{}", dt.format("%A")),
        'N' => write!(out, "{}", dt.weekday().number_from_monday()),
        'S' => write!(out, "{}", ordinal_suffix(dt.day())),
        'w' => write!(out, "{}", dt.weekday().num_days_from_sunday()),
        'z' => write!(out, "{}", dt.ordinal0()),
        // Week
        'W' => write!(out, "{:02}", dt.iso_week().week()),
        // Month
        'F' => write!(out, "{}", dt.format("%B")),
        'm' => write!(out, "{:02}", dt.month()),
        'M' => write!(out, "{}", dt.format("%b")),
        'n' => write!(out, "{}", dt.month()),
        't' => write!(out, "{}", days_in_month(dt.year(), dt.month())),
        // Year
        'L' => write!(out, "{}", u8::from(is_leap_year(dt.year()))),
        'o' => write!(out, "{}", dt.iso_week().year()),
        'Y' => write!(out, "{}", dt.year()),
        'y' => write!(out, "{:02}", dt.year().rem_euclid(100)),
        // Time
        'a' => out.write_str(if dt.hour() < 12 { "am" } else { "pm" }),
        'A' => out.write_str(if dt.hour() < 12 { "AM" } else { "PM" }),
        'g' => write!(out, "{}", hour12),
        'G' => write!(out, "{}", dt.hour()),
        'h' => write!(out, "{:02}", hour12),
        'H' => write!(out, "{:02}", dt.hour()),
        'i' => write!(out, "{:02}", dt.minute()),
        's' => write!(out, "{:02}", dt.second()),
        'u' => write!(out, "{:06}", dt.nanosecond() / 1_000 % 1_000_000),
        'v' => write!(out, "{:03}", dt.nanosecond() / 1_000_000 % 1_000),
        // Timezone
        'e' => out.write_str(dt.timezone().name()),
        'I' => write!(out, "{}", u8::from(dt.offset().dst_offset() != TimeDelta::zero())),
        'O' => write!(out, "{}", dt.format("%z")),
        'P' => write!(out, "{}", dt.format("%:z")),
        'p' => {
            if dt.offset().fix().local_minus_utc() == 0 {
                out.write_str("Z")
            } else {
                write!(out, "{}", dt.format("%:z"))
            }
        }
        'T' => write!(out, "{}", dt.format("%Z")),
        'Z' => write!(out, "{}", dt.offset().fix().local_minus_utc()),
        // Full date/time
        'c' => write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S%:z")),
        'r' => write!(out, "{}", dt.format("%a, %d %b %Y %H:%M:%S %z")),
        'U' => write!(out, "{}", dt.timestamp()),
        _ => return false,
    };

    true
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}
