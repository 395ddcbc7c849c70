//! Human-readable sizes and relative dates for listings.

use chrono::{DateTime, Utc};

const UNIT: i64 = 1024;
const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Format a byte count with binary prefixes, e.g. `1.5 MiB`.
///
/// ```
/// use core_service::format::readable_size;
///
/// assert_eq!(readable_size(512), "512 B");
/// assert_eq!(readable_size(1536), "1.5 KiB");
/// ```
pub fn readable_size(size: i64) -> String {
    if size < UNIT {
        return format!("{} B", size);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}iB", size as f64 / div as f64, PREFIXES[exp])
}

/// Describe how long ago `then` was relative to `now`.
///
/// Anything under a minute, including timestamps in the future, is
/// `recently`. Counts are rounded to the nearest whole unit.
pub fn readable_date(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_seconds() as f64 / 60.0;
    let hours = minutes / 60.0;

    if hours < 1.0 {
        if minutes < 1.0 {
            "recently".to_string()
        } else {
            format!("{} minute(s) ago", minutes.round() as i64)
        }
    } else if hours < 24.0 {
        format!("{} hour(s) ago", hours.round() as i64)
    } else {
        format!("{} day(s) ago", (hours / 24.0).round() as i64)
    }
}
