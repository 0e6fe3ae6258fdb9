use chrono::{DateTime, Utc};
use log::trace;
use rand::Rng;

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a unique identifier for a new record.
///
/// The id is the current time in milliseconds concatenated with a random
/// fragment, both encoded in base-36. No check against existing records is
/// performed; collisions across rapid successive calls are astronomically
/// unlikely.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis() as u64;
    let fragment: u64 = rand::rng().random();

    let id = format!("{}{}", to_base36(millis), to_base36(fragment));
    trace!("Generated id: {}", id);
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut encoded = Vec::new();
    while value > 0 {
        encoded.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    encoded.iter().rev().collect()
}

/// Formats a timestamp as a relative label against the current time.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    format_time_at(timestamp, Utc::now())
}

/// Formats a timestamp as a relative label against the given reference time.
///
/// Thresholds use floor division of the elapsed milliseconds; anything a
/// week old or older falls back to the calendar date.
pub fn format_time_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = now.timestamp_millis() - timestamp.timestamp_millis();

    let minutes = elapsed_ms / 60_000;
    let hours = elapsed_ms / 3_600_000;
    let days = elapsed_ms / 86_400_000;

    if minutes < 1 {
        // Also covers timestamps in the future
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
