//! UTC timestamps in the browser's `toISOString()` form.
//!
//! History keeps times as milliseconds since the Unix epoch and stores them as
//! `YYYY-MM-DDTHH:MM:SS.mmmZ`. Stored histories may carry either that string or
//! a bare millisecond count; both load.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_DAY: u64 = 86_400_000;

/// Format epoch milliseconds as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[must_use]
pub fn format_iso8601(timestamp_ms: u64) -> String {
    let days = timestamp_ms / MS_PER_DAY;
    let of_day = timestamp_ms % MS_PER_DAY;
    let (year, month, day) = civil_from_days(days);

    let millis = of_day % MS_PER_SECOND;
    let seconds = of_day / MS_PER_SECOND;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

/// Parse `YYYY-MM-DDTHH:MM:SS[.fff]Z` (or a `+00:00` offset) into epoch milliseconds.
///
/// Returns `None` for malformed input, impossible dates and times before 1970.
#[must_use]
pub fn parse_iso8601(text: &str) -> Option<u64> {
    let (date, time) = text.split_once('T')?;

    let mut date_parts = date.splitn(3, '-');
    let year: u64 = digits(date_parts.next()?, 4)?;
    let month: u64 = digits(date_parts.next()?, 2)?;
    let day: u64 = digits(date_parts.next()?, 2)?;

    let time = time
        .strip_suffix('Z')
        .or_else(|| time.strip_suffix("+00:00"))?;
    let (clock, fraction) = match time.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (time, None),
    };
    let mut clock_parts = clock.splitn(3, ':');
    let hour: u64 = digits(clock_parts.next()?, 2)?;
    let minute: u64 = digits(clock_parts.next()?, 2)?;
    let second: u64 = digits(clock_parts.next()?, 2)?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    let millis = match fraction {
        None => 0,
        Some(fraction) => {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // Sub-millisecond digits are dropped
            let mut padded = fraction.chars().take(3).collect::<String>();
            while padded.len() < 3 {
                padded.push('0');
            }
            padded.parse::<u64>().ok()?
        }
    };

    if year < 1970 || !(1..=12).contains(&month) || day == 0 {
        return None;
    }
    let days = days_from_civil(year, month, day);
    if civil_from_days(days) != (year, month, day) {
        // e.g. February 30th
        return None;
    }

    Some(days * MS_PER_DAY + ((hour * 60 + minute) * 60 + second) * MS_PER_SECOND + millis)
}

fn digits(part: &str, width: usize) -> Option<u64> {
    if part.len() == width && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date on or after it.
fn days_from_civil(year: u64, month: u64, day: u64) -> u64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year / 400;
    let year_of_era = year - era * 400;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let days = days + 719_468;
    let era = days / 146_097;
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// Serde adapter: writes ISO-8601 strings, reads strings or millisecond counts.
pub(crate) mod iso_millis {
    use super::{de, fmt, format_iso8601, parse_iso8601, Deserializer, Serializer, Visitor};

    pub(crate) fn serialize<S: Serializer>(timestamp_ms: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso8601(*timestamp_ms))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }

    struct TimestampVisitor;

    impl Visitor<'_> for TimestampVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an ISO-8601 UTC timestamp or epoch milliseconds")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
            parse_iso8601(value)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }
    }
}
