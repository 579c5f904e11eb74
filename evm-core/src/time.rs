//! Time utilities: turn user-supplied dates into UTC instants.
//!
//! The engine only works with `DateTime<Utc>`. Calendar dates coming from
//! files or flags are anchored at local midnight in an IANA timezone.

use anyhow::Result;
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Local midnight of `date` in `tz`, as UTC. When a DST change skips
/// midnight, the first valid local time after the gap is used.
pub fn local_midnight_to_utc(date: NaiveDate, tz: &str) -> Result<DateTime<Utc>> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

fn local_to_utc(ndt: NaiveDateTime, tz: &str) -> Result<DateTime<Utc>> {
    let zone = parse_tz(tz)?;
    let local = match zone.from_local_datetime(&ndt) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Inside a DST gap: step forward past it.
        LocalResult::None => zone
            .from_local_datetime(&(ndt + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| anyhow::anyhow!("nonexistent local time: {ndt} {tz}"))?,
    };
    Ok(local.with_timezone(&Utc))
}

/// Parse a calendar date in any of the accepted spellings:
/// `YYYY-MM-DD` or `MM/DD/YYYY`.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .map_err(|e| anyhow::anyhow!("invalid date '{s}': {e}"))
}

/// Parse an as-of value: RFC3339, `YYYY-MM-DD HH:MM` (local to `tz`), or a
/// bare calendar date (local midnight in `tz`).
pub fn parse_instant(s: &str, tz: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return local_to_utc(ndt, tz);
    }
    local_midnight_to_utc(parse_calendar_date(s)?, tz)
}
