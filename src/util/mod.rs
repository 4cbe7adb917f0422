use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::fmt::Display;

/// Value format of `<input type="datetime-local">` (minute precision).
pub(crate) const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TimeInputError {
    pub input: String,
}

impl std::fmt::Display for TimeInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid date/time: {}", self.input)
    }
}

/// Parses a wire timestamp (RFC 3339, any offset) into an absolute instant.
pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Wire form of an instant, e.g. `2025-06-01T18:00:00.000Z`.
pub(crate) fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Instant -> value for a datetime-local input in `tz`. Absent stays empty.
pub(crate) fn to_input_value<Tz>(instant: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant
        .map(|i| i.with_timezone(tz).format(INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// datetime-local input value in `tz` -> instant. An empty value is `None`,
/// never a default date.
pub(crate) fn from_input_value<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, TimeInputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let invalid = || TimeInputError {
        input: raw.to_string(),
    };

    let naive = NaiveDateTime::parse_from_str(raw, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, INPUT_FORMAT_SECONDS))
        .map_err(|_| invalid())?;

    resolve_local(&naive, tz).map(Some).ok_or_else(invalid)
}

fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        // Wall-clock time skipped by a DST jump; browsers move it forward.
        LocalResult::None => tz
            .from_local_datetime(&(*naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

pub(crate) fn display_local<Tz>(instant: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant
        .map(|i| i.with_timezone(tz).format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| "No date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::America::New_York;

    fn tz(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).expect("valid offset")
    }

    #[test]
    fn test_empty_input_stays_absent() {
        assert_eq!(from_input_value("", &tz(2)), Ok(None));
        assert_eq!(from_input_value("   ", &tz(2)), Ok(None));
        assert_eq!(to_input_value(None, &tz(2)), "");
    }

    #[test]
    fn test_input_value_converts_to_utc_instant() {
        let instant = from_input_value("2025-06-01T20:00", &tz(2))
            .expect("valid input")
            .expect("present");
        assert_eq!(format_instant(&instant), "2025-06-01T18:00:00.000Z");
    }

    #[test]
    fn test_round_trip_across_utc_midnight() {
        // 23:30 at UTC-5 is already the next day in UTC.
        let zone = tz(-5);
        let instant = from_input_value("2025-06-01T23:30", &zone)
            .expect("valid input")
            .expect("present");
        let wire = format_instant(&instant);
        assert_eq!(wire, "2025-06-02T04:30:00.000Z");

        let reloaded = parse_instant(&wire).expect("wire form parses");
        assert_eq!(to_input_value(Some(&reloaded), &zone), "2025-06-01T23:30");
        assert_eq!(display_local(Some(&reloaded), &zone), "2025-06-01 23:30");
    }

    #[test]
    fn test_round_trip_east_of_utc_previous_day() {
        // 00:15 at UTC+9 is still the previous day in UTC.
        let zone = tz(9);
        let instant = from_input_value("2025-01-01T00:15", &zone)
            .expect("valid input")
            .expect("present");
        assert_eq!(format_instant(&instant), "2024-12-31T15:15:00.000Z");
        assert_eq!(to_input_value(Some(&instant), &zone), "2025-01-01T00:15");
    }

    #[test]
    fn test_seconds_precision_input_is_accepted() {
        let instant = from_input_value("2025-06-01T20:00:30", &Utc)
            .expect("valid input")
            .expect("present");
        assert_eq!(format_instant(&instant), "2025-06-01T20:00:30.000Z");
    }

    #[test]
    fn test_garbage_input_is_an_error() {
        let err = from_input_value("tomorrow", &Utc).unwrap_err();
        assert_eq!(err.input, "tomorrow");
        assert_eq!(err.to_string(), "Invalid date/time: tomorrow");
    }

    #[test]
    fn test_parse_instant_accepts_offsets_and_rejects_junk() {
        let a = parse_instant("2025-06-01T20:00:00+02:00").expect("offset form");
        let b = parse_instant("2025-06-01T18:00:00.000Z").expect("zulu form");
        assert_eq!(a, b);
        assert!(parse_instant("").is_none());
        assert!(parse_instant("not a date").is_none());
    }

    #[test]
    fn test_time_skipped_by_dst_moves_forward_an_hour() {
        // 02:30 does not exist in New York on 2025-03-09; it becomes 03:30 EDT.
        let instant = from_input_value("2025-03-09T02:30", &New_York)
            .expect("valid input")
            .expect("present");
        assert_eq!(format_instant(&instant), "2025-03-09T07:30:00.000Z");
        assert_eq!(to_input_value(Some(&instant), &New_York), "2025-03-09T03:30");
    }

    #[test]
    fn test_repeated_time_takes_earliest_instant() {
        // 01:30 happens twice in New York on 2025-11-02; the EDT one comes first.
        let instant = from_input_value("2025-11-02T01:30", &New_York)
            .expect("valid input")
            .expect("present");
        assert_eq!(format_instant(&instant), "2025-11-02T05:30:00.000Z");
        assert_eq!(to_input_value(Some(&instant), &New_York), "2025-11-02T01:30");
    }

    #[test]
    fn test_display_without_instant() {
        assert_eq!(display_local(None, &Utc), "No date");
    }
}
