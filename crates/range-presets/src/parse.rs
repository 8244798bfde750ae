//! String parsing for anchors, days, and time zones.

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::error::PresetError;

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, PresetError> {
    s.parse::<Tz>()
        .map_err(|_| PresetError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse an RFC 3339 datetime and express it in `tz`.
pub fn parse_instant<Z: TimeZone>(s: &str, tz: &Z) -> Result<DateTime<Z>, PresetError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(tz))
        .map_err(|e| PresetError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Parse a calendar day: either `YYYY-MM-DD`, or an RFC 3339 datetime whose
/// local date in `tz` is taken.
pub fn parse_day<Z: TimeZone>(s: &str, tz: &Z) -> Result<NaiveDate, PresetError> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day);
    }
    parse_instant(s, tz).map(|dt| dt.date_naive()).map_err(|_| {
        PresetError::InvalidDatetime(format!("'{}': expected YYYY-MM-DD or RFC 3339", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Paris").unwrap(), Tz::Europe__Paris);
        let err = parse_timezone("Invalid/Zone").unwrap_err().to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_parse_instant_converts_zone() {
        let tz = parse_timezone("America/New_York").unwrap();
        let dt = parse_instant("2024-06-12T15:30:00Z", &tz).unwrap();
        assert_eq!(dt.hour(), 11);
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        let err = parse_instant("yesterday-ish", &Utc).unwrap_err().to_string();
        assert!(err.contains("Invalid datetime"), "got: {err}");
    }

    #[test]
    fn test_parse_day_plain_date() {
        let day = parse_day("2024-02-29", &Utc).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_day_from_rfc3339_uses_local_date() {
        let tz = parse_timezone("Asia/Tokyo").unwrap();
        let day = parse_day("2024-06-11T20:00:00Z", &tz).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    }

    #[test]
    fn test_parse_day_rejects_invalid_calendar_date() {
        assert!(parse_day("2023-02-29", &Utc).is_err());
    }
}
