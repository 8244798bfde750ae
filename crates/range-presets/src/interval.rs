//! Immutable date intervals and local-calendar helpers.
//!
//! Every operation here constructs and returns a new value. `DateTime` is
//! never mutated in place, so an interval handed to a caller can't be
//! altered behind its back by a later comparison.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Step used to walk out of a DST gap when building a local instant.
const GAP_STEP_MINUTES: i64 = 15;

/// Upper bound on gap-walking steps (one full day).
const GAP_MAX_STEPS: usize = 24 * 60 / GAP_STEP_MINUTES as usize;

/// A pair of inclusive calendar boundaries.
///
/// `to` is optional because a calendar selection in progress may only have a
/// start. Intervals produced by the resolver always carry both endpoints,
/// with `from` at 00:00:00.000 and `to` at 23:59:59.999 local time.
#[derive(Debug, Clone)]
pub struct DateInterval<Tz: TimeZone> {
    pub from: DateTime<Tz>,
    pub to: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> DateInterval<Tz> {
    pub fn new(from: DateTime<Tz>, to: Option<DateTime<Tz>>) -> Self {
        Self { from, to }
    }

    /// Build a normalized interval covering the calendar days `from..=to` in `tz`.
    pub fn days(tz: &Tz, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: start_of_day(tz, from),
            to: Some(end_of_day(tz, to)),
        }
    }

    /// The time zone the `from` endpoint is expressed in.
    pub fn timezone(&self) -> Tz {
        self.from.timezone()
    }

    /// Calendar date of `from`.
    pub fn from_date(&self) -> NaiveDate {
        self.from.date_naive()
    }

    /// Calendar date of `to`, if present.
    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to.as_ref().map(|to| to.date_naive())
    }

    /// Snap `from` to start of day and `to` to end of day.
    pub fn normalized(&self) -> Self {
        let tz = self.timezone();
        Self {
            from: start_of_day(&tz, self.from_date()),
            to: self
                .to
                .as_ref()
                .map(|to| end_of_day(&to.timezone(), to.date_naive())),
        }
    }

    /// Whether both endpoints fall on the same calendar dates as `other`'s.
    ///
    /// Two absent `to` endpoints compare equal.
    pub fn same_dates(&self, other: &Self) -> bool {
        self.from_date() == other.from_date() && self.to_date() == other.to_date()
    }

    /// Shift both endpoints by whole calendar years, keeping wall-clock time.
    ///
    /// February 29 maps to February 28 in non-leap target years.
    pub fn shift_years(&self, years: i32) -> Self {
        Self {
            from: shift_instant_years(&self.from, years),
            to: self.to.as_ref().map(|to| shift_instant_years(to, years)),
        }
    }
}

impl<Tz: TimeZone> PartialEq for DateInterval<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl<Tz: TimeZone> Eq for DateInterval<Tz> {}

// ── Local-calendar helpers ──────────────────────────────────────────────────

/// The first valid instant of `date` in `tz` (00:00:00.000 unless a DST gap
/// swallows midnight, in which case the first instant after the gap).
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    earliest_at_or_after(tz, date.and_time(NaiveTime::MIN))
}

/// The last valid instant of `date` in `tz`, at millisecond precision
/// (23:59:59.999).
pub fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let naive = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
    latest_at_or_before(tz, naive)
}

/// First day of the month containing `date`.
pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.day0() as i64)
}

/// Last day of `month` in `year`.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

fn shift_instant_years<Tz: TimeZone>(dt: &DateTime<Tz>, years: i32) -> DateTime<Tz> {
    let date = dt.date_naive();
    let year = date.year() + years;
    let shifted = NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| last_day_of_month(year, date.month()))
        .unwrap_or(date);
    earliest_at_or_after(&dt.timezone(), shifted.and_time(dt.time()))
}

fn earliest_at_or_after<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut probe = naive;
    for _ in 0..GAP_MAX_STEPS {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => probe += chrono::Duration::minutes(GAP_STEP_MINUTES),
        }
    }
    tz.from_utc_datetime(&naive)
}

fn latest_at_or_before<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut probe = naive;
    for _ in 0..GAP_MAX_STEPS {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(_, latest) => return latest,
            LocalResult::None => probe -= chrono::Duration::minutes(GAP_STEP_MINUTES),
        }
    }
    tz.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};
    use chrono_tz::Tz;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_normalizes_endpoints() {
        let iv = DateInterval::days(&Utc, date(2024, 6, 9), date(2024, 6, 12));
        assert_eq!(iv.from.to_rfc3339(), "2024-06-09T00:00:00+00:00");
        let to = iv.to.unwrap();
        assert_eq!(to.date_naive(), date(2024, 6, 12));
        assert_eq!((to.hour(), to.minute(), to.second()), (23, 59, 59));
        assert_eq!(to.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_normalized_returns_new_value() {
        let from = Utc.with_ymd_and_hms(2024, 6, 9, 13, 5, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 12, 8, 0, 0).unwrap();
        let raw = DateInterval::new(from, Some(to));
        let norm = raw.normalized();

        assert_eq!(raw.from, from, "source interval must be untouched");
        assert_eq!(norm, DateInterval::days(&Utc, date(2024, 6, 9), date(2024, 6, 12)));
        assert!(raw.same_dates(&norm));
    }

    #[test]
    fn test_normalized_keeps_absent_to() {
        let from = Utc.with_ymd_and_hms(2024, 6, 9, 13, 5, 0).unwrap();
        let norm = DateInterval::new(from, None).normalized();
        assert!(norm.to.is_none());
        assert_eq!(norm.from.hour(), 0);
    }

    #[test]
    fn test_same_dates_ignores_time_of_day() {
        let a = DateInterval::days(&Utc, date(2024, 1, 1), date(2024, 1, 31));
        let b = DateInterval::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap()),
        );
        assert!(a.same_dates(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_dates_open_vs_closed() {
        let closed = DateInterval::days(&Utc, date(2024, 1, 1), date(2024, 1, 1));
        let open = DateInterval::new(closed.from, None);
        assert!(!closed.same_dates(&open));
        assert!(open.same_dates(&open.clone()));
    }

    #[test]
    fn test_shift_years_back() {
        let iv = DateInterval::days(&Utc, date(2024, 6, 2), date(2024, 6, 8));
        let shifted = iv.shift_years(-1);
        assert_eq!(shifted.from_date(), date(2023, 6, 2));
        assert_eq!(shifted.to_date(), Some(date(2023, 6, 8)));
        assert_eq!(shifted.to.unwrap().timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_shift_years_clamps_leap_day() {
        let iv = DateInterval::days(&Utc, date(2024, 2, 1), date(2024, 2, 29));
        let shifted = iv.shift_years(-1);
        assert_eq!(shifted.to_date(), Some(date(2023, 2, 28)));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2), Some(date(2024, 2, 29)));
        assert_eq!(last_day_of_month(2023, 2), Some(date(2023, 2, 28)));
        assert_eq!(last_day_of_month(2024, 12), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(first_of_month(date(2024, 3, 15)), date(2024, 3, 1));
        assert_eq!(first_of_month(date(2024, 3, 1)), date(2024, 3, 1));
    }

    #[test]
    fn test_start_of_day_across_spring_forward() {
        // US spring forward happens at 02:00, midnight itself is valid.
        let tz: Tz = "America/New_York".parse().unwrap();
        let start = start_of_day(&tz, date(2024, 3, 10));
        assert_eq!(start.hour(), 0);
        assert_eq!(start.date_naive(), date(2024, 3, 10));
    }

    #[test]
    fn test_start_of_day_when_midnight_is_skipped() {
        // Brazil began DST on 2018-11-04 at 00:00, jumping straight to 01:00.
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let start = start_of_day(&tz, date(2018, 11, 4));
        assert_eq!(start.date_naive(), date(2018, 11, 4));
        assert_eq!(start.hour(), 1);
        let end = end_of_day(&tz, date(2018, 11, 4));
        assert!(start < end);
    }

    #[test]
    fn test_end_of_day_on_fall_back_takes_latest() {
        let tz: Tz = "Europe/Berlin".parse().unwrap();
        let end = end_of_day(&tz, date(2024, 10, 27));
        assert_eq!(end.date_naive(), date(2024, 10, 27));
        assert_eq!(end.hour(), 23);
    }
}
