//! Deterministic preset date-range resolution.
//!
//! Translates between a symbolic preset identifier (`"last7"`,
//! `"thisMonth"`, ...) and a concrete calendar interval. All functions take
//! an explicit `now` anchor and never read the system clock, except the
//! `*_now` conveniences that pass `chrono::Local::now()` through.
//!
//! Calendar arithmetic happens in the local calendar of `now`'s time zone.
//!
//! # Functions
//!
//! - [`resolve_preset`] - Preset id → interval anchored at `now`
//! - [`match_preset`] - Interval → the first catalog preset with the same dates

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::PresetId;
use crate::error::PresetError;
use crate::interval::{first_of_month, start_of_day, DateInterval};

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for `thisWeek` / `lastWeek`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// US convention, matches JavaScript's `Date.getDay()` numbering.
    #[default]
    Sunday,
    /// ISO 8601.
    Monday,
}

/// Options for [`resolve_preset_with_options`] and [`match_preset_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Which day starts the week for week-based presets.
    #[serde(default)]
    pub week_start: WeekStartDay,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

// ── resolve_preset ──────────────────────────────────────────────────────────

/// Resolve a preset identifier to a concrete interval anchored at `now`.
///
/// Weeks start on Sunday. For a configurable week start, use
/// [`resolve_preset_with_options`].
///
/// # Arguments
///
/// * `preset_id` - One of the [`crate::CATALOG`] ids (e.g. `"last7"`)
/// * `now` - The reference instant; its time zone defines the local calendar
///
/// # Returns
///
/// A [`DateInterval`] with `from` at 00:00:00.000 and `to` at 23:59:59.999.
///
/// # Errors
///
/// Returns [`PresetError::UnknownPreset`] if `preset_id` is not in the
/// catalog. There is no fallback preset.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use range_presets::resolve_preset;
///
/// // Wednesday, June 12 2024
/// let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 30, 0).unwrap();
/// let week = resolve_preset("thisWeek", &now).unwrap();
/// assert_eq!(week.from.to_rfc3339(), "2024-06-09T00:00:00+00:00");
/// ```
pub fn resolve_preset<Tz: TimeZone>(
    preset_id: &str,
    now: &DateTime<Tz>,
) -> Result<DateInterval<Tz>, PresetError> {
    resolve_preset_with_options(preset_id, now, &ResolveOptions::default())
}

/// Resolve a preset identifier with options.
///
/// # Errors
///
/// Returns [`PresetError::UnknownPreset`] if `preset_id` is not in the catalog.
pub fn resolve_preset_with_options<Tz: TimeZone>(
    preset_id: &str,
    now: &DateTime<Tz>,
    options: &ResolveOptions,
) -> Result<DateInterval<Tz>, PresetError> {
    let id: PresetId = preset_id.parse()?;
    Ok(id.resolve_with_options(now, options))
}

/// Resolve a preset identifier against the host clock and local time zone.
///
/// # Errors
///
/// Returns [`PresetError::UnknownPreset`] if `preset_id` is not in the catalog.
pub fn resolve_preset_now(preset_id: &str) -> Result<DateInterval<Local>, PresetError> {
    resolve_preset(preset_id, &Local::now())
}

impl PresetId {
    /// Resolve this preset against `now` with Sunday-start weeks.
    pub fn resolve<Tz: TimeZone>(self, now: &DateTime<Tz>) -> DateInterval<Tz> {
        self.resolve_with_options(now, &ResolveOptions::default())
    }

    /// Resolve this preset against `now`.
    pub fn resolve_with_options<Tz: TimeZone>(
        self,
        now: &DateTime<Tz>,
        options: &ResolveOptions,
    ) -> DateInterval<Tz> {
        let (from, to) = preset_dates(self, now.date_naive(), options.week_start);
        DateInterval::days(&now.timezone(), from, to)
    }
}

/// Inclusive calendar dates covered by `id` when today is `today`.
fn preset_dates(id: PresetId, today: NaiveDate, ws: WeekStartDay) -> (NaiveDate, NaiveDate) {
    let week_start = || days_before(today, days_from_week_start(today.weekday(), ws));

    match id {
        PresetId::Today => (today, today),
        PresetId::Yesterday => {
            let day = days_before(today, 1);
            (day, day)
        }
        PresetId::Last7 => (days_before(today, 6), today),
        PresetId::Last14 => (days_before(today, 13), today),
        PresetId::Last30 => (days_before(today, 29), today),
        PresetId::ThisWeek => (week_start(), today),
        PresetId::LastWeek => {
            let this_start = week_start();
            (days_before(this_start, 7), days_before(this_start, 1))
        }
        PresetId::ThisMonth => (first_of_month(today), today),
        PresetId::LastMonth => {
            let last_prev = days_before(first_of_month(today), 1);
            (first_of_month(last_prev), last_prev)
        }
    }
}

/// `day` minus `n` days, clamped to the earliest date chrono can represent.
fn days_before(day: NaiveDate, n: i64) -> NaiveDate {
    day.checked_sub_signed(chrono::Duration::days(n))
        .unwrap_or(NaiveDate::MIN)
}

// ── match_preset ────────────────────────────────────────────────────────────

/// Find the first catalog preset whose interval has the same calendar dates
/// as `interval`, with Sunday-start weeks.
///
/// Both sides are compared at date granularity: `from` dates and `to` dates
/// independently, time of day ignored. The catalog is searched in declared
/// order, so when two presets coincide (e.g. `today` and `thisWeek` on a
/// Sunday) the earlier one wins.
///
/// An interval without `to` only matches a preset whose `to`, truncated to
/// start of day, is the Unix epoch. In practice that never happens for a
/// present-day `now`, so open intervals match nothing.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use range_presets::{match_preset, resolve_preset, PresetId};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 30, 0).unwrap();
/// let last7 = resolve_preset("last7", &now).unwrap();
/// assert_eq!(match_preset(&last7, &now), Some(PresetId::Last7));
/// ```
pub fn match_preset<Tz: TimeZone>(
    interval: &DateInterval<Tz>,
    now: &DateTime<Tz>,
) -> Option<PresetId> {
    match_preset_with_options(interval, now, &ResolveOptions::default())
}

/// Find the first catalog preset matching `interval`, with options.
pub fn match_preset_with_options<Tz: TimeZone>(
    interval: &DateInterval<Tz>,
    now: &DateTime<Tz>,
    options: &ResolveOptions,
) -> Option<PresetId> {
    let tz = now.timezone();
    let from_day = interval.from.with_timezone(&tz).date_naive();
    let to_day = interval
        .to
        .as_ref()
        .map(|to| to.with_timezone(&tz).date_naive());

    let matched = PresetId::all().find(|&id| {
        let (preset_from, preset_to) = preset_dates(id, now.date_naive(), options.week_start);
        if preset_from != from_day {
            return false;
        }
        match to_day {
            Some(day) => preset_to == day,
            None => start_of_day(&tz, preset_to).timestamp_millis() == 0,
        }
    });

    trace!(
        from = %from_day,
        to = ?to_day,
        preset = ?matched.map(PresetId::as_str),
        "matched interval against preset catalog"
    );
    matched
}

/// [`match_preset`] against the host clock.
pub fn match_preset_now(interval: &DateInterval<Local>) -> Option<PresetId> {
    match_preset(interval, &Local::now())
}

// ── Tests ───────────────────────────────────────────────────────────────────
