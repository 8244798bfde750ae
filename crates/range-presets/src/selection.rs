//! Date-range picker selection state.
//!
//! [`RangeSelection`] is the state a picker component owns: the committed
//! range, an optional comparison range, whether the popover is open, and
//! which preset (if any) the current range corresponds to. It changes only
//! through named transitions; the resolver is called as a pure helper.

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::debug;

use crate::catalog::PresetId;
use crate::interval::{end_of_day, start_of_day, DateInterval};
use crate::resolver::{match_preset_with_options, ResolveOptions};

/// What the picker hands to its owner when a changed selection is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeUpdate<Tz: TimeZone> {
    pub range: DateInterval<Tz>,
    pub compare: Option<DateInterval<Tz>>,
}

/// State captured on `open`, restored on `cancel`.
#[derive(Debug, Clone)]
struct Snapshot<Tz: TimeZone> {
    range: DateInterval<Tz>,
    compare: Option<DateInterval<Tz>>,
    preset: Option<PresetId>,
}

#[derive(Debug, Clone)]
pub struct RangeSelection<Tz: TimeZone> {
    range: DateInterval<Tz>,
    compare: Option<DateInterval<Tz>>,
    preset: Option<PresetId>,
    is_open: bool,
    snapshot: Option<Snapshot<Tz>>,
    options: ResolveOptions,
}

impl<Tz: TimeZone> RangeSelection<Tz> {
    /// Start from an arbitrary range, snapped to whole days; the matching
    /// preset is looked up.
    pub fn new(range: DateInterval<Tz>, now: &DateTime<Tz>) -> Self {
        Self::with_options(range, now, ResolveOptions::default())
    }

    pub fn with_options(
        range: DateInterval<Tz>,
        now: &DateTime<Tz>,
        options: ResolveOptions,
    ) -> Self {
        let range = range.normalized();
        let preset = match_preset_with_options(&range, now, &options);
        Self {
            range,
            compare: None,
            preset,
            is_open: false,
            snapshot: None,
            options,
        }
    }

    /// Start from a preset resolved against `now`.
    pub fn from_preset(id: PresetId, now: &DateTime<Tz>) -> Self {
        Self::new(id.resolve(now), now)
    }

    pub fn range(&self) -> &DateInterval<Tz> {
        &self.range
    }

    pub fn compare(&self) -> Option<&DateInterval<Tz>> {
        self.compare.as_ref()
    }

    pub fn preset(&self) -> Option<PresetId> {
        self.preset
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Open the picker, remembering the current selection for `cancel`.
    ///
    /// Opening an already open picker keeps the original snapshot.
    pub fn open(&mut self) {
        if self.is_open {
            return;
        }
        self.snapshot = Some(Snapshot {
            range: self.range.clone(),
            compare: self.compare.clone(),
            preset: self.preset,
        });
        self.is_open = true;
        debug!(preset = ?self.preset, "range picker opened");
    }

    /// Replace the range with a resolved preset.
    ///
    /// An enabled comparison range follows, shifted back one year.
    pub fn apply_preset(&mut self, id: PresetId, now: &DateTime<Tz>) {
        self.range = id.resolve_with_options(now, &self.options);
        if self.compare.is_some() {
            self.compare = Some(self.range.shift_years(-1));
        }
        self.rematch(now);
        debug!(preset = %id, matched = ?self.preset, "preset applied");
    }

    /// Calendar selection. `to` may be absent while the user is mid-selection.
    /// A reversed pair is swapped so `from` never follows `to`.
    pub fn select(&mut self, from: NaiveDate, to: Option<NaiveDate>, now: &DateTime<Tz>) {
        let tz = now.timezone();
        let (from, to) = match to {
            Some(to) if to < from => (to, Some(from)),
            _ => (from, to),
        };
        self.range = DateInterval::new(
            start_of_day(&tz, from),
            to.map(|day| end_of_day(&tz, day)),
        );
        self.rematch(now);
    }

    /// Edit the start date. `to` is pulled forward if it would end up
    /// before `from` or is absent.
    pub fn edit_from(&mut self, date: NaiveDate, now: &DateTime<Tz>) {
        let tz = now.timezone();
        let to = match &self.range.to {
            Some(to) if to.date_naive() >= date => to.clone(),
            _ => end_of_day(&tz, date),
        };
        self.range = DateInterval::new(start_of_day(&tz, date), Some(to));
        self.rematch(now);
    }

    /// Edit the end date. `from` is pulled back if it would end up after `to`.
    pub fn edit_to(&mut self, date: NaiveDate, now: &DateTime<Tz>) {
        let tz = now.timezone();
        let from = if date < self.range.from_date() {
            start_of_day(&tz, date)
        } else {
            self.range.from.clone()
        };
        self.range = DateInterval::new(from, Some(end_of_day(&tz, date)));
        self.rematch(now);
    }

    /// Toggle the comparison range. Enabling seeds it with the current range
    /// one year earlier.
    pub fn set_compare(&mut self, enabled: bool) {
        self.compare = enabled.then(|| self.range.shift_years(-1));
        debug!(enabled, "compare range toggled");
    }

    /// Discard edits made since `open` and close.
    pub fn cancel(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.range = snapshot.range;
            self.compare = snapshot.compare;
            self.preset = snapshot.preset;
        }
        self.is_open = false;
        debug!("range picker cancelled");
    }

    /// Close the picker and commit the selection.
    ///
    /// Returns the update to publish, or `None` when nothing changed since
    /// `open`.
    pub fn apply(&mut self) -> Option<RangeUpdate<Tz>> {
        self.is_open = false;
        let changed = match self.snapshot.take() {
            Some(snapshot) => snapshot.range != self.range || snapshot.compare != self.compare,
            None => true,
        };
        debug!(changed, preset = ?self.preset, "range picker applied");
        changed.then(|| RangeUpdate {
            range: self.range.clone(),
            compare: self.compare.clone(),
        })
    }

    fn rematch(&mut self, now: &DateTime<Tz>) {
        self.preset = match_preset_with_options(&self.range, now, &self.options);
    }
}
