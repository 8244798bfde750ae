//! # range-presets
//!
//! Preset date-range resolution for date-range pickers.
//!
//! Maps symbolic presets (`"today"`, `"last7"`, `"lastMonth"`, ...) to
//! concrete calendar intervals anchored at an explicit "now", and classifies
//! arbitrary intervals back to the preset they correspond to.
//!
//! ## Modules
//!
//! - [`catalog`] - The fixed, ordered preset catalog
//! - [`interval`] - Immutable date intervals and start/end-of-day helpers
//! - [`resolver`] - Preset → interval and interval → preset
//! - [`selection`] - Picker selection state with named transitions
//! - [`parse`] - Anchor, day, and time zone parsing
//! - [`error`] - Error types

pub mod catalog;
pub mod error;
pub mod interval;
pub mod parse;
pub mod resolver;
pub mod selection;

pub use catalog::{PresetDefinition, PresetId, CATALOG};
pub use error::PresetError;
pub use interval::{end_of_day, start_of_day, DateInterval};
pub use parse::{parse_day, parse_instant, parse_timezone};
pub use resolver::{
    match_preset, match_preset_now, match_preset_with_options, resolve_preset,
    resolve_preset_now, resolve_preset_with_options, ResolveOptions, WeekStartDay,
};
pub use selection::{RangeSelection, RangeUpdate};
