//! The fixed, ordered catalog of date-range presets.
//!
//! Order matters: [`crate::resolver::match_preset`] walks [`CATALOG`] front to
//! back and returns the first hit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PresetError;

/// Stable identifier of a preset range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetId {
    Today,
    Yesterday,
    Last7,
    Last14,
    Last30,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

/// A preset as shown to the user: id plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetDefinition {
    pub id: PresetId,
    pub label: &'static str,
}

/// Every supported preset, in search order.
pub const CATALOG: [PresetDefinition; 9] = [
    PresetDefinition {
        id: PresetId::Today,
        label: "Today",
    },
    PresetDefinition {
        id: PresetId::Yesterday,
        label: "Yesterday",
    },
    PresetDefinition {
        id: PresetId::Last7,
        label: "Last 7 days",
    },
    PresetDefinition {
        id: PresetId::Last14,
        label: "Last 14 days",
    },
    PresetDefinition {
        id: PresetId::Last30,
        label: "Last 30 days",
    },
    PresetDefinition {
        id: PresetId::ThisWeek,
        label: "This Week",
    },
    PresetDefinition {
        id: PresetId::LastWeek,
        label: "Last Week",
    },
    PresetDefinition {
        id: PresetId::ThisMonth,
        label: "This Month",
    },
    PresetDefinition {
        id: PresetId::LastMonth,
        label: "Last Month",
    },
];

impl PresetId {
    /// The wire identifier (e.g. `"last7"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            PresetId::Today => "today",
            PresetId::Yesterday => "yesterday",
            PresetId::Last7 => "last7",
            PresetId::Last14 => "last14",
            PresetId::Last30 => "last30",
            PresetId::ThisWeek => "thisWeek",
            PresetId::LastWeek => "lastWeek",
            PresetId::ThisMonth => "thisMonth",
            PresetId::LastMonth => "lastMonth",
        }
    }

    /// The human-readable label from [`CATALOG`].
    pub fn label(self) -> &'static str {
        CATALOG
            .iter()
            .find(|def| def.id == self)
            .map(|def| def.label)
            .unwrap_or_else(|| self.as_str())
    }

    /// Iterate all preset ids in catalog order.
    pub fn all() -> impl Iterator<Item = PresetId> {
        CATALOG.into_iter().map(|def| def.id)
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = PresetError;

    /// Exact, case-sensitive match on the wire identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetId::all()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}
