//! Reporting period attached to an import.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::ModelError;

/// Period the imported data covers.
///
/// Presets serialize as their wire name (`"7days"`); a custom range
/// serializes as `{"type": "custom", "start": ..., "end": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrame {
    SevenDays,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl TimeFrame {
    /// Wire names accepted by [`TimeFrame::from_str`], `custom` included.
    pub const NAMES: [&'static str; 6] = [
        "7days",
        "lastweek",
        "thismonth",
        "lastmonth",
        "thisyear",
        "custom",
    ];

    /// Custom range; fails when `start` is after `end`.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvertedTimeFrame { start, end });
        }
        Ok(Self::Custom { start, end })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SevenDays => "7days",
            Self::LastWeek => "lastweek",
            Self::ThisMonth => "thismonth",
            Self::LastMonth => "lastmonth",
            Self::ThisYear => "thisyear",
            Self::Custom { .. } => "custom",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { start, end } => write!(f, "{start} to {end}"),
            Self::SevenDays => f.write_str("Last 7 days"),
            Self::LastWeek => f.write_str("Last week"),
            Self::ThisMonth => f.write_str("This month"),
            Self::LastMonth => f.write_str("Last month"),
            Self::ThisYear => f.write_str("This year"),
        }
    }
}

/// Parses a preset name. `custom` needs dates and is rejected here; use
/// [`TimeFrame::custom`].
impl FromStr for TimeFrame {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7days" => Ok(Self::SevenDays),
            "lastweek" => Ok(Self::LastWeek),
            "thismonth" => Ok(Self::ThisMonth),
            "lastmonth" => Ok(Self::LastMonth),
            "thisyear" => Ok(Self::ThisYear),
            other => Err(ModelError::UnknownTimeFrame(other.to_string())),
        }
    }
}

impl Serialize for TimeFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Custom { start, end } => {
                let mut state = serializer.serialize_struct("TimeFrame", 3)?;
                state.serialize_field("type", "custom")?;
                state.serialize_field("start", start)?;
                state.serialize_field("end", end)?;
                state.end()
            }
            preset => serializer.serialize_str(preset.name()),
        }
    }
}
