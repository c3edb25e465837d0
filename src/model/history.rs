//! Price history models.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::internal::InternalError;

/// Rollup resolution of a history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Minute,
    Hour,
    Day,
    Week,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 4] = [Self::Minute, Self::Hour, Self::Day, Self::Week];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            _ => Err(InternalError::UnknownGranularity(s.to_string())),
        }
    }
}

/// One price snapshot of a token in one granularity table.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i32,
    pub token_id: i32,
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
}
