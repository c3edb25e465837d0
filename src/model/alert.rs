//! Price alert model and matching rule.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    error::{internal::InternalError, AppError},
    util::parse::parse_decimal,
};

/// Which side of the target price triggers an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDirection {
    /// Fires when the price rises to or past the target.
    Above,
    /// Fires when the price falls to or below the target.
    Under,
}

impl AlertDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Under => "under",
        }
    }
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertDirection {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" => Ok(Self::Above),
            "under" | "below" => Ok(Self::Under),
            _ => Err(InternalError::UnknownDirection(s.to_string())),
        }
    }
}

/// A user-configured threshold on a token's price.
///
/// Alerts are created elsewhere; the engine only reads them and deletes them
/// once they fire or their token crashes.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAlert {
    pub id: i32,
    /// Discord user id of the subscriber.
    pub owner_id: String,
    pub token_symbol: String,
    pub target_price: Decimal,
    pub direction: AlertDirection,
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    /// Converts an entity model to an alert.
    ///
    /// # Returns
    /// - `Ok(PriceAlert)` - The converted alert
    /// - `Err(AppError::InternalErr)` - Target price or direction failed to parse
    pub fn from_entity(entity: entity::price_alert::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            target_price: parse_decimal(&entity.target_price)?,
            direction: entity.direction.parse()?,
            owner_id: entity.owner_id,
            token_symbol: entity.token_symbol,
            created_at: entity.created_at,
        })
    }

    /// Whether `price` satisfies this alert. Both boundaries are inclusive.
    pub fn is_triggered_by(&self, price: Decimal) -> bool {
        match self.direction {
            AlertDirection::Above => price >= self.target_price,
            AlertDirection::Under => price <= self.target_price,
        }
    }
}
