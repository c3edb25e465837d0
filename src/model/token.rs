//! Simulated token model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{error::AppError, util::parse::parse_decimal};

/// A tradable token as seen by the engine.
///
/// Only tokens with `is_simulated` set are mutated by the engine. A token is
/// crashed exactly when `crashed_at` is set, at which point its price is zero
/// and it no longer appears in the active-token query.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedToken {
    pub id: i32,
    /// Unique, human-facing symbol. Alerts are keyed by it.
    pub symbol: String,
    pub name: String,
    pub total_supply: Decimal,
    pub available_supply: Decimal,
    pub price_per_unit: Decimal,
    pub is_simulated: bool,
    pub crashed_at: Option<DateTime<Utc>>,
}

impl SimulatedToken {
    /// Converts an entity model to a token, decoding its stored decimals.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(SimulatedToken)` - The converted token
    /// - `Err(AppError::InternalErr)` - A stored decimal column failed to parse
    pub fn from_entity(entity: entity::token::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            total_supply: parse_decimal(&entity.total_supply)?,
            available_supply: parse_decimal(&entity.available_supply)?,
            price_per_unit: parse_decimal(&entity.price_per_unit)?,
            symbol: entity.symbol,
            name: entity.name,
            is_simulated: entity.is_simulated,
            crashed_at: entity.crashed_at,
        })
    }

    #[cfg(test)]
    pub fn is_crashed(&self) -> bool {
        self.crashed_at.is_some()
    }
}
