//! Market events emitted by the engine.
//!
//! Every persisted price change that is visible at display precision emits a
//! [`PriceUpdate`], and every crash emits a [`CrashEvent`]. Both are broadcast
//! on the [`crate::service::event_bus::EventBus`] as a [`MarketEvent`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A simulated price move that is visible at display precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceUpdate {
    pub token_id: i32,
    pub symbol: String,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// A token's transition into the crashed state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashEvent {
    pub token_id: i32,
    pub symbol: String,
    pub name: String,
    /// Price the token held when it was found below the crash threshold.
    pub last_price: Decimal,
    pub crashed_at: DateTime<Utc>,
    /// Number of alerts voided by the crash.
    pub cancelled_alerts: u64,
}

/// Event published to live subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MarketEvent {
    PriceUpdated(PriceUpdate),
    TokenCrashed(CrashEvent),
}

impl MarketEvent {
    /// Returns the token this event concerns.
    pub fn token_id(&self) -> i32 {
        match self {
            Self::PriceUpdated(update) => update.token_id,
            Self::TokenCrashed(crash) => crash.token_id,
        }
    }

    /// Returns the event type as a static string slice.
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PriceUpdated(_) => "price_updated",
            Self::TokenCrashed(_) => "token_crashed",
        }
    }
}
