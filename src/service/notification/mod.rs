//! Outbound notifications.
//!
//! The engine talks to the outside world only through [`NotificationDispatcher`]:
//! direct notices to alert owners, a public crash announcement, and a
//! fire-and-forget price feed. [`discord::DiscordNotifier`] is the production
//! implementation.

pub mod discord;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    error::delivery::DeliveryError,
    model::{
        alert::AlertDirection,
        event::{CrashEvent, PriceUpdate},
    },
};

pub use discord::DiscordNotifier;

/// A message addressed to a single alert owner.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerNotice {
    /// The owner's alert matched the new price and has been consumed.
    AlertTriggered {
        symbol: String,
        price: Decimal,
        direction: AlertDirection,
        target: Decimal,
    },
    /// The owner's alert was voided because its token crashed.
    AlertCancelled { symbol: String },
}

impl OwnerNotice {
    pub fn title(&self) -> String {
        match self {
            Self::AlertTriggered { symbol, .. } => format!("{} price alert", symbol),
            Self::AlertCancelled { symbol } => format!("{} alert cancelled", symbol),
        }
    }

    /// Human-readable body of the notice.
    pub fn message(&self) -> String {
        match self {
            Self::AlertTriggered {
                symbol,
                price,
                direction,
                target,
            } => format!(
                "{} is now {}, your alert {} {} fired",
                symbol,
                price.normalize(),
                direction,
                target.normalize()
            ),
            Self::AlertCancelled { symbol } => format!(
                "Your {} alert was cancelled: the token crashed to 0",
                symbol
            ),
        }
    }
}

/// Delivery of engine notifications.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Sends a notice to one alert owner.
    ///
    /// # Returns
    /// - `Ok(())` - Notice delivered
    /// - `Err(DeliveryError)` - Recipient invalid or unreachable
    async fn notify_owner(&self, owner_id: &str, notice: &OwnerNotice)
        -> Result<(), DeliveryError>;

    /// Announces a crash publicly.
    async fn publish_crash(&self, event: &CrashEvent) -> Result<(), DeliveryError>;

    /// Broadcasts a visible price move. Never fails the caller.
    async fn publish_price_update(&self, update: &PriceUpdate);
}
