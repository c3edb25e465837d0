//! Price alert matching and fire-once delivery.

use std::{sync::Arc, time::Duration};

use rust_decimal::Decimal;

use crate::{
    data::AlertRepository,
    error::AppError,
    model::alert::PriceAlert,
    service::notification::{NotificationDispatcher, OwnerNotice},
};

/// Fires the alerts a new price satisfies.
pub struct AlertEvaluator {
    alerts: Arc<dyn AlertRepository>,
    notifier: Arc<dyn NotificationDispatcher>,
    notify_delay: Duration,
}

impl AlertEvaluator {
    pub fn new(
        alerts: Arc<dyn AlertRepository>,
        notifier: Arc<dyn NotificationDispatcher>,
        notify_delay: Duration,
    ) -> Self {
        Self {
            alerts,
            notifier,
            notify_delay,
        }
    }

    /// Notifies and deletes every alert on `symbol` triggered by `price`.
    ///
    /// Alerts are handled one at a time with `notify_delay` between sends. Each
    /// alert is deleted after its notice whether or not delivery succeeded, so an
    /// owner is never notified twice for the same alert.
    ///
    /// # Returns
    /// - `Ok(Vec<PriceAlert>)` - The alerts that fired
    /// - `Err(AppError)` - The alerts could not be loaded
    pub async fn evaluate(
        &self,
        symbol: &str,
        price: Decimal,
    ) -> Result<Vec<PriceAlert>, AppError> {
        let fired: Vec<PriceAlert> = self
            .alerts
            .find_by_symbol(symbol)
            .await?
            .into_iter()
            .filter(|alert| alert.is_triggered_by(price))
            .collect();

        for (i, alert) in fired.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.notify_delay).await;
            }

            let notice = OwnerNotice::AlertTriggered {
                symbol: symbol.to_string(),
                price,
                direction: alert.direction,
                target: alert.target_price,
            };
            if let Err(e) = self.notifier.notify_owner(&alert.owner_id, &notice).await {
                tracing::warn!(
                    "Failed to notify owner {} of alert {}: {}",
                    alert.owner_id,
                    alert.id,
                    e
                );
            }

            if let Err(e) = self.alerts.delete(alert.id).await {
                tracing::warn!("Failed to delete fired alert {}: {}", alert.id, e);
            }
        }

        Ok(fired)
    }
}
