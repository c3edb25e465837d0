//! Crash transition for tokens that fall below the crash threshold.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    data::{AlertRepository, TokenRepository},
    error::AppError,
    model::{event::CrashEvent, token::SimulatedToken},
    service::notification::{NotificationDispatcher, OwnerNotice},
};

/// Whether a token at `price` must crash this tick.
pub fn should_crash(price: Decimal, crash_threshold: Decimal) -> bool {
    price < crash_threshold
}

/// Moves tokens into the crashed state and resolves their alerts.
pub struct CrashPolicy {
    tokens: Arc<dyn TokenRepository>,
    alerts: Arc<dyn AlertRepository>,
    notifier: Arc<dyn NotificationDispatcher>,
    notify_delay: Duration,
}

impl CrashPolicy {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        alerts: Arc<dyn AlertRepository>,
        notifier: Arc<dyn NotificationDispatcher>,
        notify_delay: Duration,
    ) -> Self {
        Self {
            tokens,
            alerts,
            notifier,
            notify_delay,
        }
    }

    /// Crashes a token and carries out the side effects of the transition.
    ///
    /// Zeroes the price and stamps `crashed_at`, tells every alert holder on the
    /// symbol that their alert is void, deletes those alerts, then publishes one
    /// crash announcement. Notice, alert deletion and announcement failures are
    /// logged and do not stop the remaining steps.
    ///
    /// # Arguments
    /// - `token` - Token found below the crash threshold
    /// - `now` - Crash timestamp
    ///
    /// # Returns
    /// - `Ok(Some(CrashEvent))` - Token crashed by this call
    /// - `Ok(None)` - Token was already crashed or no longer exists; nothing was done
    /// - `Err(AppError)` - The crash itself could not be persisted
    pub async fn apply(
        &self,
        token: &SimulatedToken,
        now: DateTime<Utc>,
    ) -> Result<Option<CrashEvent>, AppError> {
        if !self.tokens.crash(token.id, now).await? {
            tracing::debug!("Token {} already crashed, skipping", token.symbol);
            return Ok(None);
        }

        tracing::info!(
            "Token {} crashed at price {}",
            token.symbol,
            token.price_per_unit
        );

        let alerts = match self.alerts.find_by_symbol(&token.symbol).await {
            Ok(alerts) => alerts,
            Err(e) => {
                tracing::warn!(
                    "Failed to load alerts for crashed token {}: {}",
                    token.symbol,
                    e
                );
                Vec::new()
            }
        };

        let notice = OwnerNotice::AlertCancelled {
            symbol: token.symbol.clone(),
        };
        for (i, alert) in alerts.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.notify_delay).await;
            }
            if let Err(e) = self.notifier.notify_owner(&alert.owner_id, &notice).await {
                tracing::warn!(
                    "Failed to notify owner {} of cancelled alert {}: {}",
                    alert.owner_id,
                    alert.id,
                    e
                );
            }
        }

        let cancelled_alerts = match self.alerts.delete_all_by_symbol(&token.symbol).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(
                    "Failed to delete alerts for crashed token {}: {}",
                    token.symbol,
                    e
                );
                0
            }
        };

        let event = CrashEvent {
            token_id: token.id,
            symbol: token.symbol.clone(),
            name: token.name.clone(),
            last_price: token.price_per_unit,
            crashed_at: now,
            cancelled_alerts,
        };

        if let Err(e) = self.notifier.publish_crash(&event).await {
            tracing::warn!("Failed to announce crash of {}: {}", token.symbol, e);
        }

        Ok(Some(event))
    }
}
