//! Maintenance pass that purges long-crashed tokens.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    data::{AlertRepository, HistoryRepository, TokenRepository},
    error::AppError,
    model::token::SimulatedToken,
};

/// Outcome of one cleanup pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub purged: usize,
    pub failed: usize,
}

/// Permanently deletes tokens that crashed more than a grace period ago.
pub struct CrashCleanup {
    tokens: Arc<dyn TokenRepository>,
    alerts: Arc<dyn AlertRepository>,
    history: Arc<dyn HistoryRepository>,
    grace_period: Duration,
}

impl CrashCleanup {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        alerts: Arc<dyn AlertRepository>,
        history: Arc<dyn HistoryRepository>,
        grace_period: Duration,
    ) -> Self {
        Self {
            tokens,
            alerts,
            history,
            grace_period,
        }
    }

    /// Purges every token crashed before `now - grace_period`.
    ///
    /// Each token is purged independently; a failure is logged and the pass moves
    /// on to the next token.
    ///
    /// # Returns
    /// - `Ok(CleanupReport)` - Purged and failed token counts
    /// - `Err(AppError)` - The crashed tokens could not be listed
    pub async fn purge(&self, now: DateTime<Utc>) -> Result<CleanupReport, AppError> {
        let cutoff = now - self.grace_period;
        let expired = self.tokens.list_crashed_before(cutoff).await?;

        let mut report = CleanupReport::default();
        for token in &expired {
            match self.purge_token(token).await {
                Ok(()) => {
                    report.purged += 1;
                    tracing::info!("Purged crashed token {}", token.symbol);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("Failed to purge crashed token {}: {}", token.symbol, e);
                }
            }
        }

        Ok(report)
    }

    async fn purge_token(&self, token: &SimulatedToken) -> Result<(), AppError> {
        for alert in self.alerts.find_by_token(token.id).await? {
            self.alerts.delete(alert.id).await?;
        }

        let history = self.history.delete_for_token(token.id).await?;
        tracing::debug!(
            "Deleted {} history entries of token {}",
            history,
            token.symbol
        );

        self.tokens.delete(token.id).await
    }
}
