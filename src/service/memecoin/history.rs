//! Price history snapshots and minute-table retention.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    config::EngineConfig, data::HistoryRepository, error::AppError,
    model::history::Granularity,
};

/// Writes per-tick snapshots and keeps the minute table bounded.
pub struct HistoryRetention {
    history: Arc<dyn HistoryRepository>,
    max_entries: u64,
    batch_size: u64,
    /// Dedup window per rollup granularity.
    rollups: [(Granularity, Duration); 3],
}

impl HistoryRetention {
    pub fn new(history: Arc<dyn HistoryRepository>, config: &EngineConfig) -> Self {
        Self {
            history,
            max_entries: config.max_history_entries,
            batch_size: config.history_trim_batch_size,
            rollups: [
                (Granularity::Hour, config.hourly_dedup),
                (Granularity::Day, config.daily_dedup),
                (Granularity::Week, config.weekly_dedup),
            ],
        }
    }

    /// Records a token's price for this tick.
    ///
    /// Always appends a minute entry. Hour, day and week entries are appended only
    /// when the token has none recorded inside the granularity's dedup window.
    ///
    /// # Returns
    /// - `Ok(())` - Snapshots written
    /// - `Err(AppError)` - Database error
    pub async fn record(
        &self,
        token_id: i32,
        price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.history
            .insert(Granularity::Minute, token_id, price, now)
            .await?;

        for (granularity, window) in self.rollups {
            if self
                .history
                .has_recent_entry(granularity, token_id, window, now)
                .await?
            {
                continue;
            }

            self.history
                .insert(granularity, token_id, price, now)
                .await?;
            tracing::debug!("Wrote {} snapshot for token {}", granularity, token_id);
        }

        Ok(())
    }

    /// Trims a token's minute history back to the retention cap.
    ///
    /// Nothing happens until the table holds `max_entries + batch_size` rows, so
    /// deletes run in batches rather than every tick. A trim removes the oldest
    /// rows down to exactly `max_entries`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted (0 when below the trigger)
    /// - `Err(AppError)` - Database error
    pub async fn trim(&self, token_id: i32) -> Result<u64, AppError> {
        let trigger_offset = self.max_entries + self.batch_size - 1;
        if self
            .history
            .oldest_entry(Granularity::Minute, token_id, trigger_offset)
            .await?
            .is_none()
        {
            return Ok(0);
        }

        let count = self.history.count(Granularity::Minute, token_id).await?;
        let excess = count.saturating_sub(self.max_entries);

        let deleted = self
            .history
            .delete_oldest(Granularity::Minute, token_id, excess)
            .await?;
        tracing::debug!(
            "Trimmed {} minute entries for token {} ({} remain)",
            deleted,
            token_id,
            count - deleted
        );

        Ok(deleted)
    }
}
