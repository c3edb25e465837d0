//! Engine tests against in-memory SQLite repositories and a recording notifier.

use std::{
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, DbErr};
use test_utils::{
    builder::TestBuilder,
    factory::{self, price_alert::PriceAlertFactory, token::TokenFactory},
};

use crate::{
    config::EngineConfig,
    data::{
        AlertRepository, HistoryRepository, PriceAlertRepository, SimulatedTokenRepository,
        TokenHistoryRepository, TokenRepository,
    },
    error::{delivery::DeliveryError, AppError},
    model::{
        alert::PriceAlert,
        event::{CrashEvent, PriceUpdate},
        history::{Granularity, HistoryEntry},
        token::SimulatedToken,
    },
    service::notification::{NotificationDispatcher, OwnerNotice},
};

use super::MemecoinEngine;


/// Notifier that records everything it is asked to deliver.
#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<(String, OwnerNotice)>>,
    crashes: Mutex<Vec<CrashEvent>>,
    updates: Mutex<Vec<PriceUpdate>>,
    /// Owner whose notices fail as unreachable.
    unreachable_owner: Option<String>,
}

impl RecordingNotifier {
    fn unreachable(owner_id: &str) -> Self {
        Self {
            unreachable_owner: Some(owner_id.to_string()),
            ..Default::default()
        }
    }

    fn notices(&self) -> Vec<(String, OwnerNotice)> {
        self.notices.lock().unwrap().clone()
    }

    fn crashes(&self) -> Vec<CrashEvent> {
        self.crashes.lock().unwrap().clone()
    }

    fn updates(&self) -> Vec<PriceUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotifier {
    async fn notify_owner(
        &self,
        owner_id: &str,
        notice: &OwnerNotice,
    ) -> Result<(), DeliveryError> {
        if self.unreachable_owner.as_deref() == Some(owner_id) {
            return Err(DeliveryError::Unreachable {
                recipient: owner_id.to_string(),
                reason: "DMs closed".to_string(),
            });
        }
        self.notices
            .lock()
            .unwrap()
            .push((owner_id.to_string(), notice.clone()));
        Ok(())
    }

    async fn publish_crash(&self, event: &CrashEvent) -> Result<(), DeliveryError> {
        self.crashes.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn publish_price_update(&self, update: &PriceUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }
}

/// Token repository that injects failures around a real one.
struct FailingTokenRepository {
    inner: SimulatedTokenRepository,
    fail_list: bool,
    fail_update_for: Option<i32>,
}

#[async_trait]
impl TokenRepository for FailingTokenRepository {
    async fn list_active_simulated(&self) -> Result<Vec<SimulatedToken>, AppError> {
        if self.fail_list {
            return Err(AppError::DbErr(DbErr::Custom("connection lost".to_string())));
        }
        self.inner.list_active_simulated().await
    }

    async fn update_price(&self, id: i32, price: Decimal) -> Result<(), AppError> {
        if self.fail_update_for == Some(id) {
            return Err(AppError::DbErr(DbErr::Custom("write failed".to_string())));
        }
        self.inner.update_price(id, price).await
    }

    async fn crash(&self, id: i32, at: DateTime<Utc>) -> Result<bool, AppError> {
        self.inner.crash(id, at).await
    }

    async fn get(&self, id: i32) -> Result<Option<SimulatedToken>, AppError> {
        self.inner.get(id).await
    }

    async fn list_crashed_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SimulatedToken>, AppError> {
        self.inner.list_crashed_before(cutoff).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

/// Alert repository whose lookups fail on demand.
struct FailingAlertRepository {
    inner: PriceAlertRepository,
    fail_lookup: bool,
}

#[async_trait]
impl AlertRepository for FailingAlertRepository {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Vec<PriceAlert>, AppError> {
        if self.fail_lookup {
            return Err(AppError::DbErr(DbErr::Custom("alerts unavailable".to_string())));
        }
        self.inner.find_by_symbol(symbol).await
    }

    async fn find_by_token(&self, token_id: i32) -> Result<Vec<PriceAlert>, AppError> {
        self.inner.find_by_token(token_id).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.inner.delete(id).await
    }

    async fn delete_all_by_symbol(&self, symbol: &str) -> Result<u64, AppError> {
        self.inner.delete_all_by_symbol(symbol).await
    }
}

/// History repository whose per-token purge fails for one token.
struct FailingHistoryRepository {
    inner: TokenHistoryRepository,
    fail_purge_for: Option<i32>,
}

#[async_trait]
impl HistoryRepository for FailingHistoryRepository {
    async fn insert(
        &self,
        granularity: Granularity,
        token_id: i32,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.inner
            .insert(granularity, token_id, price, recorded_at)
            .await
    }

    async fn has_recent_entry(
        &self,
        granularity: Granularity,
        token_id: i32,
        within: Duration,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        self.inner
            .has_recent_entry(granularity, token_id, within, now)
            .await
    }

    async fn oldest_entry(
        &self,
        granularity: Granularity,
        token_id: i32,
        offset: u64,
    ) -> Result<Option<HistoryEntry>, AppError> {
        self.inner.oldest_entry(granularity, token_id, offset).await
    }

    async fn count(&self, granularity: Granularity, token_id: i32) -> Result<u64, AppError> {
        self.inner.count(granularity, token_id).await
    }

    async fn delete_oldest(
        &self,
        granularity: Granularity,
        token_id: i32,
        count: u64,
    ) -> Result<u64, AppError> {
        self.inner.delete_oldest(granularity, token_id, count).await
    }

    async fn delete_for_token(&self, token_id: i32) -> Result<u64, AppError> {
        if self.fail_purge_for == Some(token_id) {
            return Err(AppError::DbErr(DbErr::Custom("table locked".to_string())));
        }
        self.inner.delete_for_token(token_id).await
    }
}

/// Engine configuration used by the tests: no delay between notices.
fn test_config() -> EngineConfig {
    EngineConfig {
        upward_bias: 0.6,
        alert_notify_delay: StdDuration::ZERO,
        ..EngineConfig::default()
    }
}

/// Builds an engine over SQLite repositories sharing `db`.
fn build_engine(
    db: &DatabaseConnection,
    notifier: Arc<RecordingNotifier>,
    config: EngineConfig,
) -> MemecoinEngine {
    build_engine_with_tokens(
        db,
        Arc::new(SimulatedTokenRepository::new(db.clone())),
        notifier,
        config,
    )
}

fn build_engine_with_tokens(
    db: &DatabaseConnection,
    tokens: Arc<dyn TokenRepository>,
    notifier: Arc<RecordingNotifier>,
    config: EngineConfig,
) -> MemecoinEngine {
    MemecoinEngine::new(
        tokens,
        Arc::new(PriceAlertRepository::new(db.clone())),
        Arc::new(TokenHistoryRepository::new(db.clone())),
        notifier,
        config,
    )
    .with_seed(42)
}

fn build_engine_with_alerts(
    db: &DatabaseConnection,
    alerts: Arc<dyn AlertRepository>,
    notifier: Arc<RecordingNotifier>,
    config: EngineConfig,
) -> MemecoinEngine {
    MemecoinEngine::new(
        Arc::new(SimulatedTokenRepository::new(db.clone())),
        alerts,
        Arc::new(TokenHistoryRepository::new(db.clone())),
        notifier,
        config,
    )
    .with_seed(42)
}
