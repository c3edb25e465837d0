//! Database repository layer for the memecoin engine.
//!
//! The engine depends on three narrow storage contracts, declared here as traits so
//! the services never see SeaORM types. Each trait has one SeaORM-backed repository
//! that converts entity models to domain models at this boundary. Clock values are
//! passed in by the caller so time-window logic stays deterministic under test.

pub mod history;
pub mod price_alert;
pub mod token;

#[cfg(test)]
mod test;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    error::AppError,
    model::{
        alert::PriceAlert,
        history::{Granularity, HistoryEntry},
        token::SimulatedToken,
    },
};

pub use history::TokenHistoryRepository;
pub use price_alert::PriceAlertRepository;
pub use token::SimulatedTokenRepository;

/// Storage of token price and crash state.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Simulated tokens that have not crashed, in id order.
    async fn list_active_simulated(&self) -> Result<Vec<SimulatedToken>, AppError>;

    async fn update_price(&self, id: i32, price: Decimal) -> Result<(), AppError>;

    /// Forces the price to zero and stamps `crashed_at`.
    ///
    /// Returns `false` when no row was updated.
    async fn crash(&self, id: i32, at: DateTime<Utc>) -> Result<bool, AppError>;

    async fn get(&self, id: i32) -> Result<Option<SimulatedToken>, AppError>;

    /// Crashed tokens whose `crashed_at` is strictly before `cutoff`.
    async fn list_crashed_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SimulatedToken>, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Storage of user price alerts, keyed by token symbol.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Vec<PriceAlert>, AppError>;

    /// Alerts on the symbol of the token with the given id.
    async fn find_by_token(&self, token_id: i32) -> Result<Vec<PriceAlert>, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Deletes every alert on `symbol`, returning how many were removed.
    async fn delete_all_by_symbol(&self, symbol: &str) -> Result<u64, AppError>;
}

/// Storage of per-token price snapshots in four granularity tables.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn insert(
        &self,
        granularity: Granularity,
        token_id: i32,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Whether an entry exists recorded at or after `now - within`.
    async fn has_recent_entry(
        &self,
        granularity: Granularity,
        token_id: i32,
        within: Duration,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// The entry at position `offset` in oldest-first order, if any.
    async fn oldest_entry(
        &self,
        granularity: Granularity,
        token_id: i32,
        offset: u64,
    ) -> Result<Option<HistoryEntry>, AppError>;

    async fn count(&self, granularity: Granularity, token_id: i32) -> Result<u64, AppError>;

    /// Deletes up to `count` of the oldest entries, returning how many were removed.
    async fn delete_oldest(
        &self,
        granularity: Granularity,
        token_id: i32,
        count: u64,
    ) -> Result<u64, AppError>;

    /// Deletes the token's entries in every granularity.
    async fn delete_for_token(&self, token_id: i32) -> Result<u64, AppError>;
}
