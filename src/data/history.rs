use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    data::HistoryRepository,
    error::AppError,
    model::history::{Granularity, HistoryEntry},
    util::parse::{format_decimal, parse_decimal},
};

/// Runs `$body` against the entity module of the table for `$granularity`.
///
/// The four history tables share one layout, so every query is written once with
/// `$table` standing in for `entity::token_history_<granularity>`.
macro_rules! with_history_table {
    ($granularity:expr, $table:ident => $body:expr) => {
        match $granularity {
            Granularity::Minute => {
                use entity::token_history_minute as $table;
                $body
            }
            Granularity::Hour => {
                use entity::token_history_hour as $table;
                $body
            }
            Granularity::Day => {
                use entity::token_history_day as $table;
                $body
            }
            Granularity::Week => {
                use entity::token_history_week as $table;
                $body
            }
        }
    };
}

/// SeaORM-backed history repository over the four granularity tables.
#[derive(Clone)]
pub struct TokenHistoryRepository {
    db: DatabaseConnection,
}

impl TokenHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all entries for a token in chronological order
    ///
    /// # Returns
    /// - `Ok(Vec<HistoryEntry>)`: Entries oldest first
    /// - `Err(AppError)`: Database error or undecodable stored price
    #[cfg(test)]
    pub async fn get_by_token(
        &self,
        granularity: Granularity,
        token_id: i32,
    ) -> Result<Vec<HistoryEntry>, AppError> {
        with_history_table!(granularity, table => {
            table::Entity::find()
                .filter(table::Column::TokenId.eq(token_id))
                .order_by_asc(table::Column::RecordedAt)
                .order_by_asc(table::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| to_entry(m.id, m.token_id, &m.price, m.recorded_at))
                .collect()
        })
    }
}

fn to_entry(
    id: i32,
    token_id: i32,
    price: &str,
    recorded_at: DateTime<Utc>,
) -> Result<HistoryEntry, AppError> {
    Ok(HistoryEntry {
        id,
        token_id,
        price: parse_decimal(price)?,
        recorded_at,
    })
}

#[async_trait]
impl HistoryRepository for TokenHistoryRepository {
    /// Appends a snapshot to a granularity table
    ///
    /// # Arguments
    /// - `granularity`: Table to write to
    /// - `token_id`: Token the snapshot belongs to
    /// - `price`: Price at snapshot time
    /// - `recorded_at`: Snapshot timestamp
    async fn insert(
        &self,
        granularity: Granularity,
        token_id: i32,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let price = format_decimal(price);

        with_history_table!(granularity, table => {
            table::ActiveModel {
                token_id: ActiveValue::Set(token_id),
                price: ActiveValue::Set(price),
                recorded_at: ActiveValue::Set(recorded_at),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;
        });

        Ok(())
    }

    /// Checks whether a snapshot was written inside the window ending at `now`
    ///
    /// # Returns
    /// - `Ok(true)`: At least one entry has `recorded_at >= now - within`
    /// - `Ok(false)`: No entry in the window
    /// - `Err(AppError)`: Database error
    async fn has_recent_entry(
        &self,
        granularity: Granularity,
        token_id: i32,
        within: Duration,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let since = now - within;

        let count = with_history_table!(granularity, table => {
            table::Entity::find()
                .filter(table::Column::TokenId.eq(token_id))
                .filter(table::Column::RecordedAt.gte(since))
                .count(&self.db)
                .await?
        });

        Ok(count > 0)
    }

    /// Gets the entry `offset` positions from the oldest
    ///
    /// Ties on `recorded_at` are broken by id so the order is stable.
    async fn oldest_entry(
        &self,
        granularity: Granularity,
        token_id: i32,
        offset: u64,
    ) -> Result<Option<HistoryEntry>, AppError> {
        with_history_table!(granularity, table => {
            table::Entity::find()
                .filter(table::Column::TokenId.eq(token_id))
                .order_by_asc(table::Column::RecordedAt)
                .order_by_asc(table::Column::Id)
                .offset(offset)
                .one(&self.db)
                .await?
                .map(|m| to_entry(m.id, m.token_id, &m.price, m.recorded_at))
                .transpose()
        })
    }

    async fn count(&self, granularity: Granularity, token_id: i32) -> Result<u64, AppError> {
        let count = with_history_table!(granularity, table => {
            table::Entity::find()
                .filter(table::Column::TokenId.eq(token_id))
                .count(&self.db)
                .await?
        });

        Ok(count)
    }

    /// Deletes the oldest entries of a token
    ///
    /// Selects the ids of the `count` oldest rows (by `recorded_at`, then id) and
    /// deletes exactly those, never an arbitrary subset.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of entries deleted
    /// - `Err(AppError)`: Database error
    async fn delete_oldest(
        &self,
        granularity: Granularity,
        token_id: i32,
        count: u64,
    ) -> Result<u64, AppError> {
        if count == 0 {
            return Ok(0);
        }

        let deleted = with_history_table!(granularity, table => {
            let ids: Vec<i32> = table::Entity::find()
                .select_only()
                .column(table::Column::Id)
                .filter(table::Column::TokenId.eq(token_id))
                .order_by_asc(table::Column::RecordedAt)
                .order_by_asc(table::Column::Id)
                .limit(count)
                .into_tuple()
                .all(&self.db)
                .await?;

            if ids.is_empty() {
                0
            } else {
                table::Entity::delete_many()
                    .filter(table::Column::Id.is_in(ids))
                    .exec(&self.db)
                    .await?
                    .rows_affected
            }
        });

        Ok(deleted)
    }

    /// Deletes a token's history in every granularity
    ///
    /// # Returns
    /// - `Ok(u64)`: Total number of entries deleted across all tables
    /// - `Err(AppError)`: Database error
    async fn delete_for_token(&self, token_id: i32) -> Result<u64, AppError> {
        let mut deleted = 0;

        for granularity in Granularity::ALL {
            deleted += with_history_table!(granularity, table => {
                table::Entity::delete_many()
                    .filter(table::Column::TokenId.eq(token_id))
                    .exec(&self.db)
                    .await?
                    .rows_affected
            });
        }

        Ok(deleted)
    }
}
