//! History factory for seeding token price history tables.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts one minute-granularity history row.
///
/// # Arguments
/// - `db` - Database connection
/// - `token_id` - Token the entry belongs to
/// - `price` - Recorded price as a decimal string
/// - `recorded_at` - Snapshot timestamp
pub async fn create_history_entry(
    db: &DatabaseConnection,
    token_id: i32,
    price: &str,
    recorded_at: DateTime<Utc>,
) -> Result<entity::token_history_minute::Model, DbErr> {
    entity::token_history_minute::ActiveModel {
        token_id: ActiveValue::Set(token_id),
        price: ActiveValue::Set(price.to_string()),
        recorded_at: ActiveValue::Set(recorded_at),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts one hour-granularity history row.
pub async fn create_hourly_entry(
    db: &DatabaseConnection,
    token_id: i32,
    price: &str,
    recorded_at: DateTime<Utc>,
) -> Result<entity::token_history_hour::Model, DbErr> {
    entity::token_history_hour::ActiveModel {
        token_id: ActiveValue::Set(token_id),
        price: ActiveValue::Set(price.to_string()),
        recorded_at: ActiveValue::Set(recorded_at),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts `count` minute rows, one minute apart, ending at `end`.
///
/// The oldest row is recorded at `end - (count - 1) minutes` and carries the
/// price `"1"`; prices increase by one per row so tests can tell rows apart.
///
/// # Returns
/// - `Ok(Vec<Model>)` - Created rows, oldest first
/// - `Err(DbErr)` - Database error during insert
pub async fn create_minute_series(
    db: &DatabaseConnection,
    token_id: i32,
    count: u32,
    end: DateTime<Utc>,
) -> Result<Vec<entity::token_history_minute::Model>, DbErr> {
    let mut rows = Vec::with_capacity(count as usize);
    for i in 0..count {
        let recorded_at = end - Duration::minutes(i64::from(count - 1 - i));
        let price = (i + 1).to_string();
        rows.push(create_history_entry(db, token_id, &price, recorded_at).await?);
    }
    Ok(rows)
}
