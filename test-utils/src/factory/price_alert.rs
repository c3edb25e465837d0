//! Price alert factory for creating test alert entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test price alerts with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let alert = PriceAlertFactory::new(&db, "PEPE")
///     .owner_id("123456789")
///     .target_price("10")
///     .direction("under")
///     .build()
///     .await?;
/// ```
pub struct PriceAlertFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: String,
    token_symbol: String,
    target_price: String,
    direction: String,
}

impl<'a> PriceAlertFactory<'a> {
    /// Creates a new PriceAlertFactory with default values.
    ///
    /// Defaults:
    /// - owner_id: auto-incremented numeric Discord id
    /// - target_price: `"1"`
    /// - direction: `"above"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `token_symbol` - Symbol of the token the alert watches
    pub fn new(db: &'a DatabaseConnection, token_symbol: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id: (100_000_000 + id).to_string(),
            token_symbol: token_symbol.into(),
            target_price: "1".to_string(),
            direction: "above".to_string(),
        }
    }

    /// Sets the owner (Discord user id) of the alert.
    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    /// Sets the target price as a decimal string.
    pub fn target_price(mut self, target_price: impl Into<String>) -> Self {
        self.target_price = target_price.into();
        self
    }

    /// Sets the direction (`"above"` or `"under"`).
    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Builds and inserts the alert entity into the database.
    pub async fn build(self) -> Result<entity::price_alert::Model, DbErr> {
        entity::price_alert::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            token_symbol: ActiveValue::Set(self.token_symbol),
            target_price: ActiveValue::Set(self.target_price),
            direction: ActiveValue::Set(self.direction),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an alert on `token_symbol` with the given target and direction.
///
/// # Arguments
/// - `db` - Database connection
/// - `token_symbol` - Symbol of the watched token
/// - `target_price` - Target price as a decimal string
/// - `direction` - `"above"` or `"under"`
pub async fn create_alert(
    db: &DatabaseConnection,
    token_symbol: &str,
    target_price: &str,
    direction: &str,
) -> Result<entity::price_alert::Model, DbErr> {
    PriceAlertFactory::new(db, token_symbol)
        .target_price(target_price)
        .direction(direction)
        .build()
        .await
}
