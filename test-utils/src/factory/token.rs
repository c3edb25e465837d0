//! Token factory for creating test token entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tokens with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::token::TokenFactory;
///
/// let token = TokenFactory::new(&db)
///     .symbol("PEPE")
///     .price("0.0003")
///     .build()
///     .await?;
/// ```
pub struct TokenFactory<'a> {
    db: &'a DatabaseConnection,
    symbol: String,
    name: String,
    total_supply: String,
    available_supply: String,
    price: String,
    is_simulated: bool,
    crashed_at: Option<DateTime<Utc>>,
}

impl<'a> TokenFactory<'a> {
    /// Creates a new TokenFactory with default values.
    ///
    /// Defaults:
    /// - symbol: `"TKN{id}"` where id is auto-incremented
    /// - name: `"Token {id}"`
    /// - supplies: `"1000000"`
    /// - price: `"0.5"`
    /// - is_simulated: `true`
    /// - crashed_at: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            symbol: format!("TKN{}", id),
            name: format!("Token {}", id),
            total_supply: "1000000".to_string(),
            available_supply: "1000000".to_string(),
            price: "0.5".to_string(),
            is_simulated: true,
            crashed_at: None,
        }
    }

    /// Sets the unique token symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the price per unit as a decimal string.
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Sets whether the engine simulates this token.
    pub fn simulated(mut self, is_simulated: bool) -> Self {
        self.is_simulated = is_simulated;
        self
    }

    /// Marks the token as crashed at the given time, forcing its price to zero.
    pub fn crashed_at(mut self, crashed_at: DateTime<Utc>) -> Self {
        self.crashed_at = Some(crashed_at);
        self.price = "0".to_string();
        self
    }

    /// Builds and inserts the token entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::token::Model)` - Created token entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::token::Model, DbErr> {
        entity::token::ActiveModel {
            symbol: ActiveValue::Set(self.symbol),
            name: ActiveValue::Set(self.name),
            total_supply: ActiveValue::Set(self.total_supply),
            available_supply: ActiveValue::Set(self.available_supply),
            price_per_unit: ActiveValue::Set(self.price),
            is_simulated: ActiveValue::Set(self.is_simulated),
            crashed_at: ActiveValue::Set(self.crashed_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a simulated token with default values.
///
/// Shorthand for `TokenFactory::new(db).build().await`.
pub async fn create_token(db: &DatabaseConnection) -> Result<entity::token::Model, DbErr> {
    TokenFactory::new(db).build().await
}

/// Creates a simulated token with the given symbol and price.
///
/// # Arguments
/// - `db` - Database connection
/// - `symbol` - Unique token symbol
/// - `price` - Price per unit as a decimal string
pub async fn create_token_with_price(
    db: &DatabaseConnection,
    symbol: impl Into<String>,
    price: impl Into<String>,
) -> Result<entity::token::Model, DbErr> {
    TokenFactory::new(db).symbol(symbol).price(price).build().await
}
