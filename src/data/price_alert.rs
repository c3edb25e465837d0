use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{data::AlertRepository, error::AppError, model::alert::PriceAlert};

/// SeaORM-backed price alert repository.
#[derive(Clone)]
pub struct PriceAlertRepository {
    db: DatabaseConnection,
}

impl PriceAlertRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlertRepository for PriceAlertRepository {
    /// Gets all alerts on a symbol
    ///
    /// Rows that fail to decode are logged and left out of the result.
    ///
    /// # Returns
    /// - `Ok(Vec<PriceAlert>)`: Decodable alerts in creation order
    /// - `Err(AppError)`: Database error
    async fn find_by_symbol(&self, symbol: &str) -> Result<Vec<PriceAlert>, AppError> {
        let models = entity::prelude::PriceAlert::find()
            .filter(entity::price_alert::Column::TokenSymbol.eq(symbol))
            .order_by_asc(entity::price_alert::Column::Id)
            .all(&self.db)
            .await?;

        let mut alerts = Vec::with_capacity(models.len());
        for model in models {
            let id = model.id;
            match PriceAlert::from_entity(model) {
                Ok(alert) => alerts.push(alert),
                Err(e) => tracing::warn!("Skipping undecodable price alert {}: {}", id, e),
            }
        }

        Ok(alerts)
    }

    /// Gets all alerts on the symbol of a token
    ///
    /// # Returns
    /// - `Ok(Vec<PriceAlert>)`: Alerts on the token's symbol, empty if the token is gone
    /// - `Err(AppError)`: Database error
    async fn find_by_token(&self, token_id: i32) -> Result<Vec<PriceAlert>, AppError> {
        let Some(token) = entity::prelude::Token::find_by_id(token_id)
            .one(&self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        self.find_by_symbol(&token.symbol).await
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::PriceAlert::delete_by_id(id)
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Deletes all alerts on a symbol
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of alerts deleted
    /// - `Err(AppError)`: Database error
    async fn delete_all_by_symbol(&self, symbol: &str) -> Result<u64, AppError> {
        let result = entity::prelude::PriceAlert::delete_many()
            .filter(entity::price_alert::Column::TokenSymbol.eq(symbol))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
