use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    data::TokenRepository, error::AppError, model::token::SimulatedToken,
    util::parse::format_decimal,
};

/// SeaORM-backed token repository.
///
/// Holds its own `DatabaseConnection` handle; clones share the same pool.
#[derive(Clone)]
pub struct SimulatedTokenRepository {
    db: DatabaseConnection,
}

impl SimulatedTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Converts token rows, logging and skipping the ones that fail to decode.
    fn to_domain(models: Vec<entity::token::Model>) -> Vec<SimulatedToken> {
        let mut tokens = Vec::with_capacity(models.len());
        for model in models {
            let symbol = model.symbol.clone();
            match SimulatedToken::from_entity(model) {
                Ok(token) => tokens.push(token),
                Err(e) => tracing::warn!("Skipping undecodable token {}: {}", symbol, e),
            }
        }
        tokens
    }
}

#[async_trait]
impl TokenRepository for SimulatedTokenRepository {
    /// Gets all simulated tokens that have not crashed
    ///
    /// # Returns
    /// - `Ok(Vec<SimulatedToken>)`: Decodable active tokens ordered by id
    /// - `Err(AppError)`: Database error
    async fn list_active_simulated(&self) -> Result<Vec<SimulatedToken>, AppError> {
        let models = entity::prelude::Token::find()
            .filter(entity::token::Column::IsSimulated.eq(true))
            .filter(entity::token::Column::CrashedAt.is_null())
            .order_by_asc(entity::token::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Self::to_domain(models))
    }

    /// Stores a new price for a token
    ///
    /// # Arguments
    /// - `id`: ID of the token
    /// - `price`: New price, stored as an exact decimal string
    async fn update_price(&self, id: i32, price: Decimal) -> Result<(), AppError> {
        let result = entity::prelude::Token::update_many()
            .col_expr(
                entity::token::Column::PricePerUnit,
                Expr::value(format_decimal(price)),
            )
            .filter(entity::token::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Token {} not found", id)));
        }

        Ok(())
    }

    /// Moves a token into the crashed state
    ///
    /// Only updates tokens that are not already crashed, so a repeated call keeps
    /// the original `crashed_at`.
    ///
    /// # Returns
    /// - `Ok(true)`: Token was crashed by this call
    /// - `Ok(false)`: Token does not exist or had already crashed
    /// - `Err(AppError)`: Database error
    async fn crash(&self, id: i32, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = entity::prelude::Token::update_many()
            .col_expr(entity::token::Column::PricePerUnit, Expr::value("0"))
            .col_expr(entity::token::Column::CrashedAt, Expr::value(at))
            .filter(entity::token::Column::Id.eq(id))
            .filter(entity::token::Column::CrashedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn get(&self, id: i32) -> Result<Option<SimulatedToken>, AppError> {
        entity::prelude::Token::find_by_id(id)
            .one(&self.db)
            .await?
            .map(SimulatedToken::from_entity)
            .transpose()
    }

    /// Gets crashed tokens old enough to purge
    ///
    /// # Arguments
    /// - `cutoff`: Tokens crashed strictly before this instant are returned
    async fn list_crashed_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SimulatedToken>, AppError> {
        let models = entity::prelude::Token::find()
            .filter(entity::token::Column::CrashedAt.is_not_null())
            .filter(entity::token::Column::CrashedAt.lt(cutoff))
            .order_by_asc(entity::token::Column::CrashedAt)
            .all(&self.db)
            .await?;

        Ok(Self::to_domain(models))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::Token::delete_by_id(id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
