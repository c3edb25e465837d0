use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceAlert::Table)
                    .if_not_exists()
                    .col(pk_auto(PriceAlert::Id))
                    .col(string(PriceAlert::OwnerId))
                    .col(string(PriceAlert::TokenSymbol))
                    .col(string(PriceAlert::TargetPrice))
                    .col(string(PriceAlert::Direction))
                    .col(
                        timestamp(PriceAlert::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Alerts are always looked up by symbol
        manager
            .create_index(
                Index::create()
                    .name("idx_price_alert_token_symbol")
                    .table(PriceAlert::Table)
                    .col(PriceAlert::TokenSymbol)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_price_alert_token_symbol")
                    .table(PriceAlert::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PriceAlert::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PriceAlert {
    Table,
    Id,
    OwnerId,
    TokenSymbol,
    TargetPrice,
    Direction,
    CreatedAt,
}
