use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Token::Table)
                    .if_not_exists()
                    .col(pk_auto(Token::Id))
                    .col(string(Token::Symbol).unique_key())
                    .col(string(Token::Name))
                    .col(string(Token::TotalSupply))
                    .col(string(Token::AvailableSupply))
                    .col(string(Token::PricePerUnit))
                    .col(boolean(Token::IsSimulated).default(false))
                    .col(timestamp_null(Token::CrashedAt))
                    .col(
                        timestamp(Token::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The active-token query filters on both columns every tick
        manager
            .create_index(
                Index::create()
                    .name("idx_token_simulated_crashed")
                    .table(Token::Table)
                    .col(Token::IsSimulated)
                    .col(Token::CrashedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_token_simulated_crashed")
                    .table(Token::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Token::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Token {
    Table,
    Id,
    Symbol,
    Name,
    TotalSupply,
    AvailableSupply,
    PricePerUnit,
    IsSimulated,
    CrashedAt,
    CreatedAt,
}
