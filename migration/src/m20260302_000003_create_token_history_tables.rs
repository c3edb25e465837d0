use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_token_table::Token;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The four history tables share one layout and differ only by rollup granularity.
const HISTORY_TABLES: [&str; 4] = [
    "token_history_minute",
    "token_history_hour",
    "token_history_day",
    "token_history_week",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in HISTORY_TABLES {
            manager
                .create_table(
                    Table::create()
                        .table(Alias::new(table))
                        .if_not_exists()
                        .col(pk_auto(TokenHistory::Id))
                        .col(integer(TokenHistory::TokenId))
                        .col(string(TokenHistory::Price))
                        .col(timestamp(TokenHistory::RecordedAt).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{table}_token_id"))
                                .from(Alias::new(table), TokenHistory::TokenId)
                                .to(Token::Table, Token::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Retention and dedup both scan a token's rows in time order
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{table}_token_recorded"))
                        .table(Alias::new(table))
                        .col(TokenHistory::TokenId)
                        .col(TokenHistory::RecordedAt)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in HISTORY_TABLES.iter().rev() {
            manager
                .drop_index(
                    Index::drop()
                        .name(format!("idx_{table}_token_recorded"))
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;

            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TokenHistory {
    Id,
    TokenId,
    Price,
    RecordedAt,
}
