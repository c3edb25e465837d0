use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub symbol: String,
    pub name: String,
    pub total_supply: String,
    pub available_supply: String,
    pub price_per_unit: String,
    pub is_simulated: bool,
    pub crashed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::token_history_minute::Entity")]
    TokenHistoryMinute,
    #[sea_orm(has_many = "super::token_history_hour::Entity")]
    TokenHistoryHour,
    #[sea_orm(has_many = "super::token_history_day::Entity")]
    TokenHistoryDay,
    #[sea_orm(has_many = "super::token_history_week::Entity")]
    TokenHistoryWeek,
}

impl Related<super::token_history_minute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenHistoryMinute.def()
    }
}

impl Related<super::token_history_hour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenHistoryHour.def()
    }
}

impl Related<super::token_history_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenHistoryDay.def()
    }
}

impl Related<super::token_history_week::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenHistoryWeek.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
