use crate::data::{AlertRepository, PriceAlertRepository};
use crate::model::alert::AlertDirection;
use rust_decimal_macros::dec;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, price_alert::PriceAlertFactory},
};

mod find_by_symbol;
mod find_by_token;
