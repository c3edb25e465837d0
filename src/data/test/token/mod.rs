use crate::data::{SimulatedTokenRepository, TokenRepository};
use crate::error::AppError;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, token::TokenFactory},
};

mod crash;
mod list_active_simulated;
mod list_crashed_before;
mod update_price;
