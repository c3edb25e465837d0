use crate::data::{HistoryRepository, TokenHistoryRepository};
use crate::model::history::Granularity;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_oldest;
mod has_recent_entry;
mod insert;
