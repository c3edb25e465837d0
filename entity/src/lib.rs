//! SeaORM entity models for the memecoin engine tables.
//!
//! Prices and supplies are stored as exact decimal strings; the application
//! decodes them into `rust_decimal::Decimal` at the data layer boundary.
//! History is kept in four parallel tables, one per rollup granularity.

pub mod prelude;

pub mod price_alert;
pub mod token;
pub mod token_history_day;
pub mod token_history_hour;
pub mod token_history_minute;
pub mod token_history_week;
