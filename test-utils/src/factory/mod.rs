//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let token = factory::create_token(&db).await?;
//!     let alert = factory::create_alert(&db, &token.symbol, "10", "above").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let token = factory::token::TokenFactory::new(&db)
//!     .symbol("DOGE")
//!     .price("0.002")
//!     .build()
//!     .await?;
//!
//! factory::token_history::create_minute_series(&db, token.id, 121, Utc::now()).await?;
//! ```
//!
//! # Available Factories
//!
//! - `token` - Create token entities
//! - `price_alert` - Create price alert entities
//! - `token_history` - Create history rows in any granularity table

pub mod helpers;
pub mod price_alert;
pub mod token;
pub mod token_history;

pub use price_alert::create_alert;
pub use token::create_token;
pub use token_history::create_history_entry;
