//! Error types for the memecoin engine.
//!
//! `AppError` is the top-level error type that wraps the domain-specific errors.
//! Per-item failures (one token, one alert, one recipient) are caught and logged
//! by the services at the smallest scope; only configuration errors and a failure
//! to load the active-token list travel further up.

pub mod config;
pub mod delivery;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, delivery::DeliveryError, internal::InternalError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion so repository and
/// service code can propagate with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Raised before the scheduler starts; the process exits instead of running
    /// with a half-valid configuration.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Stored data could not be decoded into the domain model.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// A notification could not be delivered.
    #[error(transparent)]
    DeliveryErr(#[from] DeliveryError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
