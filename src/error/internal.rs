use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a stored decimal column
    ///
    /// Prices and supplies are persisted as exact decimal strings; a value that
    /// does not parse means the row was written by something other than this
    /// engine or its collaborators.
    #[error("Failed to parse decimal from String '{value}': {source}")]
    ParseDecimal {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: rust_decimal::Error,
    },

    /// Stored alert direction is neither `above` nor `under`
    #[error("Unknown alert direction '{0}'")]
    UnknownDirection(String),

    /// Requested history granularity does not exist
    #[error("Unknown history granularity '{0}'")]
    UnknownGranularity(String),
}
