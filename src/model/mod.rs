//! Domain models for the memecoin engine.
//!
//! These models sit between the data layer and the services. Entity models are
//! converted at the repository boundary (decoding the stored decimal strings)
//! so that services only ever see typed prices, directions and granularities.

pub mod alert;
pub mod event;
pub mod history;
pub mod token;
pub mod volatility;
