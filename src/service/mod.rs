//! Service layer for the simulation and its side effects.
//!
//! Services sit between the scheduler and the data (repository) layer:
//!
//! - **memecoin**: the per-tick price pipeline and the crashed-token maintenance pass
//! - **notification**: delivery of owner notices and public announcements
//! - **event_bus**: in-process broadcast of live market events

pub mod event_bus;
pub mod memecoin;
pub mod notification;
