//! # Timecard Core
//!
//! Types and traits for the ecosystem.
//!
//! Defines the protocol shared by the sync engine, clients and servers.
//!
//! - **[`PendingAction`](action::PendingAction)**: A start/stop toggle captured while offline, replayed in FIFO order.
//! - **[`IntervalRecord`](action::IntervalRecord)**: One tracked time interval as reported by the server; open while `end_time` is null.
//! - **[`QueueStore`](traits::QueueStore)**: Trait for implementing the durable pending-action queue.
//! - **[`StatusOracle`](traits::StatusOracle)**: Trait for the authoritative start/stop/status service.
//! - **[`AuthProvider`](traits::AuthProvider)**: Trait for implementing bearer-credential verification.

pub mod action;
pub mod claims;
pub mod constants;
pub mod error;
pub mod traits;

pub mod prelude {
    pub use super::action::*;
    pub use super::claims::*;
    pub use super::constants::*;
    pub use super::error::*;
    pub use super::traits::*;
}
