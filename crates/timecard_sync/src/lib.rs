//! # Timecard Sync
//!
//! The offline-tolerant time-tracking engine.
//!
//! A worker can toggle time tracking on a job even while the device has no
//! connectivity: the toggle flips the visible state optimistically and the
//! underlying start/stop command is appended to a durable queue. Once the
//! host signals that it is back online, the queue is drained against the
//! authoritative server in FIFO order and the visible state is re-synced
//! from the server's answer.
//!
//! - **[`Tracker`]**: per-job running state, optimistic toggles, and the
//!   guarded [`reconcile`](Tracker::reconcile) drain.
//! - **[`Connectivity`]**: wraps the host's online/offline signal; one event
//!   per offline-to-online transition.
//! - **[`StatusMessage`]**: transient human-readable feedback that
//!   self-clears after [`STATUS_TTL`].
//!
//! ## Example
//!
//! ```no_run
//! use timecard_sync::{Connectivity, Tracker};
//! use timecard_mock::{MemoryOracle, MemoryQueue};
//!
//! # async fn run() -> Result<(), timecard_sync::SyncError> {
//! let queue = MemoryQueue::new();
//! let oracle = MemoryOracle::new();
//! let connectivity = Connectivity::new(true);
//!
//! let tracker = Tracker::new(queue, oracle, connectivity);
//! let _reconciler = tracker.spawn_reconcile_loop();
//!
//! tracker.refresh("42").await?;
//! tracker.toggle("42").await?;
//! # Ok(())
//! # }
//! ```

pub mod connectivity;
pub mod status;
pub mod tracker;

mod error;

pub use connectivity::{Connectivity, ConnectivityEvents};
pub use error::SyncError;
pub use status::{STATUS_TTL, StatusMessage, StatusTone};
pub use tracker::{DrainReport, ReconcileOutcome, Tracker};

pub mod prelude {
    pub use super::connectivity::*;
    pub use super::error::*;
    pub use super::status::*;
    pub use super::tracker::*;
}
