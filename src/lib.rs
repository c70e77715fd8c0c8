//! # ⏱️ Timecard
//!
//! An offline-tolerant time-tracking toolkit.
//!
//! Workers start and stop time against jobs even while the device has no
//! network connectivity: toggles flip the visible state optimistically, the
//! underlying commands queue durably, and the queue is reconciled against
//! the authoritative server once connectivity returns, without duplicating
//! or losing actions.
//!
//! This crate serves as an entry point, re-exporting the core types and the
//! sync engine, and optionally including the client, server, and queue
//! implementations via feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`server`** | Includes the Axum-based reference oracle server (`timecard_server`). |
//! | **`client`** | Includes the HTTP oracle client (`timecard_client`). |
//! | **`fs`** | Durable file-backed pending-action queue (`timecard_fs`). |
//! | **`mock`** | In-memory doubles for development and testing (`timecard_mock`). |
//!
//! ## Example: Offline-tolerant tracking
//!
//! ```toml
//! [dependencies]
//! timecard = { version = "0.1", features = ["client", "fs"] }
//! ```
//!
//! ```rust,ignore
//! use timecard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let queue = FileQueue::new("./timecard_data");
//!     let oracle = HttpOracle::new("http://localhost:3000", Some("my-token".into()));
//!     let connectivity = Connectivity::new(true);
//!
//!     let tracker = Tracker::new(queue, oracle, connectivity.clone());
//!     let _reconciler = tracker.spawn_reconcile_loop();
//!
//!     // Flip the toggle; offline flips are queued and replayed on reconnect.
//!     tracker.toggle("42").await.unwrap();
//!     connectivity.set_online(false);
//!     tracker.toggle("42").await.unwrap();
//!     connectivity.set_online(true);
//! }
//! ```

pub use timecard_core::*;
pub use timecard_sync as sync;

#[cfg(feature = "server")]
pub mod server {
    pub use timecard_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use timecard_client::*;
}

#[cfg(feature = "fs")]
pub mod fs {
    pub use timecard_fs::*;
}

#[cfg(feature = "mock")]
pub mod mock {
    pub use timecard_mock::*;
}

pub mod prelude {
    pub use timecard_core::prelude::*;
    pub use timecard_sync::prelude::*;

    #[cfg(feature = "server")]
    pub use timecard_server::prelude::*;

    #[cfg(feature = "client")]
    pub use timecard_client::HttpOracle;

    #[cfg(feature = "fs")]
    pub use timecard_fs::FileQueue;

    #[cfg(feature = "mock")]
    pub use timecard_mock::{AllowAllAuth, MemoryOracle, MemoryQueue};
}
