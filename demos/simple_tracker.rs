//! Drives the tracker against a running oracle server, simulating a
//! connectivity drop. Start `dev_oracle` first.
//!
//! ```sh
//! cargo run --example simple_tracker --features "client,fs"
//! ```

use timecard::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let queue = FileQueue::new("./timecard_data");
    let oracle = HttpOracle::new("http://localhost:3000", Some("dev-token".into()));
    let connectivity = Connectivity::new(true);

    let tracker = Tracker::new(queue, oracle, connectivity.clone());
    let reconciler = tracker.spawn_reconcile_loop();

    println!("initial state: {:?}", tracker.refresh("42").await?);

    // Online toggle dispatches directly.
    println!("toggled to {:?}", tracker.toggle("42").await?);

    // Offline toggle queues and flips optimistically.
    connectivity.set_online(false);
    println!("offline, toggled to {:?}", tracker.toggle("42").await?);
    if let Some(message) = tracker.status_message() {
        println!("status: {}", message.text);
    }

    // Back online: the queued stop is replayed and the view re-synced.
    connectivity.set_online(true);
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    println!("reconciled state: {:?}", tracker.run_state("42"));

    reconciler.abort();
    Ok(())
}
