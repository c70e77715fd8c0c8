//! # Timecard FileSystem Queue
//!
//! A local filesystem backend for the pending-action queue.
//!
//! This crate implements the [`QueueStore`] trait, keeping the queue as a
//! single JSON document that is read and written wholesale, so actions
//! enqueued while offline survive a process restart.
//!
//! ## Features
//!
//! * **Atomic Writes**: Uses temporary files and rename operations so a crash
//!   mid-write never leaves a torn queue behind.
//!
//! ## Usage
//!
//! ```no_run
//! use timecard_fs::FileQueue;
//!
//! let queue = FileQueue::new("./timecard_data");
//! ```

use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use timecard_core::prelude::*;
use tokio::fs;
use tokio::sync::Mutex;

/// File name of the queue document inside the data directory.
pub const QUEUE_FILE: &str = "time_log_queue.json";

async fn atomic_write(path: &std::path::Path, data: Bytes) -> Result<(), QueueError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(QueueError::Io)?;
    }

    let tmp_path = path.with_extension("tmp");

    fs::write(&tmp_path, data).await.map_err(QueueError::Io)?;
    fs::rename(&tmp_path, path).await.map_err(QueueError::Io)?;

    Ok(())
}

/// A durable [`QueueStore`] persisting the whole queue as one JSON list.
#[derive(Clone)]
pub struct FileQueue {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Arc<Mutex<()>>,
}

impl FileQueue {
    /// Creates a queue stored under the given data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            path: root.into().join(QUEUE_FILE),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<Vec<PendingAction>, QueueError> {
        match fs::read(&self.path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(QueueError::Io(e)),
        }
    }

    async fn store(&self, actions: &[PendingAction]) -> Result<(), QueueError> {
        let data = Bytes::from(serde_json::to_vec(actions)?);
        atomic_write(&self.path, data).await
    }
}

impl QueueStore for FileQueue {
    async fn enqueue(&self, action: PendingAction) -> Result<(), QueueError> {
        let _guard = self.lock.lock().await;
        let mut actions = self.load().await?;
        actions.push(action);
        self.store(&actions).await
    }

    async fn peek_all(&self) -> Result<Vec<PendingAction>, QueueError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn commit(&self, drained: usize) -> Result<(), QueueError> {
        let _guard = self.lock.lock().await;
        let mut actions = self.load().await?;
        actions.drain(..drained.min(actions.len()));
        self.store(&actions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(job_id: &str, action: TimeAction) -> PendingAction {
        PendingAction::new(job_id, action)
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FileQueue::new(dir.path());

        assert!(queue.peek_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn queue_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let queue = FileQueue::new(dir.path());
            queue.enqueue(action("42", TimeAction::Start)).await.unwrap();
            queue.enqueue(action("42", TimeAction::Stop)).await.unwrap();
        }

        let reopened = FileQueue::new(dir.path());
        let actions = reopened.peek_all().await.unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].action, TimeAction::Start);
        assert_eq!(actions[1].action, TimeAction::Stop);
    }

    #[tokio::test]
    async fn commit_removes_only_the_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FileQueue::new(dir.path());

        queue.enqueue(action("1", TimeAction::Start)).await.unwrap();
        queue.enqueue(action("2", TimeAction::Start)).await.unwrap();
        queue.enqueue(action("3", TimeAction::Start)).await.unwrap();

        queue.commit(2).await.unwrap();

        let rest = queue.peek_all().await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].job_id, "3");
    }

    #[tokio::test]
    async fn over_commit_clears_the_queue() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FileQueue::new(dir.path());

        queue.enqueue(action("1", TimeAction::Start)).await.unwrap();
        queue.commit(10).await.unwrap();

        assert!(queue.peek_all().await.unwrap().is_empty());
    }
}
