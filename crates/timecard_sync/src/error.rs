use thiserror::Error;
use timecard_core::prelude::*;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
