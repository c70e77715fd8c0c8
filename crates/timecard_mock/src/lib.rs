//! # Timecard Mock
//!
//! In-memory doubles for development and testing.
//!
//! * [`MemoryQueue`]: a non-durable [`QueueStore`].
//! * [`MemoryOracle`]: a [`StatusOracle`] with the same interval semantics as
//!   the reference server, plus scripted failures and a call log so tests can
//!   assert drain order.
//! * [`AllowAllAuth`]: an [`AuthProvider`] that accepts ANY token.
//!
//! **WARNING**: `AllowAllAuth` authenticates every caller as the same dev
//! user. **DO NOT use this in production!!!**

use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use timecard_core::prelude::*;

/// A [`QueueStore`] backed by an in-memory Vec. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryQueue {
    actions: Arc<Mutex<Vec<PendingAction>>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueStore for MemoryQueue {
    async fn enqueue(&self, action: PendingAction) -> Result<(), QueueError> {
        self.actions.lock().unwrap().push(action);
        Ok(())
    }

    async fn peek_all(&self) -> Result<Vec<PendingAction>, QueueError> {
        Ok(self.actions.lock().unwrap().clone())
    }

    async fn commit(&self, drained: usize) -> Result<(), QueueError> {
        let mut actions = self.actions.lock().unwrap();
        let n = drained.min(actions.len());
        actions.drain(..n);
        Ok(())
    }
}

#[derive(Default)]
struct OracleState {
    intervals: HashMap<String, Vec<IntervalRecord>>,
    calls: Vec<(String, TimeAction)>,
    // One scripted slot per upcoming command: Some(err) fails it,
    // None lets it through.
    script: VecDeque<Option<OracleError>>,
}

/// A [`StatusOracle`] over an in-memory interval log.
///
/// `start` always opens a new interval; `stop` closes the newest open one or
/// rejects; `status` reports the newest interval. Tests can script failures
/// with [`fail_next`](MemoryOracle::fail_next), consumed one per command in
/// FIFO order, and inspect the command log with [`calls`](MemoryOracle::calls).
#[derive(Clone)]
pub struct MemoryOracle {
    state: Arc<Mutex<OracleState>>,
    user_id: String,
}

impl Default for MemoryOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOracle {
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
            user_id: "dev_user".to_string(),
        }
    }

    /// Scripts the next start/stop command to fail. Scripted slots are
    /// consumed one per command, in order.
    pub fn fail_next(&self, err: OracleError) {
        self.state.lock().unwrap().script.push_back(Some(err));
    }

    /// Scripts the next start/stop command to behave normally. Combine with
    /// [`fail_next`](MemoryOracle::fail_next) to fail the Nth command.
    pub fn pass_next(&self) {
        self.state.lock().unwrap().script.push_back(None);
    }

    /// Every start/stop command received so far, in arrival order.
    pub fn calls(&self) -> Vec<(String, TimeAction)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// All intervals recorded for a job, oldest first.
    pub fn intervals(&self, job_id: &str) -> Vec<IntervalRecord> {
        self.state
            .lock()
            .unwrap()
            .intervals
            .get(job_id)
            .cloned()
            .unwrap_or_default()
    }

    fn command(&self, job_id: &str, action: TimeAction) -> Result<IntervalRecord, OracleError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((job_id.to_string(), action));

        if let Some(Some(err)) = state.script.pop_front() {
            return Err(err);
        }

        let intervals = state.intervals.entry(job_id.to_string()).or_default();
        match action {
            TimeAction::Start => {
                let record = IntervalRecord {
                    id: uuid::Uuid::new_v4().to_string(),
                    job_id: job_id.to_string(),
                    user_id: self.user_id.clone(),
                    start_time: Utc::now(),
                    end_time: None,
                };
                intervals.push(record.clone());
                Ok(record)
            }
            TimeAction::Stop => {
                let open = intervals.iter_mut().rev().find(|i| i.is_open());
                match open {
                    Some(record) => {
                        record.end_time = Some(Utc::now());
                        Ok(record.clone())
                    }
                    None => Err(OracleError::Rejected("No active job to stop".to_string())),
                }
            }
        }
    }
}

impl StatusOracle for MemoryOracle {
    async fn start(&self, job_id: &str) -> Result<IntervalRecord, OracleError> {
        self.command(job_id, TimeAction::Start)
    }

    async fn stop(&self, job_id: &str) -> Result<IntervalRecord, OracleError> {
        self.command(job_id, TimeAction::Stop)
    }

    async fn status(&self, job_id: &str) -> Result<Option<IntervalRecord>, OracleError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .intervals
            .get(job_id)
            .and_then(|intervals| intervals.last())
            .cloned())
    }
}

/// An [`AuthProvider`] that lets any token pass as a fixed dev user.
#[derive(Clone)]
pub struct AllowAllAuth;

impl AuthProvider for AllowAllAuth {
    async fn verify(&self, _token: &str) -> Result<User, AuthError> {
        Ok(User {
            id: "dev_user".to_string(),
        })
    }
}
