use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use timecard_core::prelude::*;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::connectivity::Connectivity;
use crate::error::SyncError;
use crate::status::{StatusLine, StatusMessage, StatusTone};

/// What a [`Tracker::reconcile`] call did.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// Another drain was already in flight; nothing was dispatched.
    AlreadyDraining,
    /// The device is offline; the queue was left untouched.
    Offline,
    Drained(DrainReport),
}

/// Summary of one drain attempt.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Actions applied to the server.
    pub applied: usize,
    /// Rejected actions removed from the queue without being applied.
    pub dropped: usize,
    /// Actions left queued for a future attempt.
    pub remaining: usize,
    /// The error that halted the drain, if any.
    pub error: Option<OracleError>,
}

impl DrainReport {
    /// True when the whole queue was consumed without a halting error.
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.remaining == 0
    }
}

struct Inner<Q, O> {
    queue: Q,
    oracle: O,
    connectivity: Connectivity,
    // At most one drain in flight; overlapping triggers collapse here.
    drain_lock: tokio::sync::Mutex<()>,
    states: Mutex<HashMap<String, RunState>>,
    status: StatusLine,
    needs_reauth: AtomicBool,
}

/// The offline-tolerant time-tracking state machine.
///
/// Tracks a per-job running state that flips optimistically on
/// [`toggle`](Tracker::toggle) and is overwritten by every authoritative
/// read. While offline, toggles are appended to the queue instead of
/// dispatched; [`reconcile`](Tracker::reconcile) replays the queue in FIFO
/// order once connectivity returns.
///
/// Cloning is cheap and all clones share state.
pub struct Tracker<Q, O> {
    inner: Arc<Inner<Q, O>>,
}

impl<Q, O> Clone for Tracker<Q, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<Q, O> Tracker<Q, O>
where
    Q: QueueStore,
    O: StatusOracle,
{
    pub fn new(queue: Q, oracle: O, connectivity: Connectivity) -> Self {
        Self {
            inner: Arc::new(Inner {
                queue,
                oracle,
                connectivity,
                drain_lock: tokio::sync::Mutex::new(()),
                states: Mutex::new(HashMap::new()),
                status: StatusLine::default(),
                needs_reauth: AtomicBool::new(false),
            }),
        }
    }

    /// The state the job's toggle should display. [`RunState::Pending`]
    /// until the first authoritative read for the job resolves.
    pub fn run_state(&self, job_id: &str) -> RunState {
        self.inner
            .states
            .lock()
            .map(|states| states.get(job_id).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// The latest transient status message, if it has not expired yet.
    pub fn status_message(&self) -> Option<StatusMessage> {
        self.inner.status.current()
    }

    /// Set once the server rejects the credential; the host should discard
    /// it, re-authenticate and rebuild the oracle. Queued actions are kept.
    pub fn needs_reauth(&self) -> bool {
        self.inner.needs_reauth.load(Ordering::Relaxed)
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.inner.connectivity
    }

    fn set_state(&self, job_id: &str, state: RunState) {
        if let Ok(mut states) = self.inner.states.lock() {
            states.insert(job_id.to_string(), state);
        }
    }

    fn note_failure(&self, err: &OracleError) {
        if err.is_fatal() {
            self.inner.needs_reauth.store(true, Ordering::Relaxed);
            self.inner
                .status
                .set(StatusTone::Error, "Session expired, sign in again");
        }
    }

    /// Authoritative read: fetches the job's most recent interval and
    /// overwrites the local state, correcting any optimistic flip.
    pub async fn refresh(&self, job_id: &str) -> Result<RunState, SyncError> {
        match self.inner.oracle.status(job_id).await {
            Ok(record) => {
                let state = RunState::from_record(record.as_ref());
                self.set_state(job_id, state);
                Ok(state)
            }
            Err(e) => {
                self.note_failure(&e);
                Err(e.into())
            }
        }
    }

    /// Flips the job's toggle.
    ///
    /// A running job is stopped, anything else is started. The visible state
    /// flips immediately in both the online and the offline path; offline,
    /// the command is queued instead of dispatched and the flip stands until
    /// reconciliation re-syncs it with server truth.
    pub async fn toggle(&self, job_id: &str) -> Result<RunState, SyncError> {
        let action = if self.run_state(job_id).is_running() {
            TimeAction::Stop
        } else {
            TimeAction::Start
        };
        let flipped = match action {
            TimeAction::Start => RunState::Running,
            TimeAction::Stop => RunState::Stopped,
        };

        if !self.inner.connectivity.is_online() {
            self.inner
                .queue
                .enqueue(PendingAction::new(job_id, action))
                .await?;
            self.set_state(job_id, flipped);
            self.inner
                .status
                .set(StatusTone::Info, format!("Offline: {action} queued"));
            debug!(job_id, %action, "offline, action queued");
            return Ok(flipped);
        }

        self.set_state(job_id, flipped);

        let result = match action {
            TimeAction::Start => self.inner.oracle.start(job_id).await,
            TimeAction::Stop => self.inner.oracle.stop(job_id).await,
        };

        match result {
            Ok(record) => {
                let state = RunState::from_record(Some(&record));
                self.set_state(job_id, state);
                let text = match action {
                    TimeAction::Start => "Time started",
                    TimeAction::Stop => "Time stopped",
                };
                self.inner.status.set(StatusTone::Success, text);
                Ok(state)
            }
            Err(e) => {
                // The optimistic flip stands; the next authoritative read
                // corrects it if the server disagrees.
                self.note_failure(&e);
                if !e.is_fatal() {
                    self.inner
                        .status
                        .set(StatusTone::Error, format!("Failed to {action} job: {e}"));
                }
                warn!(job_id, %action, "direct dispatch failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Replays the queued actions against the server, in enqueue order.
    ///
    /// At most one drain runs at a time; an overlapping call returns
    /// [`ReconcileOutcome::AlreadyDraining`] without touching the server,
    /// and nothing is dispatched while the device is offline.
    /// The drain halts on the first transient or fatal error, commits only
    /// the prefix it consumed, and leaves the rest queued. Rejected actions
    /// are dropped (they can never succeed on retry) and the drain continues.
    /// After a clean drain every touched job is re-read from the server so
    /// the visible state converges to server truth.
    pub async fn reconcile(&self) -> Result<ReconcileOutcome, SyncError> {
        let Ok(_guard) = self.inner.drain_lock.try_lock() else {
            debug!("drain already in flight, skipping");
            return Ok(ReconcileOutcome::AlreadyDraining);
        };

        if !self.inner.connectivity.is_online() {
            return Ok(ReconcileOutcome::Offline);
        }

        let pending = self.inner.queue.peek_all().await?;
        if pending.is_empty() {
            return Ok(ReconcileOutcome::Drained(DrainReport::default()));
        }

        debug!(count = pending.len(), "draining queued actions");

        let mut report = DrainReport {
            remaining: pending.len(),
            ..DrainReport::default()
        };

        for action in &pending {
            match self.inner.oracle.apply(action).await {
                Ok(record) => {
                    report.applied += 1;
                    report.remaining -= 1;
                    self.set_state(&action.job_id, RunState::from_record(Some(&record)));
                    self.inner
                        .status
                        .set(StatusTone::Success, format!("Queued {} synced", action.action));
                }
                Err(e) if e.is_rejection() => {
                    report.dropped += 1;
                    report.remaining -= 1;
                    warn!(job_id = %action.job_id, action = %action.action, "dropping rejected action: {e}");
                    self.inner
                        .status
                        .set(StatusTone::Error, format!("Dropped queued {}: {e}", action.action));
                }
                Err(e) => {
                    self.note_failure(&e);
                    if !e.is_fatal() {
                        self.inner
                            .status
                            .set(StatusTone::Error, "Failed to sync queued action");
                    }
                    warn!("drain halted with {} actions left: {e}", report.remaining);
                    report.error = Some(e);
                    break;
                }
            }
        }

        // Only the consumed prefix leaves the queue; a failed tail is
        // retried on the next trigger.
        self.inner.queue.commit(report.applied + report.dropped).await?;

        if report.error.is_none() {
            let mut seen = Vec::new();
            for action in &pending {
                if !seen.contains(&action.job_id) {
                    seen.push(action.job_id.clone());
                }
            }
            for job_id in seen {
                if let Err(e) = self.refresh(&job_id).await {
                    warn!(%job_id, "post-drain refresh failed: {e}");
                }
            }
        }

        Ok(ReconcileOutcome::Drained(report))
    }

    /// Spawns the background reconciliation task: one drain at startup, then
    /// one per offline-to-online transition.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_reconcile_loop(&self) -> JoinHandle<()> {
        let tracker = self.clone();
        let mut events = self.inner.connectivity.subscribe();
        tokio::spawn(async move {
            if let Err(e) = tracker.reconcile().await {
                warn!("startup reconcile failed: {e}");
            }
            while events.became_online().await {
                if let Err(e) = tracker.reconcile().await {
                    warn!("reconcile failed: {e}");
                }
            }
        })
    }
}
