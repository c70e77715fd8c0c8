use crate::action::*;
use crate::error::*;

/// A trait for injecting the durable pending-action queue.
///
/// The queue is an ordered local log: no deduplication, strict FIFO.
/// `commit` removes only the prefix that was successfully replayed, so a
/// partial drain keeps the failed tail for a later retry.
pub trait QueueStore: Send + Sync + 'static + Clone {
    /// Appends an action to the log.
    fn enqueue(&self, action: PendingAction)
    -> impl Future<Output = Result<(), QueueError>> + Send;

    /// Returns the full ordered list without removing anything.
    fn peek_all(&self) -> impl Future<Output = Result<Vec<PendingAction>, QueueError>> + Send;

    /// Removes the first `drained` actions from the log.
    ///
    /// Called with the number of actions that were applied to the server;
    /// committing more than the log holds clears it.
    fn commit(&self, drained: usize) -> impl Future<Output = Result<(), QueueError>> + Send;
}

/// A trait for the authoritative start/stop/status service.
///
/// Identity is carried by the implementation (e.g. a bearer credential), so
/// every call is scoped to (job, caller).
pub trait StatusOracle: Send + Sync + 'static + Clone {
    /// Opens a new time interval for the job. Always creates a new interval,
    /// regardless of existing open ones.
    fn start(&self, job_id: &str)
    -> impl Future<Output = Result<IntervalRecord, OracleError>> + Send;

    /// Closes the most recent open interval for the job.
    /// Fails with [`OracleError::Rejected`] if none is open.
    fn stop(&self, job_id: &str) -> impl Future<Output = Result<IntervalRecord, OracleError>> + Send;

    /// Returns the most recent interval for the job, or [`None`] if the
    /// caller has never tracked time against it.
    fn status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<Option<IntervalRecord>, OracleError>> + Send;

    /// Replays a queued action.
    fn apply(
        &self,
        action: &PendingAction,
    ) -> impl Future<Output = Result<IntervalRecord, OracleError>> + Send {
        async move {
            match action.action {
                TimeAction::Start => self.start(&action.job_id).await,
                TimeAction::Stop => self.stop(&action.job_id).await,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
}

/// A trait for injecting authentication logic into the server.
pub trait AuthProvider: Send + Sync + 'static + Clone {
    /// Verifies a bearer token and returns a User identity if successful.
    fn verify(&self, token: &str) -> impl Future<Output = Result<User, AuthError>> + Send;
}
