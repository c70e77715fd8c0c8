use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A start or stop command against a job's time log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAction {
    Start,
    Stop,
}

impl TimeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeAction::Start => "start",
            TimeAction::Stop => "stop",
        }
    }
}

impl std::fmt::Display for TimeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A toggle captured while the device had no connectivity.
///
/// Pending actions are kept in insertion order and replayed against the
/// server in that order once connectivity returns. Duplicates are allowed;
/// the server's start/stop semantics absorb them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub job_id: String,
    pub action: TimeAction,
    pub enqueued_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn new(job_id: impl Into<String>, action: TimeAction) -> Self {
        Self {
            job_id: job_id.into(),
            action,
            enqueued_at: Utc::now(),
        }
    }
}

/// One tracked time interval for a (job, user) pair, as the server reports it.
///
/// An interval with no `end_time` is *open*: the user is currently tracking
/// time against the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub id: String,
    pub job_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl IntervalRecord {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// What the start/stop toggle for a job should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No authoritative read has resolved yet.
    #[default]
    Pending,
    Stopped,
    Running,
}

impl RunState {
    /// Derives the state from the most recent interval the server reported.
    pub fn from_record(record: Option<&IntervalRecord>) -> Self {
        match record {
            Some(r) if r.is_open() => RunState::Running,
            _ => RunState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}
