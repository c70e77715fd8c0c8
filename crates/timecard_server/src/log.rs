use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use timecard_core::prelude::*;

#[derive(Error, Debug)]
pub enum LogError {
    /// The caller has no open interval on the job.
    /// Maps to **HTTP 400 Bad Request**.
    #[error("No active job to stop")]
    NoOpenInterval,
}

/// The server's interval store, keyed by (job, user).
///
/// `start` always opens a new interval; `stop` closes the newest open one,
/// so at most one open interval per (job, user) is ever terminated by a
/// single stop.
#[derive(Clone, Default)]
pub struct IntervalLog {
    inner: Arc<Mutex<HashMap<(String, String), Vec<IntervalRecord>>>>,
}

impl IntervalLog {
    fn key(job_id: &str, user_id: &str) -> (String, String) {
        (job_id.to_string(), user_id.to_string())
    }

    pub fn start(&self, job_id: &str, user_id: &str) -> IntervalRecord {
        let record = IntervalRecord {
            id: uuid::Uuid::new_v4().to_string(),
            job_id: job_id.to_string(),
            user_id: user_id.to_string(),
            start_time: Utc::now(),
            end_time: None,
        };

        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner
            .entry(Self::key(job_id, user_id))
            .or_default()
            .push(record.clone());

        record
    }

    pub fn stop(&self, job_id: &str, user_id: &str) -> Result<IntervalRecord, LogError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let open = inner
            .get_mut(&Self::key(job_id, user_id))
            .and_then(|intervals| intervals.iter_mut().rev().find(|i| i.is_open()));

        match open {
            Some(record) => {
                record.end_time = Some(Utc::now());
                Ok(record.clone())
            }
            None => Err(LogError::NoOpenInterval),
        }
    }

    pub fn status(&self, job_id: &str, user_id: &str) -> Option<IntervalRecord> {
        let inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner
            .get(&Self::key(job_id, user_id))
            .and_then(|intervals| intervals.last())
            .cloned()
    }
}
