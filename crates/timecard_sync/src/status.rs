use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays visible before it self-clears.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Error,
}

/// Transient human-readable feedback about the latest mutation
/// (started, stopped, queued, synced, failed).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
}

/// A single message slot. Each new message replaces the previous one and
/// restarts the expiry clock.
#[derive(Default)]
pub(crate) struct StatusLine {
    slot: Mutex<Option<(StatusMessage, Instant)>>,
}

impl StatusLine {
    pub(crate) fn set(&self, tone: StatusTone, text: impl Into<String>) {
        let message = StatusMessage {
            text: text.into(),
            tone,
        };
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some((message, Instant::now()));
        }
    }

    pub(crate) fn current(&self) -> Option<StatusMessage> {
        let Ok(mut slot) = self.slot.lock() else {
            return None;
        };
        match &*slot {
            Some((message, shown_at)) if shown_at.elapsed() < STATUS_TTL => Some(message.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn message_expires_after_ttl() {
        let line = StatusLine::default();
        line.set(StatusTone::Success, "Time started");

        assert!(line.current().is_some());

        tokio::time::advance(STATUS_TTL + Duration::from_millis(1)).await;
        assert!(line.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_restarts_the_clock() {
        let line = StatusLine::default();
        line.set(StatusTone::Info, "Offline: start queued");

        tokio::time::advance(Duration::from_secs(2)).await;
        line.set(StatusTone::Success, "Queued start synced");

        tokio::time::advance(Duration::from_secs(2)).await;
        let message = line.current().expect("still visible");
        assert_eq!(message.text, "Queued start synced");
        assert_eq!(message.tone, StatusTone::Success);
    }
}
