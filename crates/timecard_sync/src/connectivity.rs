use std::sync::Arc;
use tokio::sync::watch;

/// Tracks the host environment's online/offline signal.
///
/// The host pushes transitions with [`set_online`](Connectivity::set_online);
/// subscribers receive exactly one event per offline-to-online transition.
/// Going offline produces no event: the only consequence of being offline is
/// that new toggles are queued instead of dispatched.
#[derive(Clone)]
pub struct Connectivity {
    tx: Arc<watch::Sender<bool>>,
}

impl Connectivity {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self { tx: Arc::new(tx) }
    }

    /// Records the current connectivity. Subscribers are only notified when
    /// the value actually changes, so repeated reports do not double-fire.
    pub fn set_online(&self, online: bool) {
        self.tx.send_if_modified(|state| {
            if *state == online {
                false
            } else {
                *state = online;
                true
            }
        });
    }

    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> ConnectivityEvents {
        ConnectivityEvents {
            rx: self.tx.subscribe(),
        }
    }
}

/// A subscription to offline-to-online transitions.
pub struct ConnectivityEvents {
    rx: watch::Receiver<bool>,
}

impl ConnectivityEvents {
    /// Waits for the next offline-to-online transition.
    ///
    /// Returns `false` once every [`Connectivity`] handle has been dropped.
    pub async fn became_online(&mut self) -> bool {
        loop {
            if self.rx.changed().await.is_err() {
                return false;
            }
            if *self.rx.borrow_and_update() {
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_transition() {
        let connectivity = Connectivity::new(false);
        let mut events = connectivity.subscribe();

        connectivity.set_online(true);
        assert!(events.became_online().await);

        // Reporting online again is not a transition.
        connectivity.set_online(true);
        assert!(
            timeout(Duration::from_millis(10), events.became_online())
                .await
                .is_err()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn going_offline_does_not_fire() {
        let connectivity = Connectivity::new(true);
        let mut events = connectivity.subscribe();

        connectivity.set_online(false);
        assert!(
            timeout(Duration::from_millis(10), events.became_online())
                .await
                .is_err()
        );
        assert!(!connectivity.is_online());

        connectivity.set_online(true);
        assert!(events.became_online().await);
    }

    #[tokio::test]
    async fn closes_when_observer_is_dropped() {
        let connectivity = Connectivity::new(false);
        let mut events = connectivity.subscribe();

        drop(connectivity);
        assert!(!events.became_online().await);
    }
}
