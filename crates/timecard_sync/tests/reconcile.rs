use timecard_core::prelude::*;
use timecard_mock::{MemoryOracle, MemoryQueue};
use timecard_sync::{Connectivity, DrainReport, ReconcileOutcome, StatusTone, Tracker};

fn drained(outcome: ReconcileOutcome) -> DrainReport {
    match outcome {
        ReconcileOutcome::Drained(report) => report,
        other => panic!("expected a drain to run, got {other:?}"),
    }
}

#[tokio::test]
async fn reconcile_while_offline_leaves_the_queue_alone() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let tracker = Tracker::new(queue.clone(), oracle.clone(), Connectivity::new(false));

    tracker.toggle("42").await.unwrap();

    let outcome = tracker.reconcile().await.unwrap();
    assert!(matches!(outcome, ReconcileOutcome::Offline));
    assert_eq!(queue.peek_all().await.unwrap().len(), 1);
    assert!(oracle.calls().is_empty());
}

#[tokio::test]
async fn offline_start_queues_and_shows_running() {
    // Scenario A: offline tap on "Start" for job 42.
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let tracker = Tracker::new(queue.clone(), oracle.clone(), Connectivity::new(false));

    let state = tracker.toggle("42").await.unwrap();

    assert_eq!(state, RunState::Running);
    assert_eq!(tracker.run_state("42"), RunState::Running);

    let pending = queue.peek_all().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].job_id, "42");
    assert_eq!(pending[0].action, TimeAction::Start);

    // Nothing was dispatched.
    assert!(oracle.calls().is_empty());

    let message = tracker.status_message().expect("queued status shown");
    assert_eq!(message.tone, StatusTone::Info);
}

#[tokio::test]
async fn offline_start_stop_reconciles_to_stopped() {
    // Scenario B: start then stop while offline, then reconnect.
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let connectivity = Connectivity::new(false);
    let tracker = Tracker::new(queue.clone(), oracle.clone(), connectivity.clone());

    tracker.toggle("42").await.unwrap();
    tracker.toggle("42").await.unwrap();

    assert_eq!(tracker.run_state("42"), RunState::Stopped);
    assert_eq!(queue.peek_all().await.unwrap().len(), 2);

    connectivity.set_online(true);
    let report = drained(tracker.reconcile().await.unwrap());

    assert!(report.is_clean());
    assert_eq!(report.applied, 2);
    assert!(queue.peek_all().await.unwrap().is_empty());

    // The server holds one interval that was both opened and closed.
    let intervals = oracle.intervals("42");
    assert_eq!(intervals.len(), 1);
    assert!(!intervals[0].is_open());

    assert_eq!(tracker.run_state("42"), RunState::Stopped);
}

#[tokio::test]
async fn drain_preserves_enqueue_order() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let connectivity = Connectivity::new(false);
    let tracker = Tracker::new(queue.clone(), oracle.clone(), connectivity.clone());

    tracker.toggle("1").await.unwrap();
    tracker.toggle("2").await.unwrap();
    tracker.toggle("1").await.unwrap();

    connectivity.set_online(true);
    drained(tracker.reconcile().await.unwrap());

    assert_eq!(
        oracle.calls(),
        vec![
            ("1".to_string(), TimeAction::Start),
            ("2".to_string(), TimeAction::Start),
            ("1".to_string(), TimeAction::Stop),
        ]
    );
}

#[tokio::test]
async fn transient_failure_halts_and_keeps_the_tail() {
    // Scenario C, with the prefix-commit fix: the failed action and
    // everything after it stay queued for the next trigger.
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let connectivity = Connectivity::new(false);
    let tracker = Tracker::new(queue.clone(), oracle.clone(), connectivity.clone());

    tracker.toggle("1").await.unwrap();
    tracker.toggle("2").await.unwrap();
    tracker.toggle("3").await.unwrap();

    // First command goes through, the second hits a network error.
    oracle.pass_next();
    oracle.fail_next(OracleError::Network("connection reset".into()));

    connectivity.set_online(true);
    let report = drained(tracker.reconcile().await.unwrap());

    assert_eq!(report.applied, 1);
    assert_eq!(report.remaining, 2);
    assert!(matches!(report.error, Some(OracleError::Network(_))));

    // The third action was never dispatched.
    assert_eq!(oracle.calls().len(), 2);

    // The failed action is still at the head of the queue.
    let rest = queue.peek_all().await.unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].job_id, "2");
    assert_eq!(rest[1].job_id, "3");

    let message = tracker.status_message().expect("failure surfaced");
    assert_eq!(message.tone, StatusTone::Error);

    // The next trigger picks up where the drain halted.
    let report = drained(tracker.reconcile().await.unwrap());
    assert!(report.is_clean());
    assert_eq!(report.applied, 2);
    assert!(queue.peek_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn authoritative_read_overrides_optimistic_state() {
    // Scenario D plus conflict correction.
    let oracle = MemoryOracle::new();
    oracle.start("42").await.unwrap();

    let tracker = Tracker::new(MemoryQueue::new(), oracle.clone(), Connectivity::new(true));

    assert_eq!(tracker.run_state("42"), RunState::Pending);
    let state = tracker.refresh("42").await.unwrap();
    assert_eq!(state, RunState::Running);

    // Close it behind the tracker's back; the next read wins over the
    // locally visible Running.
    oracle.stop("42").await.unwrap();
    assert_eq!(tracker.refresh("42").await.unwrap(), RunState::Stopped);
    assert_eq!(tracker.run_state("42"), RunState::Stopped);
}

#[tokio::test]
async fn rejected_action_is_dropped_and_drain_continues() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let connectivity = Connectivity::new(false);
    let tracker = Tracker::new(queue.clone(), oracle.clone(), connectivity.clone());

    // A stop with nothing open is logically invalid and gets rejected by
    // the oracle; the start behind it must still be applied.
    queue
        .enqueue(PendingAction::new("1", TimeAction::Stop))
        .await
        .unwrap();
    queue
        .enqueue(PendingAction::new("2", TimeAction::Start))
        .await
        .unwrap();

    connectivity.set_online(true);
    let report = drained(tracker.reconcile().await.unwrap());

    assert!(report.is_clean());
    assert_eq!(report.dropped, 1);
    assert_eq!(report.applied, 1);
    assert!(queue.peek_all().await.unwrap().is_empty());
    assert_eq!(tracker.run_state("2"), RunState::Running);
}

#[tokio::test]
async fn unauthorized_preserves_queue_and_flags_reauth() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let connectivity = Connectivity::new(false);
    let tracker = Tracker::new(queue.clone(), oracle.clone(), connectivity.clone());

    tracker.toggle("1").await.unwrap();
    tracker.toggle("2").await.unwrap();

    oracle.fail_next(OracleError::Unauthorized);
    connectivity.set_online(true);

    let report = drained(tracker.reconcile().await.unwrap());

    assert!(matches!(report.error, Some(OracleError::Unauthorized)));
    assert!(tracker.needs_reauth());
    // Nothing was committed; both actions await a replay after re-login.
    assert_eq!(queue.peek_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn overlapping_reconcile_is_skipped() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let tracker = Tracker::new(queue.clone(), oracle.clone(), Connectivity::new(true));

    queue
        .enqueue(PendingAction::new("1", TimeAction::Start))
        .await
        .unwrap();

    let (first, second) = tokio::join!(tracker.reconcile(), tracker.reconcile());
    let outcomes = [first.unwrap(), second.unwrap()];

    let drains = outcomes
        .iter()
        .filter(|o| matches!(o, ReconcileOutcome::Drained(_)))
        .count();
    let skips = outcomes
        .iter()
        .filter(|o| matches!(o, ReconcileOutcome::AlreadyDraining))
        .count();

    // One side drains, the other sees the in-flight guard or an already
    // empty queue; the action is dispatched exactly once either way.
    assert_eq!(drains + skips, 2);
    assert!(drains >= 1);
    assert_eq!(
        oracle
            .calls()
            .iter()
            .filter(|(_, a)| *a == TimeAction::Start)
            .count(),
        1
    );
    assert!(queue.peek_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn online_event_triggers_background_drain() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let connectivity = Connectivity::new(false);
    let tracker = Tracker::new(queue.clone(), oracle.clone(), connectivity.clone());

    tracker.toggle("42").await.unwrap();

    let reconciler = tracker.spawn_reconcile_loop();
    connectivity.set_online(true);

    // Wait for the background task to pick the transition up.
    for _ in 0..100 {
        if queue.peek_all().await.unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    assert!(queue.peek_all().await.unwrap().is_empty());
    assert_eq!(oracle.calls().len(), 1);
    assert_eq!(tracker.run_state("42"), RunState::Running);

    reconciler.abort();
}

#[tokio::test]
async fn direct_dispatch_when_online() {
    let queue = MemoryQueue::new();
    let oracle = MemoryOracle::new();
    let tracker = Tracker::new(queue.clone(), oracle.clone(), Connectivity::new(true));

    let state = tracker.toggle("42").await.unwrap();

    assert_eq!(state, RunState::Running);
    assert!(queue.peek_all().await.unwrap().is_empty());
    assert_eq!(oracle.calls(), vec![("42".to_string(), TimeAction::Start)]);

    let message = tracker.status_message().expect("success status shown");
    assert_eq!(message.tone, StatusTone::Success);
    assert_eq!(message.text, "Time started");
}
