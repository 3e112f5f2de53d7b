//! Tests for the device disconnection controller.

use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiError;
use crate::device::{
    adapters::memory::ScriptedDeviceApi,
    domain::{DisconnectionFailure, DisconnectionOutcome, DisconnectionState},
    services::DisconnectionController,
};
use crate::local_state::{
    LocalState, adapters::memory::InMemoryKeyValueStore, domain::StateKey, ports::KeyValueStore,
};
use crate::polling::{
    adapters::memory::RecordingPollTimer,
    domain::{PollPolicy, TaskId, TaskStatus},
};
use rstest::{fixture, rstest};
use tokio_util::sync::CancellationToken;

struct Harness {
    api: Arc<ScriptedDeviceApi>,
    timer: Arc<RecordingPollTimer>,
    store: Arc<InMemoryKeyValueStore>,
}

impl Harness {
    fn controller(
        &self,
    ) -> DisconnectionController<ScriptedDeviceApi, RecordingPollTimer, InMemoryKeyValueStore>
    {
        DisconnectionController::new(
            Arc::clone(&self.api),
            Arc::clone(&self.timer),
            LocalState::new(Arc::clone(&self.store)),
            PollPolicy::disconnection(),
        )
    }

    fn linked(&self, key: StateKey) -> Option<String> {
        self.store.get(key).expect("read")
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        api: Arc::new(ScriptedDeviceApi::new(
            TaskId::new("disconnect-1").expect("valid task id"),
        )),
        timer: Arc::new(RecordingPollTimer::new()),
        store: Arc::new(InMemoryKeyValueStore::with_entries([
            (StateKey::DeviceConnected, "true"),
            (StateKey::DeviceProvider, "garmin"),
            (StateKey::DeviceSpikeId, "spike-7"),
        ])),
    }
}

fn millis(values: &[u64]) -> Vec<Duration> {
    values.iter().copied().map(Duration::from_millis).collect()
}

#[rstest]
#[tokio::test]
async fn success_on_third_attempt_clears_the_link(harness: Harness) {
    harness
        .api
        .push_statuses([TaskStatus::Pending, TaskStatus::Pending, TaskStatus::Success]);
    let controller = harness.controller();

    let outcome = controller
        .disconnect(&CancellationToken::new())
        .await
        .expect("no concurrent attempt");

    assert!(outcome.is_success());
    assert_eq!(harness.api.status_reads(), 3);
    assert_eq!(harness.timer.waits(), millis(&[2000, 2000]));
    assert_eq!(controller.state(), DisconnectionState::Succeeded);
    assert_eq!(harness.linked(StateKey::DeviceConnected), None);
    assert_eq!(harness.linked(StateKey::DeviceProvider), None);
    assert_eq!(harness.linked(StateKey::DeviceSpikeId), None);
}

#[rstest]
#[case(vec![TaskStatus::Pending, TaskStatus::Retry, TaskStatus::Pending])]
#[case(vec![TaskStatus::Retry, TaskStatus::Retry, TaskStatus::Retry])]
#[tokio::test]
async fn non_terminal_statuses_exhaust_three_attempts(
    harness: Harness,
    #[case] statuses: Vec<TaskStatus>,
) {
    harness.api.push_statuses(statuses);
    harness.api.push_statuses([TaskStatus::Success]);

    let outcome = harness
        .controller()
        .disconnect(&CancellationToken::new())
        .await
        .expect("no concurrent attempt");

    assert_eq!(
        outcome,
        DisconnectionOutcome::Failed(DisconnectionFailure::AttemptsExhausted)
    );
    assert_eq!(harness.api.status_reads(), 3);
    assert_eq!(harness.timer.waits(), millis(&[2000, 2000]));
    assert_eq!(harness.linked(StateKey::DeviceConnected), Some("true".to_owned()));
}

#[rstest]
#[tokio::test]
async fn hard_failure_does_not_consume_remaining_attempts(harness: Harness) {
    harness.api.push_statuses([TaskStatus::Failure]);

    let outcome = harness
        .controller()
        .disconnect(&CancellationToken::new())
        .await
        .expect("no concurrent attempt");

    assert_eq!(
        outcome,
        DisconnectionOutcome::Failed(DisconnectionFailure::TaskFailed)
    );
    assert_eq!(harness.api.status_reads(), 1);
    assert!(harness.timer.waits().is_empty());
}

#[rstest]
#[tokio::test]
async fn transport_errors_consume_attempts(harness: Harness) {
    let offline = || ApiError::transport(std::io::Error::other("offline"));
    harness.api.statuses().push_error(offline());
    harness.api.statuses().push_error(offline());
    harness.api.push_statuses([TaskStatus::Success]);

    let outcome = harness
        .controller()
        .disconnect(&CancellationToken::new())
        .await
        .expect("no concurrent attempt");

    assert!(outcome.is_success());
    assert_eq!(harness.api.status_reads(), 3);
}

#[rstest]
#[tokio::test]
async fn submission_failure_is_an_initialization_error(harness: Harness) {
    harness
        .api
        .set_disconnect_response(Err(ApiError::UnexpectedStatus {
            status: 503,
            endpoint: "/integrations/disconnect".to_owned(),
        }));
    let controller = harness.controller();

    let outcome = controller
        .disconnect(&CancellationToken::new())
        .await
        .expect("no concurrent attempt");

    assert_eq!(
        outcome,
        DisconnectionOutcome::Failed(DisconnectionFailure::Initialization)
    );
    assert_eq!(harness.api.status_reads(), 0);
    assert_eq!(
        controller.state(),
        DisconnectionState::Failed(DisconnectionFailure::Initialization)
    );
}

#[rstest]
#[tokio::test]
async fn cancellation_keeps_the_link(harness: Harness) {
    let cancellation = CancellationToken::new();
    harness.timer.cancel_after(1, cancellation.clone());
    let controller = harness.controller();

    let outcome = controller
        .disconnect(&cancellation)
        .await
        .expect("no concurrent attempt");

    assert_eq!(outcome, DisconnectionOutcome::Cancelled);
    assert_eq!(harness.api.status_reads(), 1);
    assert_eq!(controller.state(), DisconnectionState::Polling { attempt: 2 });
    assert_eq!(harness.linked(StateKey::DeviceConnected), Some("true".to_owned()));
}
