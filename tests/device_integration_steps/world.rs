//! Shared world state for device integration BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use wearlink::device::{
    adapters::memory::{RecordingNavigator, ScriptedDeviceApi},
    domain::{ConnectionOutcome, ConsentOutcome, DisconnectionOutcome, ProviderId},
    services::{ConnectionController, ConsentCallbackHandler, DisconnectionController},
};
use wearlink::local_state::{LocalState, adapters::memory::InMemoryKeyValueStore};
use wearlink::polling::{
    adapters::memory::RecordingPollTimer,
    domain::{PollPolicy, TaskId},
};

/// Connection controller wired to in-memory adapters.
pub type TestConnectionController = ConnectionController<
    ScriptedDeviceApi,
    RecordingPollTimer,
    RecordingNavigator,
    InMemoryKeyValueStore,
>;

/// Disconnection controller wired to in-memory adapters.
pub type TestDisconnectionController =
    DisconnectionController<ScriptedDeviceApi, RecordingPollTimer, InMemoryKeyValueStore>;

/// Consent handler wired to in-memory adapters.
pub type TestConsentHandler =
    ConsentCallbackHandler<ScriptedDeviceApi, InMemoryKeyValueStore, DefaultClock>;

/// Scenario world for device integration behaviour tests.
pub struct DeviceWorld {
    pub api: Arc<ScriptedDeviceApi>,
    pub timer: Arc<RecordingPollTimer>,
    pub navigator: Arc<RecordingNavigator>,
    pub store: Arc<InMemoryKeyValueStore>,
    pub provider: Option<ProviderId>,
    pub connection_outcome: Option<ConnectionOutcome>,
    pub disconnection_outcome: Option<DisconnectionOutcome>,
    pub consent_outcome: Option<ConsentOutcome>,
}

impl DeviceWorld {
    /// Creates a world whose backend accepts every submission.
    ///
    /// # Panics
    ///
    /// Panics if the fixed task id is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: Arc::new(ScriptedDeviceApi::new(
                TaskId::new("task-1").expect("valid task id"),
            )),
            timer: Arc::new(RecordingPollTimer::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            store: Arc::new(InMemoryKeyValueStore::new()),
            provider: None,
            connection_outcome: None,
            disconnection_outcome: None,
            consent_outcome: None,
        }
    }

    /// Replaces local state, keeping every other adapter.
    pub fn use_store(&mut self, store: InMemoryKeyValueStore) {
        self.store = Arc::new(store);
    }

    fn local_state(&self) -> LocalState<InMemoryKeyValueStore> {
        LocalState::new(Arc::clone(&self.store))
    }

    /// Builds a connection controller with the default policy.
    #[must_use]
    pub fn connection_controller(&self) -> TestConnectionController {
        ConnectionController::new(
            Arc::clone(&self.api),
            Arc::clone(&self.timer),
            Arc::clone(&self.navigator),
            self.local_state(),
            PollPolicy::connection(),
        )
    }

    /// Builds a disconnection controller with the default policy.
    #[must_use]
    pub fn disconnection_controller(&self) -> TestDisconnectionController {
        DisconnectionController::new(
            Arc::clone(&self.api),
            Arc::clone(&self.timer),
            self.local_state(),
            PollPolicy::disconnection(),
        )
    }

    /// Builds a consent handler on the system clock.
    #[must_use]
    pub fn consent_handler(&self) -> TestConsentHandler {
        ConsentCallbackHandler::new(
            Arc::clone(&self.api),
            self.local_state(),
            Arc::new(DefaultClock),
        )
    }
}

impl Default for DeviceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DeviceWorld {
    DeviceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
