//! Shared world state for passcode verification BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use wearlink::verification::{
    adapters::memory::ScriptedVerificationApi,
    domain::{OtpSubmitError, OtpSuccess},
    services::OtpVerificationFlow,
};

/// Flow type used by the BDD world.
pub type TestOtpFlow = OtpVerificationFlow<ScriptedVerificationApi>;

/// Scenario world for passcode verification behaviour tests.
pub struct OtpWorld {
    pub api: Arc<ScriptedVerificationApi>,
    pub flow: Option<TestOtpFlow>,
    pub last_submit: Option<Result<OtpSuccess, OtpSubmitError>>,
}

impl OtpWorld {
    /// Creates a world whose backend rejects every code.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: Arc::new(ScriptedVerificationApi::new()),
            flow: None,
            last_submit: None,
        }
    }

    /// Returns the flow under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no flow was started by a given step.
    pub fn flow_mut(&mut self) -> Result<&mut TestOtpFlow, eyre::Report> {
        self.flow
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing verification flow in scenario world"))
    }

    /// Returns the flow under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no flow was started by a given step.
    pub fn flow(&self) -> Result<&TestOtpFlow, eyre::Report> {
        self.flow
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing verification flow in scenario world"))
    }
}

impl Default for OtpWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OtpWorld {
    OtpWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
