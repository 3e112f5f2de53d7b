//! Behaviour tests for device connection, disconnection, and consent.

#[path = "device_integration_steps/mod.rs"]
mod device_integration_steps_defs;

use device_integration_steps_defs::world::{DeviceWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/device_integration.feature",
    name = "Connection succeeds after two retry signals"
)]
#[tokio::test(flavor = "multi_thread")]
async fn connection_succeeds_after_retries(world: DeviceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/device_integration.feature",
    name = "Connection fails on the third retry signal"
)]
#[tokio::test(flavor = "multi_thread")]
async fn connection_fails_on_third_retry(world: DeviceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/device_integration.feature",
    name = "Synchronization without a task id returns to settings"
)]
#[tokio::test(flavor = "multi_thread")]
async fn synchronization_without_task_id(world: DeviceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/device_integration.feature",
    name = "Disconnection succeeds on the third attempt"
)]
#[tokio::test(flavor = "multi_thread")]
async fn disconnection_succeeds_on_third_attempt(world: DeviceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/device_integration.feature",
    name = "Disconnection gives up after three reads"
)]
#[tokio::test(flavor = "multi_thread")]
async fn disconnection_gives_up(world: DeviceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/device_integration.feature",
    name = "A failed consent report still lands on the dashboard"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_consent_report_lands_on_dashboard(world: DeviceWorld) {
    let _ = world;
}
