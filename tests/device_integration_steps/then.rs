//! Then steps for device integration BDD scenarios.

use super::world::DeviceWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;
use std::time::Duration;
use wearlink::device::{
    adapters::memory::DeviceApiCall,
    domain::{AppRoute, ConnectionOutcome, ConsentOutcome, DisconnectionOutcome, IntegrationUrl},
};
use wearlink::local_state::{domain::StateKey, ports::KeyValueStore};

fn connection_outcome(world: &DeviceWorld) -> Result<&ConnectionOutcome, eyre::Report> {
    world
        .connection_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connection outcome"))
}

fn disconnection_outcome(world: &DeviceWorld) -> Result<DisconnectionOutcome, eyre::Report> {
    world
        .disconnection_outcome
        .ok_or_else(|| eyre::eyre!("missing disconnection outcome"))
}

fn consent_outcome(world: &DeviceWorld) -> Result<&ConsentOutcome, eyre::Report> {
    world
        .consent_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing consent outcome"))
}

#[then(r#"the user is sent to "{url}" exactly once"#)]
fn sent_to_exactly_once(world: &DeviceWorld, url: String) -> Result<(), eyre::Report> {
    let expected = IntegrationUrl::new(&url).wrap_err("parse expected url")?;
    let opened = world.navigator.external_urls();
    if opened != vec![expected] {
        return Err(eyre::eyre!("expected a single redirect to {url}, got {opened:?}"));
    }
    Ok(())
}

#[then("the attempt observed {count:u32} retry signals")]
fn attempt_observed_retries(world: &DeviceWorld, count: u32) -> Result<(), eyre::Report> {
    match connection_outcome(world)? {
        ConnectionOutcome::Redirected { retry_count, .. } if *retry_count == count => Ok(()),
        other => Err(eyre::eyre!(
            "expected a redirect after {count} retry signals, got {other:?}"
        )),
    }
}

#[then("the backend status was read {count:usize} times")]
fn status_read_times(world: &DeviceWorld, count: usize) -> Result<(), eyre::Report> {
    let reads = world.api.status_reads();
    if reads != count {
        return Err(eyre::eyre!("expected {count} status reads, got {reads}"));
    }
    Ok(())
}

#[then("the poller waited {interval:u64} ms between reads")]
fn poller_waited_between_reads(world: &DeviceWorld, interval: u64) -> Result<(), eyre::Report> {
    let expected_waits = world.api.status_reads().saturating_sub(1);
    let waits = world.timer.waits();
    if waits != vec![Duration::from_millis(interval); expected_waits] {
        return Err(eyre::eyre!(
            "expected {expected_waits} waits of {interval} ms, got {waits:?}"
        ));
    }
    Ok(())
}

#[then(r#"the connection fails with "{failure}""#)]
fn connection_fails_with(world: &DeviceWorld, failure: String) -> Result<(), eyre::Report> {
    match connection_outcome(world)? {
        ConnectionOutcome::Failed(actual) if actual.as_str() == failure => Ok(()),
        other => Err(eyre::eyre!("expected {failure} failure, got {other:?}")),
    }
}

#[then("no task result was requested")]
fn no_task_result_requested(world: &DeviceWorld) -> Result<(), eyre::Report> {
    let calls = world.api.calls();
    if calls
        .iter()
        .any(|call| matches!(call, DeviceApiCall::TaskResult(_)))
    {
        return Err(eyre::eyre!("unexpected task result request in {calls:?}"));
    }
    Ok(())
}

#[then("the user is never sent to the provider")]
fn never_sent_to_provider(world: &DeviceWorld) -> Result<(), eyre::Report> {
    let opened = world.navigator.external_urls();
    if !opened.is_empty() {
        return Err(eyre::eyre!("unexpected redirects: {opened:?}"));
    }
    Ok(())
}

#[then(r#"the user is routed to "{route}""#)]
fn routed_to(world: &DeviceWorld, route: String) -> Result<(), eyre::Report> {
    let expected = AppRoute::try_from(route.as_str()).wrap_err("parse expected route")?;
    let routes = world.navigator.routes();
    if routes != vec![expected] {
        return Err(eyre::eyre!("expected a single route to {route}, got {routes:?}"));
    }
    Ok(())
}

#[then("the disconnection succeeds")]
fn disconnection_succeeds(world: &DeviceWorld) -> Result<(), eyre::Report> {
    let outcome = disconnection_outcome(world)?;
    if !outcome.is_success() {
        return Err(eyre::eyre!("expected success, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"the disconnection fails with "{failure}""#)]
fn disconnection_fails_with(world: &DeviceWorld, failure: String) -> Result<(), eyre::Report> {
    match disconnection_outcome(world)? {
        DisconnectionOutcome::Failed(actual) if actual.as_str() == failure => Ok(()),
        other => Err(eyre::eyre!("expected {failure} failure, got {other:?}")),
    }
}

#[then("no device link remains")]
fn no_device_link_remains(world: &DeviceWorld) -> Result<(), eyre::Report> {
    for key in [
        StateKey::DeviceConnected,
        StateKey::DeviceProvider,
        StateKey::DeviceSpikeId,
    ] {
        let value = world.store.get(key).wrap_err("read local state")?;
        if value.is_some() {
            return Err(eyre::eyre!("expected {key} to be cleared, found {value:?}"));
        }
    }
    Ok(())
}

#[then("the device link is kept")]
fn device_link_is_kept(world: &DeviceWorld) -> Result<(), eyre::Report> {
    let connected = world
        .store
        .get(StateKey::DeviceConnected)
        .wrap_err("read local state")?;
    if connected.as_deref() != Some("true") {
        return Err(eyre::eyre!("expected the device to stay connected, found {connected:?}"));
    }
    Ok(())
}

#[then("the consent was not reported")]
fn consent_not_reported(world: &DeviceWorld) -> Result<(), eyre::Report> {
    let outcome = consent_outcome(world)?;
    if outcome.is_reported() || outcome.error().is_none() {
        return Err(eyre::eyre!("expected an unreported consent with an error, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"the user lands on "{route}""#)]
fn user_lands_on(world: &DeviceWorld, route: String) -> Result<(), eyre::Report> {
    let expected = AppRoute::try_from(route.as_str()).wrap_err("parse expected route")?;
    let actual = consent_outcome(world)?.next_route();
    if actual != expected {
        return Err(eyre::eyre!("expected to land on {expected}, got {actual}"));
    }
    Ok(())
}
