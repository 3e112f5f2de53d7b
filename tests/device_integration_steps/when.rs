//! When steps for device integration BDD scenarios.

use super::world::{DeviceWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tokio_util::sync::CancellationToken;

#[when("the user connects the device")]
fn user_connects(world: &mut DeviceWorld) -> Result<(), eyre::Report> {
    let provider = world
        .provider
        .clone()
        .ok_or_else(|| eyre::eyre!("missing provider in scenario world"))?;
    let controller = world.connection_controller();
    let outcome = run_async(controller.connect(&provider, &CancellationToken::new()))
        .wrap_err("connect device")?;
    world.connection_outcome = Some(outcome);
    Ok(())
}

#[when(r#"synchronization opens with query "{query}""#)]
fn synchronization_opens(world: &mut DeviceWorld, query: String) -> Result<(), eyre::Report> {
    let controller = world.connection_controller();
    let outcome = run_async(controller.synchronize_from_query(&query, &CancellationToken::new()))
        .wrap_err("synchronize from query")?;
    world.connection_outcome = Some(outcome);
    Ok(())
}

#[when("the user disconnects the device")]
fn user_disconnects(world: &mut DeviceWorld) -> Result<(), eyre::Report> {
    let controller = world.disconnection_controller();
    let outcome =
        run_async(controller.disconnect(&CancellationToken::new())).wrap_err("disconnect device")?;
    world.disconnection_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the provider calls back with consent "{consent}""#)]
fn provider_calls_back(world: &mut DeviceWorld, consent: String) -> Result<(), eyre::Report> {
    let consent_given = consent
        .parse::<bool>()
        .wrap_err("parse consent flag")?;
    let handler = world.consent_handler();
    world.consent_outcome = Some(run_async(handler.handle(consent_given)));
    Ok(())
}
