//! Given steps for device integration BDD scenarios.

use super::world::DeviceWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use wearlink::api::ApiError;
use wearlink::device::domain::{IntegrationResult, IntegrationUrl, ProviderId, SpikeId};
use wearlink::local_state::{adapters::memory::InMemoryKeyValueStore, domain::StateKey};
use wearlink::polling::domain::TaskStatus;

#[given(r#"a wearable provider "{provider}""#)]
fn wearable_provider(world: &mut DeviceWorld, provider: String) -> Result<(), eyre::Report> {
    world.provider = Some(ProviderId::new(&provider).wrap_err("parse provider")?);
    Ok(())
}

#[given(r#"a linked "{provider}" device"#)]
fn linked_device(world: &mut DeviceWorld, provider: String) -> Result<(), eyre::Report> {
    world.provider = Some(ProviderId::new(&provider).wrap_err("parse provider")?);
    world.use_store(InMemoryKeyValueStore::with_entries([
        (StateKey::DeviceConnected, "true"),
        (StateKey::DeviceProvider, provider.as_str()),
        (StateKey::DeviceSpikeId, "spike-7"),
    ]));
    Ok(())
}

#[given(r#"the backend task reports "{statuses}""#)]
fn backend_task_reports(world: &mut DeviceWorld, statuses: String) -> Result<(), eyre::Report> {
    let parsed = statuses
        .split(',')
        .map(|raw| TaskStatus::try_from(raw.trim()))
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("parse scripted statuses")?;
    world.api.push_statuses(parsed);
    Ok(())
}

#[given(r#"the task result points to "{url}""#)]
fn task_result_points_to(world: &mut DeviceWorld, url: String) -> Result<(), eyre::Report> {
    let provider = world
        .provider
        .clone()
        .ok_or_else(|| eyre::eyre!("missing provider in scenario world"))?;
    world.api.set_result(Ok(IntegrationResult::new(
        IntegrationUrl::new(&url).wrap_err("parse integration url")?,
        SpikeId::new("spike-7").wrap_err("parse spike id")?,
        provider,
    )));
    Ok(())
}

#[given("the consent endpoint is unavailable")]
fn consent_endpoint_unavailable(world: &mut DeviceWorld) {
    world.api.set_consent_response(Err(ApiError::UnexpectedStatus {
        status: 503,
        endpoint: "/integrations/consent".to_owned(),
    }));
}
