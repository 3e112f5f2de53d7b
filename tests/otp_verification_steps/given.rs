//! Given steps for passcode verification BDD scenarios.

use super::world::OtpWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use std::sync::Arc;
use wearlink::verification::{
    domain::{EmailAddress, OtpContext, VerificationVerdict},
    services::OtpVerificationFlow,
};

fn start_flow(world: &mut OtpWorld, email: &str, context: OtpContext) -> Result<(), eyre::Report> {
    let address = EmailAddress::new(email).wrap_err("parse email address")?;
    world.flow = Some(OtpVerificationFlow::new(
        Arc::clone(&world.api),
        address,
        context,
    ));
    Ok(())
}

#[given(r#"an account awaiting verification for "{email}""#)]
fn account_awaiting_verification(world: &mut OtpWorld, email: String) -> Result<(), eyre::Report> {
    start_flow(world, &email, OtpContext::Verify)
}

#[given(r#"a password reset for "{email}""#)]
fn password_reset_for(world: &mut OtpWorld, email: String) -> Result<(), eyre::Report> {
    start_flow(world, &email, OtpContext::ResetPassword)
}

#[given("the backend rejects {count:u32} codes then accepts one")]
fn backend_rejects_then_accepts(world: &mut OtpWorld, count: u32) {
    for _ in 0..count {
        world.api.push_verdict(VerificationVerdict::Rejected);
    }
    world.api.push_verdict(VerificationVerdict::Accepted);
}
