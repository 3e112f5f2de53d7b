//! Then steps for passcode verification BDD scenarios.

use super::world::OtpWorld;
use rstest_bdd_macros::then;
use wearlink::verification::domain::{OtpFormState, OtpSubmitError, OtpSuccess};

fn last_submit(world: &OtpWorld) -> Result<&Result<OtpSuccess, OtpSubmitError>, eyre::Report> {
    world
        .last_submit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result"))
}

#[then("the form is locked")]
fn form_is_locked(world: &OtpWorld) -> Result<(), eyre::Report> {
    let state = world.flow()?.state();
    if state != OtpFormState::Exhausted {
        return Err(eyre::eyre!("expected the form to be exhausted, got {state:?}"));
    }
    Ok(())
}

#[then("the backend checked {count:usize} codes")]
fn backend_checked(world: &OtpWorld, count: usize) -> Result<(), eyre::Report> {
    let checked = world.api.verification_requests();
    if checked != count {
        return Err(eyre::eyre!("expected {count} verification requests, got {checked}"));
    }
    Ok(())
}

#[then("the submission is refused until a new code is sent")]
fn submission_refused(world: &OtpWorld) -> Result<(), eyre::Report> {
    match last_submit(world)? {
        Err(OtpSubmitError::AttemptsExhausted) => Ok(()),
        other => Err(eyre::eyre!("expected AttemptsExhausted, got {other:?}")),
    }
}

#[then("{count:u32} attempts remain")]
fn attempts_remain(world: &OtpWorld, count: u32) -> Result<(), eyre::Report> {
    let remaining = world.flow()?.challenge().remaining();
    if remaining != count {
        return Err(eyre::eyre!("expected {count} attempts remaining, got {remaining}"));
    }
    Ok(())
}

#[then("the account is verified")]
fn account_is_verified(world: &OtpWorld) -> Result<(), eyre::Report> {
    if !matches!(last_submit(world)?, Ok(OtpSuccess::Verified)) {
        return Err(eyre::eyre!("expected a verified account"));
    }
    let state = world.flow()?.state();
    if state != OtpFormState::Verified {
        return Err(eyre::eyre!("expected the form to be verified, got {state:?}"));
    }
    Ok(())
}

#[then("the code is reported as malformed")]
fn code_reported_malformed(world: &OtpWorld) -> Result<(), eyre::Report> {
    match last_submit(world)? {
        Err(OtpSubmitError::MalformedCode) => Ok(()),
        other => Err(eyre::eyre!("expected MalformedCode, got {other:?}")),
    }
}

#[then("the code is rejected with {count:u32} attempts remaining")]
fn code_rejected_with_remaining(world: &OtpWorld, count: u32) -> Result<(), eyre::Report> {
    match last_submit(world)? {
        Err(OtpSubmitError::Rejected { remaining }) if *remaining == count => Ok(()),
        other => Err(eyre::eyre!("expected a rejection leaving {count}, got {other:?}")),
    }
}

#[then(r#"the password reset is authorized for "{email}""#)]
fn password_reset_authorized(world: &OtpWorld, email: String) -> Result<(), eyre::Report> {
    match last_submit(world)? {
        Ok(OtpSuccess::ResetAuthorized(grant)) if grant.email().as_str() == email => Ok(()),
        other => Err(eyre::eyre!("expected a reset grant for {email}, got {other:?}")),
    }
}
