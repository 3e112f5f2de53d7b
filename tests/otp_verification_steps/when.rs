//! When steps for passcode verification BDD scenarios.

use super::world::{OtpWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn submit(world: &mut OtpWorld, code: &str) -> Result<(), eyre::Report> {
    let flow = world.flow_mut()?;
    flow.enter_code(code);
    let result = run_async(flow.submit());
    world.last_submit = Some(result);
    Ok(())
}

#[when(r#"the user enters "{code}" {count:u32} times"#)]
fn user_enters_repeatedly(
    world: &mut OtpWorld,
    code: String,
    count: u32,
) -> Result<(), eyre::Report> {
    for _ in 0..count {
        submit(world, &code)?;
    }
    Ok(())
}

#[when(r#"the user submits "{code}""#)]
fn user_submits(world: &mut OtpWorld, code: String) -> Result<(), eyre::Report> {
    submit(world, &code)
}

#[when("the user asks for a new code")]
fn user_asks_for_new_code(world: &mut OtpWorld) -> Result<(), eyre::Report> {
    let flow = world.flow_mut()?;
    run_async(flow.resend()).wrap_err("resend code")?;
    Ok(())
}
