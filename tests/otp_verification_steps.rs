//! Behaviour tests for one-time passcode verification.

#[path = "otp_verification_steps/mod.rs"]
mod otp_verification_steps_defs;

use otp_verification_steps_defs::world::{OtpWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/otp_verification.feature",
    name = "Five wrong codes lock the form until a new code is sent"
)]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_codes_lock_the_form(world: OtpWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/otp_verification.feature",
    name = "A malformed code is refused locally"
)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_code_is_refused(world: OtpWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/otp_verification.feature",
    name = "A wrong code reports the remaining attempts"
)]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_code_reports_remaining(world: OtpWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/otp_verification.feature",
    name = "Reset codes authorize a password reset"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reset_codes_authorize_reset(world: OtpWorld) {
    let _ = world;
}
