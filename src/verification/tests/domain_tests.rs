//! Tests for verification domain values.

use crate::messages::MessageKey;
use crate::verification::domain::{
    EmailAddress, OtpChallenge, OtpCode, OtpContext, OtpFeedback, OtpSubmitError,
    ParseOtpContextError, VerificationDomainError,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn email() -> EmailAddress {
    EmailAddress::new("ana@example.com").expect("valid email")
}

#[rstest]
#[case("123456")]
#[case(" 000000 ")]
fn accepts_six_digit_codes(#[case] input: &str) {
    assert_eq!(
        OtpCode::parse(input).map(|code| code.as_str().to_owned()),
        Ok(input.trim().to_owned())
    );
}

#[rstest]
#[case("")]
#[case("12345")]
#[case("1234567")]
#[case("12a456")]
#[case("12 456")]
#[case("١٢٣٤٥٦")]
fn rejects_other_codes(#[case] input: &str) {
    assert_eq!(OtpCode::parse(input), Err(VerificationDomainError::MalformedCode));
}

#[test]
fn code_debug_output_is_redacted() {
    let code = OtpCode::parse("123456").expect("valid code");
    assert!(!format!("{code:?}").contains("123456"));
}

#[rstest]
#[case("ana")]
#[case("@example.com")]
#[case("ana@")]
#[case("a@b@c")]
#[case("ana maria@example.com")]
fn rejects_invalid_emails(#[case] input: &str) {
    assert!(matches!(
        EmailAddress::new(input),
        Err(VerificationDomainError::InvalidEmail(_))
    ));
}

#[rstest]
#[case("verify", OtpContext::Verify)]
#[case("reset_password", OtpContext::ResetPassword)]
#[case("Reset-Password", OtpContext::ResetPassword)]
fn parses_contexts(#[case] raw: &str, #[case] expected: OtpContext) {
    assert_eq!(OtpContext::try_from(raw), Ok(expected));
}

#[test]
fn unknown_context_is_a_typed_error() {
    assert_eq!(
        OtpContext::try_from("login"),
        Err(ParseOtpContextError("login".to_owned()))
    );
}

#[rstest]
fn exhaustion_is_reported_whatever_the_input(email: EmailAddress) {
    let mut challenge = OtpChallenge::new(email, OtpContext::Verify, 1);
    challenge.enter_code("12");
    assert!(matches!(
        challenge.prepare_submission(),
        Err(OtpSubmitError::MalformedCode)
    ));

    challenge.enter_code("123456");
    let _rejection = challenge.record_rejection();

    for input in ["", "12", "123456"] {
        challenge.enter_code(input);
        assert!(matches!(
            challenge.prepare_submission(),
            Err(OtpSubmitError::AttemptsExhausted)
        ));
    }
}

#[rstest]
fn rejection_counts_down_then_exhausts(email: EmailAddress) {
    let mut challenge = OtpChallenge::new(email, OtpContext::Verify, 2);
    challenge.enter_code("123456");

    assert!(matches!(
        challenge.record_rejection(),
        OtpSubmitError::Rejected { remaining: 1 }
    ));
    assert_eq!(challenge.pending_code(), "");
    assert!(matches!(
        challenge.record_rejection(),
        OtpSubmitError::AttemptsExhausted
    ));
    assert!(challenge.is_exhausted());

    challenge.reset_after_resend();
    assert_eq!(challenge.attempts(), 0);
    assert_eq!(challenge.remaining(), 2);
}

#[rstest]
fn feedback_renders_parameterized_messages(email: EmailAddress) {
    let remaining = OtpFeedback::Rejected { remaining: 3 }.user_message(&email);
    let malformed = OtpFeedback::MalformedCode.user_message(&email);

    assert_eq!(remaining.key(), MessageKey::OtpAttemptsRemaining);
    assert_eq!(remaining.params().get("remaining"), Some(&json!(3)));
    assert_eq!(malformed.params().get("email"), Some(&json!("ana@example.com")));
}
