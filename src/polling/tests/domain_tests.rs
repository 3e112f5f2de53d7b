//! Tests for polling domain values.

use crate::polling::domain::{
    ParseTaskStatusError, PollBudget, PollPolicy, PollingDomainError, TaskId, TaskStatus,
    TransportErrorPolicy,
};
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[case("PENDING", TaskStatus::Pending)]
#[case("retry", TaskStatus::Retry)]
#[case(" SUCCESS ", TaskStatus::Success)]
#[case("Failure", TaskStatus::Failure)]
fn parses_wire_statuses(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[test]
fn unknown_status_is_a_typed_error() {
    assert_eq!(
        TaskStatus::try_from("STARTED"),
        Err(ParseTaskStatusError("STARTED".to_owned()))
    );
}

#[test]
fn status_serializes_in_wire_case() {
    let encoded = serde_json::to_string(&TaskStatus::Retry).expect("serialize");
    assert_eq!(encoded, "\"RETRY\"");
}

#[test]
fn task_id_rejects_blank_values() {
    assert_eq!(TaskId::new("   "), Err(PollingDomainError::EmptyTaskId));
}

#[test]
fn task_id_trims_surrounding_whitespace() {
    let task_id = TaskId::new(" abc-123 ").expect("valid task id");
    assert_eq!(task_id.as_str(), "abc-123");
}

#[test]
fn connection_and_disconnection_presets_differ() {
    let connection = PollPolicy::connection();
    let disconnection = PollPolicy::disconnection();

    assert_eq!(connection.interval(), Duration::from_millis(3000));
    assert_eq!(
        connection.budget(),
        PollBudget::RetrySignals { max_retries: 3 }
    );
    assert_eq!(connection.on_transport_error(), TransportErrorPolicy::Abort);
    assert_eq!(disconnection.interval(), Duration::from_millis(2000));
    assert_eq!(
        disconnection.budget(),
        PollBudget::TotalAttempts { max_attempts: 3 }
    );
    assert_eq!(
        disconnection.on_transport_error(),
        TransportErrorPolicy::CountAsAttempt
    );
}

#[rstest]
#[case(2, false)]
#[case(3, true)]
#[case(4, true)]
fn retry_budget_is_inclusive(#[case] retry_signals: u32, #[case] exhausted: bool) {
    assert_eq!(
        PollPolicy::connection().retries_exhausted(retry_signals),
        exhausted
    );
    assert!(!PollPolicy::connection().attempts_exhausted(retry_signals));
}

#[test]
fn ceiling_is_checked_against_the_next_wait() {
    let policy = PollPolicy::connection().with_max_wait(Some(Duration::from_secs(6)));

    assert!(!policy.next_wait_exceeds_ceiling(Duration::from_secs(3)));
    assert!(policy.next_wait_exceeds_ceiling(Duration::from_secs(6)));
    assert!(!PollPolicy::connection().next_wait_exceeds_ceiling(Duration::from_secs(600)));
}
