//! Verification services.

mod flow;

pub use flow::OtpVerificationFlow;
