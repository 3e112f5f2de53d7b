//! Check-in services.

mod gate;

pub use gate::DailyCheckInGate;
