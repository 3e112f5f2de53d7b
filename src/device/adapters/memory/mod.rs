//! In-memory device integration adapters.

mod integration_api;
mod navigator;

pub use integration_api::{DeviceApiCall, ScriptedDeviceApi};
pub use navigator::{Navigation, RecordingNavigator};
