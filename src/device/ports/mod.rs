//! Port contracts for device integration.

pub mod integration_api;
pub mod navigator;

pub use integration_api::DeviceIntegrationApi;
pub use navigator::AppNavigator;
