//! Domain model for wearable device integration.

mod connection;
mod consent;
mod disconnection;
mod error;
mod ids;
mod integration;
mod route;
mod sync_request;

pub use connection::{ConnectionAttempt, ConnectionFailure, ConnectionOutcome, ConnectionState};
pub use consent::{ConsentOutcome, ConsentReport};
pub use disconnection::{
    DisconnectionAttempt, DisconnectionFailure, DisconnectionOutcome, DisconnectionState,
};
pub use error::{DeviceDomainError, ParseAppRouteError};
pub use ids::{AttemptId, ProviderId, SpikeId};
pub use integration::{IntegrationResult, IntegrationUrl};
pub use route::{AppRoute, RecoveryAction};
pub use sync_request::SyncRequest;
