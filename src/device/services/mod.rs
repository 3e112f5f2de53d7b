//! Device integration services.

mod connection;
mod consent;
mod disconnection;
mod link_store;

pub use connection::{ConnectionController, ConnectionError, ConnectionResult};
pub use consent::ConsentCallbackHandler;
pub use disconnection::{DisconnectionController, DisconnectionError};
pub use link_store::DeviceLinkStore;
