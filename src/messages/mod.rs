//! Localized user-facing messages.
//!
//! Controllers never surface raw errors to the UI. Every failure state
//! carries a [`UserMessage`]: a stable [`MessageKey`] plus template
//! parameters. A [`MessageCatalog`] renders the message for a [`Locale`].

mod catalog;
mod key;

pub use catalog::{Locale, MessageCatalog, MessageError, ParseLocaleError};
pub use key::{MessageKey, UserMessage};
