//! Daily check-in gate.
//!
//! The dashboard prompts for a manual check-in at most once per local day,
//! and not at all while a wearable supplies the data.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
