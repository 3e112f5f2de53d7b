//! One-time code verification.
//!
//! A six-digit code is sent by email either to confirm a new account or to
//! authorize a password reset. The form allows a fixed number of wrong
//! codes before a new one must be requested.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
