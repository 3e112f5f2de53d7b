//! Unit tests for the daily check-in gate.
