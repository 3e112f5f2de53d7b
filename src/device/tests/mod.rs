//! Unit tests for the device integration context.

mod disconnection_tests;
