//! Unit tests for the polling context.

mod domain_tests;
