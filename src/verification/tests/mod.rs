//! Unit tests for the verification context.

mod domain_tests;
