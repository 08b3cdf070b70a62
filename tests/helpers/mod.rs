//! Shared helpers for integration tests.

pub mod host_helpers;
pub mod source_fixtures;
