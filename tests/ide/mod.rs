//! IDE feature tests
//!
//! Tests for:
//! - Context classification
//! - Code completion (self members, variables, class names)
//! - Insertion planning
//! - The host-facing provider

pub mod tests_classifier;
pub mod tests_completion;
pub mod tests_insertion;
pub mod tests_provider;
