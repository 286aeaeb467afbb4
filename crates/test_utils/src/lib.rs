//! Test Utilities Crate
//!
//! Shared test infrastructure for the Section 75 claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed dates, worked scenarios and service wiring
//! - `builders`: Builder for claim submissions with generated customer details
//! - `assertions`: Assertion helpers for eligibility results and claims
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing subscriber for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_test_tracing;
