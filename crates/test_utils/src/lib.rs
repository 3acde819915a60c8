//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! SmartClaim test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, dates and receipt images
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
