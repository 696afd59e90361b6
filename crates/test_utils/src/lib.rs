//! Test Utilities Crate
//!
//! Shared test infrastructure, fixtures, and helpers for the warranty claims
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, brands, and a seeded in-memory store
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for claim listings
//! - `generators`: Property-based strategies and `fake`-based random claims

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;

pub use domain_claims::mock::{InMemoryClaimStore, RecordingEmailSender};
