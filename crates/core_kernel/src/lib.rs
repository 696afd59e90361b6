//! Core Kernel - Foundational types for the warranty claims system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for claims and brands
//! - The port error type and marker traits for the ports and adapters layout

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, BrandId};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
