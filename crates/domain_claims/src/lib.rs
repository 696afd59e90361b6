//! Warranty Claims Domain
//!
//! This crate implements the claim lifecycle and the coordination of customer
//! notifications around it.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending <-> In Progress <-> Resolved / Rejected
//! ```
//!
//! Administrators may move a claim between any two states. Every committed
//! transition hands the updated claim to the notification dispatcher, which
//! emails the customer in a detached task.
//!
//! # Access
//!
//! Callers are either administrators (full access) or anonymous customers who
//! prove ownership of a claim with its order number and email address.

pub mod access;
pub mod brand;
pub mod claim;
pub mod error;
pub mod language;
pub mod lifecycle;
pub mod notification;
pub mod ports;
pub mod query;

pub use access::{AnonymousSession, Caller, ClaimAccessGate};
pub use brand::{Brand, BrandNotice, LocalizedNotification, LocalizedNotificationResolver};
pub use claim::{Claim, ClaimDetails, ClaimStatus, PostalAddress};
pub use error::ClaimError;
pub use language::{RequestLanguage, FALLBACK_LANGUAGE};
pub use lifecycle::{ClaimStatusMachine, Transition};
pub use notification::{
    DispatchError, DispatchOutcome, DispatchStats, DispatchTicket,
    NotificationDispatchCoordinator,
};
pub use ports::{ClaimQuery, ClaimStore, EmailSender, StatusEmail};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock;
pub use query::{ClaimFilter, ClaimQueryEngine};
