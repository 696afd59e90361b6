//! Domain Adapters
//!
//! Adapter implementations connecting domain ports to PostgreSQL.
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_claims::ClaimStore;
//!
//! let store = PostgresClaimStore::new(pool);
//! let claim = store.find_claim_by_id(claim_id).await?;
//! ```

pub mod claims;

pub use claims::PostgresClaimStore;
