//! Repository implementations
//!
//! Repositories own the SQL and map between database rows and row types.
//! Translation to domain types happens in the adapters.

pub mod brands;
pub mod claims;

pub use brands::BrandRepository;
pub use claims::ClaimsRepository;
