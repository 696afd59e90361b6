//! Request/Response data transfer objects

pub mod brands;
pub mod claims;
