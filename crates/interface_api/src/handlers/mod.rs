//! Request handlers

pub mod brands;
pub mod claims;
pub mod health;
