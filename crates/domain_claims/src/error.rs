//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Invalid claim status: {0:?}")]
    InvalidStatus(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Brand {brand} already has a notification for language {language}")]
    DuplicateNotification { brand: String, language: String },

    #[error("Claim store error: {0}")]
    Store(#[from] PortError),
}

impl ClaimError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ClaimError::Forbidden(message.into())
    }

    /// Maps a store error for a specific claim, turning a missing row into `NotFound`
    pub fn from_store(error: PortError, claim_id: ClaimId) -> Self {
        if error.is_not_found() {
            ClaimError::NotFound(claim_id)
        } else {
            ClaimError::Store(error)
        }
    }
}
