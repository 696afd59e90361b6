//! Claim queries for administrators and anonymous customers

use std::sync::Arc;

use tracing::debug;

use core_kernel::ClaimId;

use crate::access::{Caller, ClaimAccessGate};
use crate::brand::{BrandNotice, LocalizedNotificationResolver};
use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::language::RequestLanguage;
use crate::ports::{ClaimQuery, ClaimStore};

/// Filters for the administrator listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    /// Only claims in this status
    pub status: Option<ClaimStatus>,
    /// Only claims whose order number contains this text, ignoring case
    pub order_number_contains: Option<String>,
}

impl ClaimFilter {
    /// Builds a filter from raw request values; blank values mean "no filter"
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` for a non-blank, unrecognized status.
    pub fn parse(status: Option<&str>, order_number_contains: Option<&str>) -> Result<Self, ClaimError> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<ClaimStatus>()?),
            None => None,
        };
        let order_number_contains = order_number_contains
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            status,
            order_number_contains,
        })
    }

    fn to_query(&self) -> ClaimQuery {
        ClaimQuery {
            status: self.status,
            order_number_contains: self.order_number_contains.clone(),
            ..Default::default()
        }
    }
}

/// Read side of the claims core
#[derive(Clone)]
pub struct ClaimQueryEngine {
    store: Arc<dyn ClaimStore>,
}

impl ClaimQueryEngine {
    pub fn new(store: Arc<dyn ClaimStore>) -> Self {
        Self { store }
    }

    /// Lists claims matching every populated filter, in store order
    pub async fn list(&self, caller: &Caller, filter: &ClaimFilter) -> Result<Vec<Claim>, ClaimError> {
        ClaimAccessGate::authorize_listing(caller)?;
        let claims = self.store.find_claims(&filter.to_query()).await?;
        debug!(count = claims.len(), ?filter, "Listed claims");
        Ok(claims)
    }

    /// Finds the caller's claims by order number and email
    ///
    /// An unmatched pair yields an empty list. Returned claims are granted to
    /// the caller's anonymous session.
    pub async fn lookup(
        &self,
        caller: &mut Caller,
        order_number: &str,
        email: &str,
    ) -> Result<Vec<Claim>, ClaimError> {
        ClaimAccessGate::authorize_lookup(caller, order_number, email)?;

        if order_number.trim().is_empty() || email.trim().is_empty() {
            return Ok(Vec::new());
        }

        let claims = self
            .store
            .find_claims(&ClaimQuery::by_credentials(order_number, email))
            .await?;

        if let Some(session) = caller.session_mut() {
            for claim in &claims {
                session.grant(claim.id());
            }
        }
        debug!(count = claims.len(), "Anonymous claim lookup");
        Ok(claims)
    }

    /// Fetches one claim
    ///
    /// Authorization is checked before the store is consulted, so anonymous
    /// callers learn nothing about ids they were not granted.
    pub async fn get_by_id(&self, caller: &Caller, id: ClaimId) -> Result<Claim, ClaimError> {
        ClaimAccessGate::authorize_fetch(caller, id)?;
        self.store
            .find_claim_by_id(id)
            .await
            .map_err(|e| ClaimError::from_store(e, id))
    }

    /// Lists brands with their notice resolved for the request language
    pub async fn brands(&self, language: &RequestLanguage) -> Result<Vec<BrandNotice>, ClaimError> {
        let brands = self.store.find_brands(language.as_str()).await?;
        Ok(LocalizedNotificationResolver::resolve_all(&brands, language.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_filters_match_all() {
        let filter = ClaimFilter::parse(Some(""), Some("  ")).unwrap();
        assert_eq!(filter, ClaimFilter::default());
    }

    #[test]
    fn test_filter_parses_status_label() {
        let filter = ClaimFilter::parse(Some("In Progress"), Some("42")).unwrap();
        assert_eq!(filter.status, Some(ClaimStatus::InProgress));
        assert_eq!(filter.order_number_contains.as_deref(), Some("42"));
    }

    #[test]
    fn test_filter_rejects_unknown_status() {
        assert!(matches!(
            ClaimFilter::parse(Some("Open"), None),
            Err(ClaimError::InvalidStatus(_))
        ));
    }
}
