//! Claims Domain Ports
//!
//! Port interfaces for the collaborators the claims core depends on:
//!
//! - **ClaimStore**: the data store holding claims and brands
//!   (PostgreSQL adapter in `infra_db`, in-memory adapter in [`mock`])
//! - **EmailSender**: the outbound email transport used for status updates
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimStatusMachine, NotificationDispatchCoordinator};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn ClaimStore> = Arc::new(PostgresClaimStore::new(pool));
//! let sender: Arc<dyn EmailSender> = Arc::new(LogEmailSender::default());
//! let machine = ClaimStatusMachine::new(store, NotificationDispatchCoordinator::new(sender));
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::brand::Brand;
use crate::claim::{Claim, ClaimStatus};

/// Predicate over the claim collection
///
/// All populated fields must hold for a claim to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    /// Exact status
    pub status: Option<ClaimStatus>,
    /// Case-insensitive substring of the order number
    pub order_number_contains: Option<String>,
    /// Exact order number
    pub order_number: Option<String>,
    /// Email, compared trimmed and case-insensitively
    pub email: Option<String>,
}

impl ClaimQuery {
    /// Matches every claim
    pub fn all() -> Self {
        Self::default()
    }

    /// Query for the anonymous lookup key
    pub fn by_credentials(order_number: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            order_number: Some(order_number.into()),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Evaluates the predicate against a claim
    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(status) = self.status {
            if claim.status() != status {
                return false;
            }
        }
        if let Some(ref needle) = self.order_number_contains {
            if !claim
                .order_number()
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(ref order_number) = self.order_number {
            if claim.order_number() != order_number {
                return false;
            }
        }
        if let Some(ref email) = self.email {
            if !emails_match(claim.email(), email) {
                return false;
            }
        }
        true
    }
}

/// Email comparison used by the anonymous lookup
pub fn emails_match(stored: &str, supplied: &str) -> bool {
    stored.trim().to_lowercase() == supplied.trim().to_lowercase()
}

/// A status update email to send to a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEmail {
    pub recipient: String,
    pub order_number: String,
    pub status: ClaimStatus,
}

/// Data store for claims and brands
///
/// Implementations must apply `update_claim_status` atomically: readers see
/// either the old or the new status, never a partial write. Results of
/// `find_claims` come back in a deterministic order.
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Retrieves a claim by its identifier
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if no claim has this id.
    async fn find_claim_by_id(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Retrieves every claim matching the query
    async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Persists a new status and returns the updated claim
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if no claim has this id.
    async fn update_claim_status(
        &self,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<Claim, PortError>;

    /// Retrieves all brands with their notices for `language` joined in
    ///
    /// Adapters may include notices for other languages as well.
    async fn find_brands(&self, language: &str) -> Result<Vec<Brand>, PortError>;
}

/// Outbound email transport
#[async_trait]
pub trait EmailSender: DomainPort {
    /// Sends one status update email
    async fn send(&self, email: &StatusEmail) -> Result<(), PortError>;
}

/// In-memory adapters for tests and local development
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::sync::{Mutex, RwLock};

    /// In-memory claim store keeping insertion order
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryClaimStore {
        claims: Arc<RwLock<Vec<Claim>>>,
        brands: Arc<RwLock<Vec<Brand>>>,
        unavailable: Arc<AtomicBool>,
        status_writes: Arc<AtomicU64>,
    }

    impl InMemoryClaimStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims
        pub async fn with_claims(claims: Vec<Claim>) -> Self {
            let store = Self::new();
            for claim in claims {
                store.insert_claim(claim).await;
            }
            store
        }

        pub async fn insert_claim(&self, claim: Claim) {
            self.claims.write().await.push(claim);
        }

        pub async fn insert_brand(&self, brand: Brand) {
            self.brands.write().await.push(brand);
        }

        /// Makes every operation fail with `ServiceUnavailable`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of successful status writes
        pub fn status_writes(&self) -> u64 {
            self.status_writes.load(Ordering::SeqCst)
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "in-memory-claim-store".to_string(),
                });
            }
            Ok(())
        }
    }

    impl DomainPort for InMemoryClaimStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "in-memory-claim-store".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimStore for InMemoryClaimStore {
        async fn find_claim_by_id(&self, id: ClaimId) -> Result<Claim, PortError> {
            self.check_available()?;
            self.claims
                .read()
                .await
                .iter()
                .find(|c| c.id() == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
            self.check_available()?;
            Ok(self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| query.matches(c))
                .cloned()
                .collect())
        }

        async fn update_claim_status(
            &self,
            id: ClaimId,
            status: ClaimStatus,
        ) -> Result<Claim, PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            let claim = claims
                .iter_mut()
                .find(|c| c.id() == id)
                .ok_or_else(|| PortError::not_found("Claim", id))?;
            claim.record_status(status);
            self.status_writes.fetch_add(1, Ordering::SeqCst);
            Ok(claim.clone())
        }

        async fn find_brands(&self, _language: &str) -> Result<Vec<Brand>, PortError> {
            self.check_available()?;
            Ok(self.brands.read().await.clone())
        }
    }

    /// Email sender that records every message it is asked to send
    #[derive(Debug, Default, Clone)]
    pub struct RecordingEmailSender {
        sent: Arc<Mutex<Vec<StatusEmail>>>,
        failing: Arc<AtomicBool>,
    }

    impl RecordingEmailSender {
        pub fn new() -> Self {
            Self::default()
        }

        /// A sender whose every delivery fails after being recorded
        pub fn failing() -> Self {
            let sender = Self::default();
            sender.failing.store(true, Ordering::SeqCst);
            sender
        }

        /// Every message handed to the sender, including failed ones
        pub async fn sent(&self) -> Vec<StatusEmail> {
            self.sent.lock().await.clone()
        }
    }

    impl DomainPort for RecordingEmailSender {}

    #[async_trait]
    impl EmailSender for RecordingEmailSender {
        async fn send(&self, email: &StatusEmail) -> Result<(), PortError> {
            self.sent.lock().await.push(email.clone());
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "smtp".to_string(),
                });
            }
            Ok(())
        }
    }
}
