//! PostgreSQL Claim Store Adapter
//!
//! Implements the `ClaimStore` port on top of `ClaimsRepository` and
//! `BrandRepository`, translating rows into domain types and database
//! errors into `PortError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_claims::ClaimStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn ClaimStore> = Arc::new(PostgresClaimStore::new(pool));
//! let claim = store.find_claim_by_id(claim_id).await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, BrandId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{Brand, Claim, ClaimDetails, ClaimQuery, ClaimStatus, ClaimStore};

use crate::error::DatabaseError;
use crate::repositories::brands::{BrandNotificationRow, BrandRow};
use crate::repositories::claims::{ClaimRow, ClaimRowFilter, ClaimStatus as DbClaimStatus};
use crate::repositories::{BrandRepository, ClaimsRepository};

const ADAPTER_ID: &str = "postgres-claim-store";

/// PostgreSQL-backed implementation of the `ClaimStore` port
///
/// Status updates are a single `UPDATE ... RETURNING` statement, so readers
/// observe either the old or the new row.
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    claims: ClaimsRepository,
    brands: BrandRepository,
    pool: PgPool,
}

impl PostgresClaimStore {
    /// Creates a new claim store using the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            claims: ClaimsRepository::new(pool.clone()),
            brands: BrandRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find_claim_by_id(&self, id: ClaimId) -> Result<Claim, PortError> {
        debug!("Fetching claim");

        let row = self
            .claims
            .get_by_id(*id.as_uuid())
            .await
            .map_err(|e| rename_not_found(e, id))?;

        Ok(row_to_claim(row))
    }

    #[instrument(skip(self))]
    async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let filter = ClaimRowFilter {
            status: query.status.map(status_to_db),
            order_number_contains: query.order_number_contains.clone(),
            order_number: query.order_number.clone(),
            email: query.email.clone(),
        };

        let rows = self.claims.find(&filter).await?;
        debug!(count = rows.len(), "Fetched claims");

        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    #[instrument(skip(self), fields(claim_id = %id, status = %status))]
    async fn update_claim_status(
        &self,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<Claim, PortError> {
        let row = self
            .claims
            .update_status(*id.as_uuid(), status_to_db(status))
            .await
            .map_err(|e| rename_not_found(e, id))?;

        debug!("Claim status persisted");
        Ok(row_to_claim(row))
    }

    #[instrument(skip(self))]
    async fn find_brands(&self, language: &str) -> Result<Vec<Brand>, PortError> {
        let rows = self.brands.list().await?;
        let notices = self.brands.notifications_for_language(language).await?;

        Ok(assemble_brands(rows, notices))
    }
}

/// Reports not-found errors under the prefixed claim id the caller used
fn rename_not_found(error: DatabaseError, id: ClaimId) -> DatabaseError {
    if error.is_not_found() {
        DatabaseError::not_found("Claim", id)
    } else {
        error
    }
}

// ============================================================================
// Row conversion
// ============================================================================

fn status_to_db(status: ClaimStatus) -> DbClaimStatus {
    match status {
        ClaimStatus::Pending => DbClaimStatus::Pending,
        ClaimStatus::InProgress => DbClaimStatus::InProgress,
        ClaimStatus::Resolved => DbClaimStatus::Resolved,
        ClaimStatus::Rejected => DbClaimStatus::Rejected,
    }
}

fn status_from_db(status: DbClaimStatus) -> ClaimStatus {
    match status {
        DbClaimStatus::Pending => ClaimStatus::Pending,
        DbClaimStatus::InProgress => ClaimStatus::InProgress,
        DbClaimStatus::Resolved => ClaimStatus::Resolved,
        DbClaimStatus::Rejected => ClaimStatus::Rejected,
    }
}

fn row_to_claim(row: ClaimRow) -> Claim {
    let details = ClaimDetails {
        order_number: row.order_number,
        email: row.email,
        name: row.name,
        street: row.street,
        postal_code: row.postal_code,
        city: row.city,
        phone_number: row.phone_number,
        brand: row.brand,
        problem_description: row.problem_description,
    };

    Claim::restore(
        ClaimId::from_uuid(row.claim_id),
        details,
        status_from_db(row.status),
        row.submission_date,
    )
}

/// Joins notice rows onto their brands, keeping brand order
fn assemble_brands(rows: Vec<BrandRow>, notices: Vec<BrandNotificationRow>) -> Vec<Brand> {
    let mut by_brand: HashMap<Uuid, Vec<BrandNotificationRow>> = HashMap::new();
    for notice in notices {
        by_brand.entry(notice.brand_id).or_default().push(notice);
    }

    rows.into_iter()
        .map(|row| {
            let mut brand = Brand::new(BrandId::from_uuid(row.brand_id), row.name);
            if let Some(text) = row.default_notification {
                brand = brand.with_default_notification(text);
            }
            for notice in by_brand.remove(&row.brand_id).unwrap_or_default() {
                if let Err(e) = brand.add_notification(notice.language, notice.content) {
                    warn!(error = %e, "Skipping duplicate brand notice");
                }
            }
            brand
        })
        .collect()
}
